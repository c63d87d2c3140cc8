use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;

use super::{CanvasSize, Disposal, Frame, FrameSeries, Raster};
use crate::SwatchError;

/// Decode a file into a frame series. GIF bytes keep their full animation
/// structure; every other supported format becomes a one-frame series.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<FrameSeries, SwatchError> {
    let bytes = fs::read(path)?;
    decode_series(&bytes)
}

pub fn decode_series(bytes: &[u8]) -> Result<FrameSeries, SwatchError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Gif) => decode_gif(bytes),
        _ => decode_still(bytes),
    }
}

fn decode_still(bytes: &[u8]) -> Result<FrameSeries, SwatchError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    let mut series = FrameSeries::new(CanvasSize::new(width, height));
    series.push_frame(Frame::still(Raster::new(width, height, image.into_raw())));
    Ok(series)
}

/// GIF decoding goes through the `gif` crate directly: frames keep their own
/// buffers, left/top offsets, delays (already in 10 ms ticks) and disposal
/// methods, and the logical screen size becomes the canvas.
fn decode_gif(bytes: &[u8]) -> Result<FrameSeries, SwatchError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(Cursor::new(bytes))?;

    let canvas = CanvasSize::new(u32::from(decoder.width()), u32::from(decoder.height()));
    let mut series = FrameSeries::new(canvas);

    while let Some(frame) = decoder.read_next_frame()? {
        let raster = Raster::with_offset(
            u32::from(frame.width),
            u32::from(frame.height),
            u32::from(frame.left),
            u32::from(frame.top),
            frame.buffer.to_vec(),
        );
        series.push_frame(Frame {
            raster,
            delay_ticks: frame.delay,
            disposal: disposal_from_gif(frame.dispose),
        });
    }

    Ok(series)
}

fn disposal_from_gif(dispose: gif::DisposalMethod) -> Disposal {
    match dispose {
        gif::DisposalMethod::Any => Disposal::None,
        gif::DisposalMethod::Keep => Disposal::DoNotDispose,
        gif::DisposalMethod::Background => Disposal::Background,
        gif::DisposalMethod::Previous => Disposal::Previous,
    }
}
