mod raster;
mod term;

pub use raster::{
    loader::{decode_series, load_series},
    sampler::{sample_region, SampleMode},
    CanvasSize, Disposal, Frame, FrameSeries, Raster, Rgba16,
};
pub use term::{
    animate::AnimationDriver,
    emit::{cursor_down, fragment},
    frame::{DrawUnit, FrameRenderer},
    grid::{plan, AddressMode, Grid, TerminalGeometry},
    palette::{quantize, PaletteColor},
};

#[derive(Debug, thiserror::Error)]
pub enum SwatchError {
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to decode animation: {0}")]
    Gif(#[from] gif::DecodingError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable pipeline configuration threaded through planning, rendering and
/// emission. No process-wide mutable state.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Average each cell's source region; point-sample its corner when false.
    pub average_sampling: bool,
    /// Half-block addressing: two stacked colors per character cell.
    pub compact: bool,
    /// Write fragments as they are produced instead of buffering each frame.
    /// Either way the emitted bytes are identical.
    pub stream: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { average_sampling: true, compact: false, stream: true }
    }
}

impl RenderOptions {
    pub fn sample_mode(&self) -> SampleMode {
        if self.average_sampling {
            SampleMode::Average
        } else {
            SampleMode::Point
        }
    }

    pub fn address_mode(&self) -> AddressMode {
        if self.compact {
            AddressMode::Compact
        } else {
            AddressMode::Normal
        }
    }
}
