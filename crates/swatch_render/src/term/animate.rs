use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::raster::{CanvasSize, Disposal, Frame, FrameSeries};
use crate::RenderOptions;

use super::emit::{cursor_down, fragment};
use super::frame::FrameRenderer;
use super::grid::{plan, TerminalGeometry};

/// Milliseconds per frame-delay tick.
const TICK_MS: u64 = 10;

/// Replays a frame series against one sink: plan, render, emit, sleep, then
/// move the cursor according to the finished frame's disposal method. A still
/// image is just a one-frame series.
pub struct AnimationDriver {
    geometry: TerminalGeometry,
    options: RenderOptions,
}

impl AnimationDriver {
    pub fn new(geometry: TerminalGeometry, options: RenderOptions) -> Self {
        Self { geometry, options }
    }

    /// The full escape text of one frame, buffered. `play` in streaming mode
    /// writes the same fragments one by one; the bytes are identical.
    pub fn frame_text(&self, canvas: CanvasSize, frame: &Frame) -> String {
        let grid = plan(self.geometry, canvas, self.options.address_mode());
        let renderer = FrameRenderer::new(grid, &frame.raster, self.options.sample_mode());
        let mut text = String::new();
        for unit in renderer {
            text.push_str(&fragment(&unit));
        }
        text
    }

    pub fn play<W: Write>(&self, series: &FrameSeries, sink: &mut W) -> io::Result<()> {
        let canvas = series.canvas();
        let frames = series.frames();

        for (index, frame) in frames.iter().enumerate() {
            // Recomputed per frame; geometry is fixed for the run but the
            // plan is cheap and keeps each frame self-contained.
            let grid = plan(self.geometry, canvas, self.options.address_mode());

            if self.options.stream {
                let renderer =
                    FrameRenderer::new(grid, &frame.raster, self.options.sample_mode());
                for unit in renderer {
                    sink.write_all(fragment(&unit).as_bytes())?;
                }
            } else {
                sink.write_all(self.frame_text(canvas, frame).as_bytes())?;
            }
            sink.flush()?;

            if frame.delay_ticks > 0 {
                thread::sleep(Duration::from_millis(u64::from(frame.delay_ticks) * TICK_MS));
            }

            let rows = grid.terminal_rows();
            if rows == 0 {
                continue;
            }

            if index + 1 == frames.len() {
                // Step past the image so the prompt lands below it.
                sink.write_all(cursor_down(rows).as_bytes())?;
                sink.flush()?;
            } else if matches!(frame.disposal, Disposal::Previous | Disposal::Background) {
                // Background is handled like Previous; background-color
                // compositing is out of scope.
                sink.write_all(cursor_down(rows).as_bytes())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;

    fn red_frame(disposal: Disposal) -> Frame {
        let raster = Raster::new(2, 2, [255, 0, 0, 255].repeat(4));
        Frame { raster, delay_ticks: 0, disposal }
    }

    fn series(disposals: &[Disposal]) -> FrameSeries {
        let mut series = FrameSeries::new(CanvasSize::new(2, 2));
        for &disposal in disposals {
            series.push_frame(red_frame(disposal));
        }
        series
    }

    fn driver(stream: bool) -> AnimationDriver {
        let options = RenderOptions { stream, ..RenderOptions::default() };
        AnimationDriver::new(TerminalGeometry { rows: 24, cols: 80 }, options)
    }

    fn play_to_string(driver: &AnimationDriver, series: &FrameSeries) -> String {
        let mut sink = Vec::new();
        driver.play(series, &mut sink).unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn streaming_and_buffered_output_are_byte_identical() {
        let series = series(&[Disposal::None, Disposal::Previous]);
        assert_eq!(
            play_to_string(&driver(true), &series),
            play_to_string(&driver(false), &series)
        );
    }

    #[test]
    fn rendering_the_same_frame_twice_is_idempotent() {
        let driver = driver(false);
        let frame = red_frame(Disposal::None);
        let canvas = CanvasSize::new(2, 2);
        assert_eq!(driver.frame_text(canvas, &frame), driver.frame_text(canvas, &frame));
    }

    #[test]
    fn none_disposal_emits_no_cursor_down_between_frames() {
        let output = play_to_string(&driver(true), &series(&[Disposal::None, Disposal::None]));
        // the 2x2 canvas renders as 2 terminal rows; only the final step-past
        assert_eq!(output.matches("\x1b[2B").count(), 1);
        assert!(output.ends_with("\x1b[2B"));
    }

    #[test]
    fn previous_disposal_advances_past_the_frame() {
        let output =
            play_to_string(&driver(true), &series(&[Disposal::Previous, Disposal::None]));
        assert_eq!(output.matches("\x1b[2B").count(), 2);
    }

    #[test]
    fn background_disposal_behaves_like_previous() {
        let previous =
            play_to_string(&driver(true), &series(&[Disposal::Previous, Disposal::None]));
        let background =
            play_to_string(&driver(true), &series(&[Disposal::Background, Disposal::None]));
        assert_eq!(previous, background);
    }

    #[test]
    fn each_frame_rewinds_to_its_own_top() {
        let output = play_to_string(&driver(true), &series(&[Disposal::None]));
        assert_eq!(output.matches("\x1b[2A").count(), 1);
    }

    #[test]
    fn degenerate_terminal_writes_nothing() {
        let driver = AnimationDriver::new(
            TerminalGeometry { rows: 1, cols: 80 },
            RenderOptions::default(),
        );
        let mut sink = Vec::new();
        driver.play(&series(&[Disposal::None]), &mut sink).unwrap();
        assert!(sink.is_empty());
    }
}
