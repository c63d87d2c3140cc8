use crate::raster::sampler::{sample_region, SampleMode};
use crate::raster::Raster;

use super::grid::{AddressMode, Grid};
use super::palette::{quantize, PaletteColor, CUBE_BASE};

/// One drawable unit of a frame's output stream, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawUnit {
    /// Normal mode: one two-character swatch, or a transparent skip.
    Cell(PaletteColor),
    /// Compact mode: one half-block character carrying two stacked colors.
    PairedCell { top: u8, bottom: u8 },
    /// End of one terminal row.
    RowEnd,
    /// Rewind to the frame's first row; emitted once, after the last row.
    CursorUp(u32),
}

/// Lazily renders one frame into a row-major `DrawUnit` stream. Finite, not
/// restartable; drives the sampler and palette mapper per cell.
pub struct FrameRenderer<'a> {
    grid: Grid,
    raster: &'a Raster,
    sample_mode: SampleMode,
    rows: u32,
    cols: u32,
    row: u32,
    col: u32,
    /// Compact-mode scratch: palette indices of the buffered top row.
    pending_top: Option<Vec<u8>>,
    finished: bool,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(grid: Grid, raster: &'a Raster, sample_mode: SampleMode) -> Self {
        Self {
            grid,
            raster,
            sample_mode,
            rows: grid.clipped_rows(),
            cols: grid.clipped_cols(),
            row: 0,
            col: 0,
            pending_top: None,
            finished: false,
        }
    }

    fn sample_cell(&self, row: u32, col: u32) -> PaletteColor {
        let (y0, y1) = self.grid.source_rows(row);
        let (x0, x1) = self.grid.source_cols(col);
        quantize(sample_region(self.raster, x0, y0, x1, y1, self.sample_mode))
    }

    fn next_normal(&mut self) -> Option<DrawUnit> {
        if self.row >= self.rows {
            self.finished = true;
            if self.rows == 0 {
                return None;
            }
            return Some(DrawUnit::CursorUp(self.grid.terminal_rows()));
        }

        if self.col >= self.cols {
            self.col = 0;
            self.row += 1;
            return Some(DrawUnit::RowEnd);
        }

        let unit = DrawUnit::Cell(self.sample_cell(self.row, self.col));
        self.col += 1;
        Some(unit)
    }

    /// Compact mode pairs destination rows: the pair's top row is buffered as
    /// palette indices, then each bottom-row sample completes one half-block
    /// cell. Transparency is not representable here; transparent samples
    /// become cube black, and a clipped-off bottom row reads as black too.
    fn next_compact(&mut self) -> Option<DrawUnit> {
        if self.row >= self.rows {
            self.finished = true;
            if self.rows == 0 {
                return None;
            }
            return Some(DrawUnit::CursorUp(self.grid.terminal_rows()));
        }

        if self.col >= self.cols {
            self.col = 0;
            self.row += 2;
            self.pending_top = None;
            return Some(DrawUnit::RowEnd);
        }

        if self.pending_top.is_none() {
            let top_row = self.row;
            let buffered = (0..self.cols)
                .map(|col| self.sample_cell(top_row, col).opaque_index())
                .collect();
            self.pending_top = Some(buffered);
        }

        let top = self.pending_top.as_ref().map_or(CUBE_BASE, |row| row[self.col as usize]);
        let bottom = if self.row + 1 < self.rows {
            self.sample_cell(self.row + 1, self.col).opaque_index()
        } else {
            CUBE_BASE
        };

        self.col += 1;
        Some(DrawUnit::PairedCell { top, bottom })
    }
}

impl Iterator for FrameRenderer<'_> {
    type Item = DrawUnit;

    fn next(&mut self) -> Option<DrawUnit> {
        if self.finished {
            return None;
        }
        match self.grid.mode() {
            AddressMode::Normal => self.next_normal(),
            AddressMode::Compact => self.next_compact(),
        }
    }
}
