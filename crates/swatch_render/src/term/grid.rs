use crate::raster::CanvasSize;

/// Terminal extent in character cells. Only rows and cols feed the planner;
/// a manual width override synthesizes a huge row count instead of probing
/// the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub rows: u16,
    pub cols: u16,
}

/// Cell addressing strategy. Normal mode spends two character columns per
/// destination cell; compact mode packs a 2x2 destination block into one
/// half-block character, doubling both axes relative to normal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AddressMode {
    #[default]
    Normal,
    Compact,
}

/// The per-frame destination plan: window extents plus the single integer
/// scale ratio every coordinate mapping in the frame reuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub dest_rows: u32,
    pub dest_cols: u32,
    pub scale_num: u32,
    pub scale_den: u32,
    canvas: CanvasSize,
    mode: AddressMode,
}

/// Fit the canvas into the terminal window using integer arithmetic only.
/// One terminal row stays reserved for the prompt. Truncation here is
/// deliberate and consistent with the per-coordinate mapping.
pub fn plan(geometry: TerminalGeometry, canvas: CanvasSize, mode: AddressMode) -> Grid {
    let reserved_rows = u32::from(geometry.rows.saturating_sub(1));
    let (mut win_row, mut win_col) = match mode {
        AddressMode::Normal => (reserved_rows, u32::from(geometry.cols) / 2),
        AddressMode::Compact => (reserved_rows * 2, (u32::from(geometry.cols) / 2) * 2),
    };

    win_row = win_row.min(canvas.height);
    win_col = win_col.min(canvas.width);

    if win_row == 0 || win_col == 0 || canvas.is_empty() {
        return Grid { dest_rows: 0, dest_cols: 0, scale_num: 1, scale_den: 1, canvas, mode };
    }

    let col_bound = u64::from(win_col) * u64::from(canvas.height) / u64::from(canvas.width);
    let (scale_num, scale_den) = if col_bound < u64::from(win_row) {
        (win_col, canvas.width)
    } else {
        (win_row, canvas.height)
    };

    Grid { dest_rows: win_row, dest_cols: win_col, scale_num, scale_den, canvas, mode }
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.dest_rows == 0 || self.dest_cols == 0
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn mode(&self) -> AddressMode {
        self.mode
    }

    /// Destination rows whose mapped source row actually lands inside the
    /// canvas. The non-binding axis's window can overshoot; clipping here is
    /// equivalent to breaking the scan loop on the first out-of-range index.
    pub fn clipped_rows(&self) -> u32 {
        self.clip(self.dest_rows, self.canvas.height)
    }

    pub fn clipped_cols(&self) -> u32 {
        self.clip(self.dest_cols, self.canvas.width)
    }

    fn clip(&self, dest: u32, extent: u32) -> u32 {
        if dest == 0 {
            return 0;
        }
        // y maps in range iff y*den/num (truncated) < extent,
        // i.e. y < ceil(extent*num/den)
        let in_range = (u64::from(extent) * u64::from(self.scale_num) + u64::from(self.scale_den)
            - 1)
            / u64::from(self.scale_den);
        dest.min(in_range.min(u64::from(u32::MAX)) as u32)
    }

    /// Character rows this grid occupies on screen; compact mode folds two
    /// destination rows into each.
    pub fn terminal_rows(&self) -> u32 {
        match self.mode {
            AddressMode::Normal => self.clipped_rows(),
            AddressMode::Compact => (self.clipped_rows() + 1) / 2,
        }
    }

    /// Half-open source row range for destination row `y`.
    pub fn source_rows(&self, y: u32) -> (u32, u32) {
        self.source_range(y, self.canvas.height)
    }

    /// Half-open source column range for destination column `x`.
    pub fn source_cols(&self, x: u32) -> (u32, u32) {
        self.source_range(x, self.canvas.width)
    }

    fn source_range(&self, index: u32, extent: u32) -> (u32, u32) {
        let num = u64::from(self.scale_num);
        let den = u64::from(self.scale_den);
        let lo = u64::from(index) * den / num;
        let hi = (u64::from(index) + 1) * den / num;
        (lo as u32, hi.min(u64::from(extent)) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(rows: u16, cols: u16) -> TerminalGeometry {
        TerminalGeometry { rows, cols }
    }

    #[test]
    fn four_by_four_canvas_in_three_by_eight_terminal() {
        let grid = plan(geometry(3, 8), CanvasSize::new(4, 4), AddressMode::Normal);
        assert_eq!(grid.dest_rows, 2);
        assert_eq!(grid.dest_cols, 4);
        // row budget binds: 2 destination rows over 4 source rows
        assert_eq!((grid.scale_num, grid.scale_den), (2, 4));
        assert_eq!(grid.source_rows(0), (0, 2));
        assert_eq!(grid.source_rows(1), (2, 4));
        // the column window overshoots; only two 2x2 blocks fit the canvas
        assert_eq!(grid.clipped_cols(), 2);
        assert_eq!(grid.source_cols(0), (0, 2));
        assert_eq!(grid.source_cols(1), (2, 4));
    }

    #[test]
    fn window_never_exceeds_terminal_budget() {
        for (rows, cols, w, h) in [(24u16, 80u16, 640u32, 480u32), (10, 7, 3, 9), (2, 2, 100, 1)] {
            let grid = plan(geometry(rows, cols), CanvasSize::new(w, h), AddressMode::Normal);
            assert!(grid.dest_rows <= u32::from(rows) - 1);
            assert!(grid.dest_cols <= u32::from(cols) / 2);
            assert!(grid.dest_rows <= h);
            assert!(grid.dest_cols <= w);
        }
    }

    #[test]
    fn column_budget_binds_for_wide_images() {
        let grid = plan(geometry(40, 20), CanvasSize::new(100, 10), AddressMode::Normal);
        // 10*10/100 = 1 < 39, so columns bind
        assert_eq!((grid.scale_num, grid.scale_den), (10, 100));
        assert_eq!(grid.clipped_rows(), 1);
        assert_eq!(grid.clipped_cols(), 10);
    }

    #[test]
    fn compact_mode_doubles_both_axes() {
        let grid = plan(geometry(11, 20), CanvasSize::new(1000, 1000), AddressMode::Compact);
        assert_eq!(grid.dest_rows, 20);
        assert_eq!(grid.dest_cols, 20);
        assert_eq!(grid.terminal_rows(), 10);
    }

    #[test]
    fn degenerate_geometry_yields_empty_grid() {
        assert!(plan(geometry(1, 80), CanvasSize::new(10, 10), AddressMode::Normal).is_empty());
        assert!(plan(geometry(24, 1), CanvasSize::new(10, 10), AddressMode::Normal).is_empty());
        assert!(plan(geometry(24, 80), CanvasSize::new(0, 10), AddressMode::Normal).is_empty());
        assert!(plan(geometry(24, 80), CanvasSize::new(10, 0), AddressMode::Normal).is_empty());
    }

    #[test]
    fn small_image_maps_cells_one_to_one() {
        let grid = plan(geometry(50, 50), CanvasSize::new(4, 4), AddressMode::Normal);
        assert_eq!(grid.dest_rows, 4);
        assert_eq!(grid.dest_cols, 4);
        for i in 0..4 {
            assert_eq!(grid.source_rows(i), (i, i + 1));
            assert_eq!(grid.source_cols(i), (i, i + 1));
        }
    }
}
