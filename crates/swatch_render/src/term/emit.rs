use super::frame::DrawUnit;
use super::palette::PaletteColor;

const RESET: &str = "\x1b[0m";
const UPPER_HALF_BLOCK: char = '\u{2580}';

/// The literal terminal text for one draw unit. Streaming each fragment and
/// concatenating a frame's fragments into one buffer produce identical bytes
/// by construction.
pub fn fragment(unit: &DrawUnit) -> String {
    match unit {
        DrawUnit::Cell(PaletteColor::Indexed(index)) => {
            format!("\x1b[0;48;5;{index}m  ")
        },
        // Skip over the cell so the terminal's own background shows through.
        DrawUnit::Cell(PaletteColor::Transparent) => "\x1b[2C".to_string(),
        DrawUnit::PairedCell { top, bottom } => {
            format!("\x1b[0;38;5;{top};48;5;{bottom}m{UPPER_HALF_BLOCK}")
        },
        DrawUnit::RowEnd => format!("{RESET}\n"),
        DrawUnit::CursorUp(rows) => format!("\x1b[{rows}A"),
    }
}

/// Downward cursor motion used by the animation driver to step past a frame.
pub fn cursor_down(rows: u32) -> String {
    format!("\x1b[{rows}B")
}
