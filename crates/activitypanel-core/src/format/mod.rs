/// Display formatting — byte sizes, grouped counts, and chart colours.
///
/// Everything here is pure; the panel calls in when rendering counters.
pub mod count;
pub mod palette;
pub mod size;

pub use count::{format_count, FormatKind, NumberLocale};
pub use palette::{color_for_index, parse_rgba, ChartPalettes, ColorPalette, Rgba};
pub use size::{format_bytes, DEFAULT_DECIMALS, MAX_DECIMALS};
