//! Terminal UI components (spinner, colors).

mod spinner;
mod theme;

pub use spinner::Spinner;
pub use theme::{COLOR_NAMES, Palette, Style, parse_color};
