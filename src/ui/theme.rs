//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Every helper
//! returns plain text when colors are disabled.

use anyhow::{Result, bail};
use owo_colors::{AnsiColors, OwoColorize, Style as Look};
use std::fmt::Display;

use crate::output;

fn apply<T: Display>(text: T, look: Look) -> String {
    if output::is_no_color() {
        text.to_string()
    } else {
        format!("{}", text.style(look))
    }
}

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for section headers (e.g., "Backends")
    pub fn header<T: Display>(text: T) -> String {
        apply(text, Look::new().bold())
    }

    /// Style for labels/keys (e.g., "endpoint", "credential")
    pub fn label<T: Display>(text: T) -> String {
        apply(text, Look::new().dimmed())
    }

    /// Style for primary values (e.g., backend names, translations)
    pub fn value<T: Display>(text: T) -> String {
        apply(text, Look::new().cyan())
    }

    /// Style for secondary/supplementary info (e.g., endpoints, paths)
    pub fn secondary<T: Display>(text: T) -> String {
        apply(text, Look::new().dimmed())
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        apply(text, Look::new().green())
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        apply(text, Look::new().red().bold())
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        apply(text, Look::new().yellow())
    }

    /// Style for the default marker
    pub fn default_marker() -> String {
        apply("(default)", Look::new().dimmed())
    }
}

/// Color names accepted by `--color` and `--on-color`.
pub const COLOR_NAMES: &[(&str, AnsiColors)] = &[
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("grey", AnsiColors::BrightBlack),
    ("light_red", AnsiColors::BrightRed),
    ("light_green", AnsiColors::BrightGreen),
    ("light_yellow", AnsiColors::BrightYellow),
    ("light_blue", AnsiColors::BrightBlue),
    ("light_magenta", AnsiColors::BrightMagenta),
    ("light_cyan", AnsiColors::BrightCyan),
];

/// Looks up a color by name (case-insensitive, `-` and `_` interchangeable).
pub fn parse_color(name: &str) -> Option<AnsiColors> {
    let name = name.trim().to_ascii_lowercase().replace('-', "_");
    let name = name.strip_prefix("on_").unwrap_or(&name);
    COLOR_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, color)| *color)
}

/// Colors used for watch notifications.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: AnsiColors,
    pub bg: Option<AnsiColors>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fg: AnsiColors::Green,
            bg: None,
        }
    }
}

impl Palette {
    /// Builds a palette from color names.
    ///
    /// # Errors
    ///
    /// Returns an error naming the valid colors if either name is unknown.
    pub fn parse(fg: Option<&str>, bg: Option<&str>) -> Result<Self> {
        let mut palette = Self::default();
        if let Some(name) = fg {
            palette.fg = lookup(name)?;
        }
        if let Some(name) = bg {
            palette.bg = Some(lookup(name)?);
        }
        Ok(palette)
    }

    /// Paints a notification in the palette colors, bold.
    pub fn paint<T: Display>(&self, text: T) -> String {
        if output::is_no_color() {
            return text.to_string();
        }
        match self.bg {
            Some(bg) => format!("{}", text.color(self.fg).on_color(bg).bold()),
            None => format!("{}", text.color(self.fg).bold()),
        }
    }
}

fn lookup(name: &str) -> Result<AnsiColors> {
    let Some(color) = parse_color(name) else {
        let valid: Vec<_> = COLOR_NAMES.iter().map(|(name, _)| *name).collect();
        bail!(
            "Unknown color: '{name}'\n\n\
             Valid colors: {}",
            valid.join(", ")
        );
    };
    Ok(color)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_names() {
        assert!(matches!(parse_color("green"), Some(AnsiColors::Green)));
        assert!(matches!(parse_color("Light-Blue"), Some(AnsiColors::BrightBlue)));
        assert!(matches!(parse_color("on_red"), Some(AnsiColors::Red)));
        assert!(parse_color("chartreuse").is_none());
    }

    #[test]
    fn test_palette_defaults_to_green() {
        let palette = Palette::parse(None, None).unwrap();
        assert!(matches!(palette.fg, AnsiColors::Green));
        assert!(palette.bg.is_none());
    }

    #[test]
    fn test_palette_rejects_unknown_color() {
        let err = Palette::parse(Some("chartreuse"), None).unwrap_err();
        assert!(err.to_string().contains("Unknown color"));
        assert!(err.to_string().contains("light_cyan"));
    }

    #[test]
    fn test_palette_paint_keeps_text() {
        let palette = Palette::parse(Some("cyan"), Some("black")).unwrap();
        assert!(palette.paint("waiting").contains("waiting"));
    }
}
