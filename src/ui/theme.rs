//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents: two are built in (embedded with `include_str!`)
//! and users may point `theme_file` at their own. Colors are hex strings
//! turned into 24-bit ANSI sequences at render time.
//!
//! # Built-in Themes
//!
//! - `relief-dark`: dark background (default)
//! - `relief-light`: light background
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! tab_active_fg = "#0d1117"
//! tab_active_bg = "#58a6ff"
//! selection_fg = "#0d1117"
//! selection_bg = "#c9d1d9"
//! text_normal = "#e6edf3"
//! text_dim = "#7d8590"
//! border = "#30363d"
//! search_bar_border = "#58a6ff"
//! match_highlight_fg = "#0d1117"
//! match_highlight_bg = "#e3b341"
//! empty_state_fg = "#58a6ff"
//! emergency = "#f85149"
//! warning = "#f0883e"
//! info = "#58a6ff"
//! success = "#3fb950"
//! muted = "#8b949e"
//! ```
//!
//! # Example
//!
//! ```rust
//! use reliefboard::ui::theme::Theme;
//!
//! let theme = Theme::from_name("relief-light").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{ReliefError, Result};
use crate::ui::presentation::StyleClass;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "relief-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g. `"#e6edf3"`). Optional fields default to
/// `None`, letting a theme leave that element unstyled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active page tab foreground.
    pub tab_active_fg: String,
    /// Active page tab background.
    pub tab_active_bg: String,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Critical alerts.
    pub emergency: String,
    /// High severity.
    pub warning: String,
    /// Medium severity and informational rows.
    pub info: String,
    /// Low severity and verified records.
    pub success: String,
    /// Unverified records and secondary badges.
    pub muted: String,
}

impl ThemeColors {
    /// Hex color for a presentation style class.
    #[must_use]
    pub fn style_color(&self, style: StyleClass) -> &str {
        match style {
            StyleClass::Emergency => &self.emergency,
            StyleClass::Warning => &self.warning,
            StyleClass::Info => &self.info,
            StyleClass::Success => &self.success,
            StyleClass::Muted => &self.muted,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for names other than `relief-dark` and `relief-light`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reliefboard::ui::Theme;
    ///
    /// assert!(Theme::from_name("relief-light").is_some());
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "relief-dark" => include_str!("../../themes/relief-dark.toml"),
            "relief-light" => include_str!("../../themes/relief-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Parameters
    ///
    /// * `path` - Sandbox path of the file, already tilde-expanded
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Io`] if the file cannot be read and
    /// [`ReliefError::Theme`] if its contents are not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| ReliefError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple, falling back to white on
    /// malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color sequence (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Foreground sequence for a style class.
    ///
    /// # Parameters
    ///
    /// * `style` - Class chosen by the presentation layer, e.g. the
    ///   emergency color for critical alerts
    #[must_use]
    pub fn style_fg(&self, style: StyleClass) -> String {
        Self::fg(self.colors.style_color(style))
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `relief-dark` theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in relief-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_parse() {
        assert_eq!(Theme::default().name, "relief-dark");
        let light = Theme::from_name("relief-light").unwrap();
        assert_eq!(light.name, "relief-light");
        assert!(light.colors.header_bg.is_none());
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_style_color_mapping() {
        let theme = Theme::default();
        assert_eq!(theme.colors.style_color(StyleClass::Emergency), "#f85149");
        assert_eq!(theme.colors.style_color(StyleClass::Success), "#3fb950");
        assert_eq!(theme.style_fg(StyleClass::Info), "\u{1b}[38;2;88;166;255m");
    }

    #[test]
    fn test_hex_conversion() {
        assert_eq!(Theme::fg("#ff0000"), "\u{1b}[38;2;255;0;0m");
        assert_eq!(Theme::bg("00ff00"), "\u{1b}[48;2;0;255;0m");
        assert_eq!(Theme::fg("#abc"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(include_str!("../../themes/relief-light.toml").as_bytes())
            .unwrap();
        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme, Theme::from_name("relief-light").unwrap());

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        broken.write_all(b"name = \"half\"").unwrap();
        assert!(matches!(
            Theme::from_file(broken.path()),
            Err(ReliefError::Theme(_))
        ));
        assert!(matches!(
            Theme::from_file("/nonexistent/theme.toml"),
            Err(ReliefError::Io(_))
        ));
    }
}
