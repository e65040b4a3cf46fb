//! Colour themes.
//!
//! Theme storage belongs to the host; the launcher only knows a few
//! built-in palettes and looks them up by name.

use lilypad_types::color::Rgb565;
pub use lilypad_types::config::THEME_NAMES;

/// Palette used by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb565,
    pub text: Rgb565,
    /// Titles and section headers.
    pub header: Rgb565,
    /// Pill behind the selected row.
    pub select_bg: Rgb565,
    pub select_text: Rgb565,
    pub legend: Rgb565,
    pub legend_bg: Rgb565,
    /// Marker drawn next to favourite games.
    pub favorite: Rgb565,
}

impl Theme {
    pub const DEFAULT: Self = Self {
        background: Rgb565::rgb(16, 40, 24),
        text: Rgb565::rgb(230, 240, 230),
        header: Rgb565::rgb(140, 220, 120),
        select_bg: Rgb565::rgb(140, 220, 120),
        select_text: Rgb565::rgb(16, 40, 24),
        legend: Rgb565::rgb(230, 240, 230),
        legend_bg: Rgb565::rgb(40, 80, 48),
        favorite: Rgb565::rgb(250, 200, 60),
    };

    pub const DUSK: Self = Self {
        background: Rgb565::rgb(28, 20, 48),
        text: Rgb565::rgb(236, 228, 250),
        header: Rgb565::rgb(250, 150, 120),
        select_bg: Rgb565::rgb(250, 150, 120),
        select_text: Rgb565::rgb(28, 20, 48),
        legend: Rgb565::rgb(236, 228, 250),
        legend_bg: Rgb565::rgb(64, 48, 96),
        favorite: Rgb565::rgb(255, 220, 90),
    };

    pub const MONO: Self = Self {
        background: Rgb565::BLACK,
        text: Rgb565::WHITE,
        header: Rgb565::WHITE,
        select_bg: Rgb565::WHITE,
        select_text: Rgb565::BLACK,
        legend: Rgb565::BLACK,
        legend_bg: Rgb565::rgb(170, 170, 170),
        favorite: Rgb565::WHITE,
    };

    /// Look up a built-in theme. Unknown names fall back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "default" => Self::DEFAULT,
            "dusk" => Self::DUSK,
            "mono" => Self::MONO,
            other => {
                log::warn!("Unknown theme '{other}', using default");
                Self::DEFAULT
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}
