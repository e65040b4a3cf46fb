//! Text drawing boundary.
//!
//! Real glyph rendering is supplied by the host build; [`BlockFont`] is a
//! fixed-pitch stand-in that draws one solid cell per visible character.
//! It keeps layout and screenshots meaningful without shipping glyph data.

use lilypad_types::color::Rgb565;
pub use lilypad_types::config::FONT_NAMES;

use super::Framebuffer;

pub trait TextRenderer {
    /// Height of one line of text in pixels.
    fn line_height(&self) -> u32;

    /// Width of `text` in pixels.
    fn measure(&self, text: &str) -> u32;

    fn draw(&self, fb: &mut Framebuffer, x: i32, y: i32, text: &str, color: Rgb565);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFont {
    advance: u32,
    height: u32,
}

impl BlockFont {
    pub const fn new(advance: u32, height: u32) -> Self {
        Self { advance, height }
    }
}

impl Default for BlockFont {
    fn default() -> Self {
        Self::new(8, 12)
    }
}

impl TextRenderer for BlockFont {
    fn line_height(&self) -> u32 {
        self.height
    }

    fn measure(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.advance
    }

    fn draw(&self, fb: &mut Framebuffer, x: i32, y: i32, text: &str, color: Rgb565) {
        let glyph_w = self.advance.saturating_sub(2).max(1);
        let glyph_h = self.height.saturating_sub(3).max(1);
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let gx = x + (i as u32 * self.advance) as i32 + 1;
            fb.fill_rect(gx, y + 1, glyph_w, glyph_h, color);
        }
    }
}

/// Font for a configured name. Unknown names fall back to the default.
pub fn font_by_name(name: &str) -> BlockFont {
    match name.to_ascii_lowercase().as_str() {
        "default" => BlockFont::default(),
        "wide" => BlockFont::new(10, 12),
        other => {
            log::warn!("Unknown font '{other}', using default");
            BlockFont::default()
        },
    }
}
