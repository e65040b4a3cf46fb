//! Software rendering into a 320x240 RGB565 frame buffer.

mod font;
mod screens;

pub use font::{BlockFont, FONT_NAMES, TextRenderer, font_by_name};
pub use screens::{LegendMode, Painter, RowView};

use lilypad_types::color::Rgb565;

use crate::thumbnail::Thumbnail;

pub const SCREEN_W: u32 = 320;
pub const SCREEN_H: u32 = 240;

/// The frame handed to the host each frame.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: Vec<u16>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; (SCREEN_W * SCREEN_H) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        SCREEN_W
    }

    pub fn height(&self) -> u32 {
        SCREEN_H
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        (x < SCREEN_W && y < SCREEN_H).then(|| Rgb565(self.pixels[(y * SCREEN_W + x) as usize]))
    }

    pub fn clear(&mut self, color: Rgb565) {
        self.pixels.fill(color.0);
    }

    /// Fill a rectangle, clipped to the screen.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x + w as i32).clamp(0, SCREEN_W as i32) as u32;
        let y1 = (y + h as i32).clamp(0, SCREEN_H as i32) as u32;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let start = (row * SCREEN_W + x0) as usize;
            let end = (row * SCREEN_W + x1) as usize;
            self.pixels[start..end].fill(color.0);
        }
    }

    /// Fill a rectangle with corners rounded to `radius`.
    pub fn fill_rounded_rect(&mut self, x: i32, y: i32, w: u32, h: u32, radius: u32, color: Rgb565) {
        let r = radius.min(w / 2).min(h / 2) as i32;
        if r == 0 {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        let (w, h) = (w as i32, h as i32);
        for dy in 0..h {
            // Horizontal inset of this row from the corner circles.
            let cy = if dy < r {
                r - dy
            } else if dy >= h - r {
                dy - (h - r - 1)
            } else {
                0
            };
            let mut inset = 0;
            if cy > 0 {
                while inset < r {
                    let cx = r - inset;
                    if cx * cx + cy * cy <= r * r {
                        break;
                    }
                    inset += 1;
                }
            }
            self.fill_rect(x + inset, y + dy, (w - 2 * inset).max(0) as u32, 1, color);
        }
    }

    /// Copy a decoded image with its top-left corner at `(x, y)`, clipped.
    pub fn blit(&mut self, image: &Thumbnail, x: i32, y: i32) {
        let (x, y) = (i64::from(x), i64::from(y));
        let (w, h) = (i64::from(image.width), i64::from(image.height));
        // Visible part of the image, in image coordinates.
        let col0 = (-x).clamp(0, w);
        let col1 = (i64::from(SCREEN_W) - x).clamp(col0, w);
        let row0 = (-y).clamp(0, h);
        let row1 = (i64::from(SCREEN_H) - y).clamp(row0, h);
        if col0 == col1 || row0 == row1 {
            return;
        }
        let span = (col1 - col0) as usize;
        for row in row0..row1 {
            let src = (row * w + col0) as usize;
            let Some(line) = image.pixels.get(src..src + span) else {
                return;
            };
            let dst = ((y + row) * i64::from(SCREEN_W) + x + col0) as usize;
            self.pixels[dst..dst + span].copy_from_slice(line);
        }
    }

    /// Expand to 8-bit RGBA, e.g. for saving a screenshot.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &px in &self.pixels {
            let (r, g, b) = Rgb565(px).to_rgb8();
            out.extend_from_slice(&[r, g, b, 255]);
        }
        out
    }
}
