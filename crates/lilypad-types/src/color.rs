//! 16-bit RGB565 colour, the native pixel format of the frame buffer.

/// A packed RGB565 colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Pack 8-bit channels, dropping the low bits.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3))
    }

    /// Expand back to 8-bit channels (low bits replicated from the high bits).
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        let r5 = ((self.0 >> 11) & 0x1F) as u8;
        let g6 = ((self.0 >> 5) & 0x3F) as u8;
        let b5 = (self.0 & 0x1F) as u8;
        ((r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2))
    }

    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
}
