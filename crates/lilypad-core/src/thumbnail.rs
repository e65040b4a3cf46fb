//! Preview image for the selected game.
//!
//! Only one image is held at a time. It is keyed by the thumbnail path and
//! replaced when the selection moves to a different game.

use lilypad_types::color::Rgb565;
use lilypad_types::error::{LilypadError, Result};
use lilypad_vfs::{Vfs, basename, dirname, join};

use crate::launch::strip_extension;

/// Folder next to the games that holds their previews.
pub const THUMBS_FOLDER: &str = ".thumbs";

/// A decoded image in the frame buffer's pixel format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` pixels.
    pub pixels: Vec<u16>,
}

/// `<dir>/<stem>.<ext>` -> `<dir>/.thumbs/<stem>.png`.
pub fn thumbnail_path(rom_path: &str) -> String {
    let stem = strip_extension(basename(rom_path));
    let dir = dirname(rom_path).unwrap_or("/");
    join(&join(dir, THUMBS_FOLDER), &format!("{stem}.png"))
}

/// Turns encoded image bytes into a [`Thumbnail`].
pub trait ImageLoader {
    fn decode(&self, bytes: &[u8]) -> Result<Thumbnail>;
}

/// Decodes PNG files of any colour type and bit depth.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngLoader;

impl ImageLoader for PngLoader {
    fn decode(&self, bytes: &[u8]) -> Result<Thumbnail> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| LilypadError::Image(e.to_string()))?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e| LilypadError::Image(e.to_string()))?;

        let channels = match info.color_type {
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            png::ColorType::Indexed => {
                return Err(LilypadError::Image("palette was not expanded".into()));
            },
        };

        let mut pixels = Vec::with_capacity((info.width * info.height) as usize);
        for row in buf[..info.buffer_size()].chunks(info.line_size) {
            for px in row.chunks_exact(channels).take(info.width as usize) {
                let color = if channels < 3 {
                    Rgb565::rgb(px[0], px[0], px[0])
                } else {
                    Rgb565::rgb(px[0], px[1], px[2])
                };
                pixels.push(color.0);
            }
        }

        Ok(Thumbnail {
            width: info.width,
            height: info.height,
            pixels,
        })
    }
}

/// Holds at most one decoded preview plus the path it came from.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    current: Option<(String, Thumbnail)>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&Thumbnail> {
        self.current.as_ref().map(|(_, t)| t)
    }

    /// Path of the held image, `None` when nothing is held.
    pub fn path(&self) -> Option<&str> {
        self.current.as_ref().map(|(p, _)| p.as_str())
    }

    pub fn release(&mut self) {
        self.current = None;
    }

    /// Make the cache hold the preview for `rom_path`.
    ///
    /// Nothing happens when that preview is already held. Otherwise the old
    /// image is dropped before the new one is read, so a missing or broken
    /// file leaves the cache empty. `None` just releases.
    pub fn ensure_current(&mut self, vfs: &dyn Vfs, loader: &dyn ImageLoader, rom_path: Option<&str>) {
        let Some(rom_path) = rom_path else {
            self.release();
            return;
        };
        let thumb = thumbnail_path(rom_path);
        if self.path() == Some(thumb.as_str()) {
            return;
        }
        self.release();

        let bytes = match vfs.read(&thumb) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("No thumbnail at {thumb}: {e}");
                return;
            },
        };
        match loader.decode(&bytes) {
            Ok(image) => self.current = Some((thumb, image)),
            Err(e) => log::warn!("Cannot decode {thumb}: {e}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lilypad_vfs::MemoryVfs;
    use std::cell::Cell;

    /// Encode a solid-colour RGB PNG.
    pub(crate) fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            let data: Vec<u8> = (0..width * height).flat_map(|_| rgb).collect();
            writer.write_image_data(&data).unwrap();
        }
        out
    }

    struct CountingLoader {
        calls: Cell<usize>,
    }

    impl ImageLoader for CountingLoader {
        fn decode(&self, bytes: &[u8]) -> Result<Thumbnail> {
            self.calls.set(self.calls.get() + 1);
            PngLoader.decode(bytes)
        }
    }

    #[test]
    fn path_derivation() {
        assert_eq!(thumbnail_path("/ROMS/gb/Tetris.gb"), "/ROMS/gb/.thumbs/Tetris.png");
        assert_eq!(
            thumbnail_path("/ROMS/snes/Super Mario World.v1.1.sfc"),
            "/ROMS/snes/.thumbs/Super Mario World.v1.1.png"
        );
        assert_eq!(thumbnail_path("/ROMS/gb/README"), "/ROMS/gb/.thumbs/README.png");
    }

    #[test]
    fn png_decodes_to_rgb565() {
        let img = PngLoader.decode(&solid_png(3, 2, [255, 0, 0])).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixels.len(), 6);
        assert!(img.pixels.iter().all(|&p| p == 0xF800));
    }

    #[test]
    fn garbage_is_an_image_error() {
        let err = PngLoader.decode(b"not a png at all").unwrap_err();
        assert!(matches!(err, LilypadError::Image(_)));
    }

    #[test]
    fn same_path_is_not_reloaded() {
        let mut vfs = MemoryVfs::new();
        vfs.add_file("/ROMS/gb/.thumbs/Tetris.png", &solid_png(2, 2, [0, 0, 255]))
            .unwrap();
        let loader = CountingLoader { calls: Cell::new(0) };
        let mut cache = ThumbnailCache::new();

        cache.ensure_current(&vfs, &loader, Some("/ROMS/gb/Tetris.gb"));
        cache.ensure_current(&vfs, &loader, Some("/ROMS/gb/Tetris.gb"));
        assert_eq!(loader.calls.get(), 1);
        assert_eq!(cache.path(), Some("/ROMS/gb/.thumbs/Tetris.png"));
        assert_eq!(cache.image().map(|i| i.pixels[0]), Some(0x001F));
    }

    #[test]
    fn missing_preview_releases_previous() {
        let mut vfs = MemoryVfs::new();
        vfs.add_file("/ROMS/gb/.thumbs/Tetris.png", &solid_png(1, 1, [0, 0, 0]))
            .unwrap();
        let mut cache = ThumbnailCache::new();
        cache.ensure_current(&vfs, &PngLoader, Some("/ROMS/gb/Tetris.gb"));
        assert!(cache.image().is_some());

        cache.ensure_current(&vfs, &PngLoader, Some("/ROMS/gb/Zelda.gb"));
        assert!(cache.image().is_none());
        assert_eq!(cache.path(), None);
    }

    #[test]
    fn broken_preview_leaves_cache_empty() {
        let mut vfs = MemoryVfs::new();
        vfs.add_file("/ROMS/gb/.thumbs/Bad.png", b"\x89PNG broken").unwrap();
        let mut cache = ThumbnailCache::new();
        cache.ensure_current(&vfs, &PngLoader, Some("/ROMS/gb/Bad.gb"));
        assert!(cache.image().is_none());
    }

    #[test]
    fn no_source_releases() {
        let mut vfs = MemoryVfs::new();
        vfs.add_file("/ROMS/gb/.thumbs/Tetris.png", &solid_png(1, 1, [9, 9, 9]))
            .unwrap();
        let mut cache = ThumbnailCache::new();
        cache.ensure_current(&vfs, &PngLoader, Some("/ROMS/gb/Tetris.gb"));
        cache.ensure_current(&vfs, &PngLoader, None);
        assert!(cache.image().is_none());
    }
}
