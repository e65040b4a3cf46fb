//! Minimal RIFF/WAVE reader.
//!
//! Only uncompressed PCM is accepted: 8-bit unsigned or 16-bit signed
//! little-endian, mono or stereo. Chunks are walked linearly so `fmt ` and
//! `data` may appear in either order, with any unknown chunks in between.

use std::ops::Range;

use lilypad_types::error::{LilypadError, Result};

/// Smallest buffer that can hold a RIFF header, a `fmt ` chunk and a
/// `data` chunk header.
pub const MIN_WAV_LEN: usize = 44;

const FORMAT_PCM: u16 = 1;

/// Where the samples are and how to read them. Independent of the buffer,
/// so an owner can keep the bytes and the layout side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavLayout {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Number of frames (one sample per channel).
    pub sample_count: usize,
    pub data: Range<usize>,
}

/// A decoded view over a loaded WAV file.
#[derive(Debug, Clone, Copy)]
pub struct Wav<'a> {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_count: usize,
    pub data: &'a [u8],
}

fn le_u16(buf: &[u8], off: usize) -> Option<u16> {
    let b = buf.get(off..off + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

fn le_u32(buf: &[u8], off: usize) -> Option<u32> {
    let b = buf.get(off..off + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

struct Format {
    tag: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

impl WavLayout {
    /// Validate `buf` and locate its sample data.
    pub fn scan(buf: &[u8]) -> Result<Self> {
        if buf.len() < MIN_WAV_LEN {
            return Err(LilypadError::Wav(format!(
                "{} bytes is too short for a WAV file",
                buf.len()
            )));
        }
        if &buf[0..4] != b"RIFF" || &buf[8..12] != b"WAVE" {
            return Err(LilypadError::Wav("missing RIFF/WAVE header".into()));
        }

        let mut format = None;
        let mut data = None;
        let mut pos = 12;
        while pos + 8 <= buf.len() && (format.is_none() || data.is_none()) {
            let id = &buf[pos..pos + 4];
            let size = le_u32(buf, pos + 4).unwrap_or(0) as usize;
            let body = pos + 8;
            match id {
                b"fmt " => {
                    if size < 16 || body + 16 > buf.len() {
                        return Err(LilypadError::Wav("truncated fmt chunk".into()));
                    }
                    format = Some(Format {
                        tag: le_u16(buf, body).unwrap_or(0),
                        channels: le_u16(buf, body + 2).unwrap_or(0),
                        sample_rate: le_u32(buf, body + 4).unwrap_or(0),
                        bits_per_sample: le_u16(buf, body + 14).unwrap_or(0),
                    });
                },
                b"data" => {
                    // A header that overstates the size is clamped to what
                    // was actually read.
                    let end = body.saturating_add(size).min(buf.len());
                    data = Some(body..end);
                },
                _ => {},
            }
            pos = body.saturating_add(size).saturating_add(size & 1);
        }

        let format = format.ok_or_else(|| LilypadError::Wav("missing fmt chunk".into()))?;
        let data = data.ok_or_else(|| LilypadError::Wav("missing data chunk".into()))?;

        if format.tag != FORMAT_PCM {
            return Err(LilypadError::Wav(format!(
                "unsupported format tag {}",
                format.tag
            )));
        }
        if !matches!(format.channels, 1 | 2) {
            return Err(LilypadError::Wav(format!(
                "unsupported channel count {}",
                format.channels
            )));
        }
        if !matches!(format.bits_per_sample, 8 | 16) {
            return Err(LilypadError::Wav(format!(
                "unsupported bit depth {}",
                format.bits_per_sample
            )));
        }

        let frame_bytes = format.channels as usize * (format.bits_per_sample as usize / 8);
        let sample_count = data.len() / frame_bytes;
        Ok(Self {
            sample_rate: format.sample_rate,
            channels: format.channels,
            bits_per_sample: format.bits_per_sample,
            sample_count,
            data,
        })
    }

    /// Borrow the sample data out of the buffer this layout was scanned from.
    pub fn view<'a>(&self, buf: &'a [u8]) -> Wav<'a> {
        let data = buf.get(self.data.clone()).unwrap_or(&[]);
        Wav {
            sample_rate: self.sample_rate,
            channels: self.channels,
            bits_per_sample: self.bits_per_sample,
            sample_count: self.sample_count,
            data,
        }
    }
}

impl<'a> Wav<'a> {
    /// Parse a WAV file held in memory.
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        Ok(WavLayout::scan(buf)?.view(buf))
    }

    /// Frame `index` as a 16-bit stereo pair. Mono is duplicated to both
    /// sides; 8-bit samples lose their 128 bias and are scaled up.
    pub fn frame(&self, index: usize) -> (i16, i16) {
        if index >= self.sample_count {
            return (0, 0);
        }
        let channels = self.channels as usize;
        let (left, right) = match self.bits_per_sample {
            16 => {
                let base = index * channels * 2;
                let l = self.pcm16(base);
                let r = if channels == 2 { self.pcm16(base + 2) } else { l };
                (l, r)
            },
            _ => {
                let base = index * channels;
                let l = self.pcm8(base);
                let r = if channels == 2 { self.pcm8(base + 1) } else { l };
                (l, r)
            },
        };
        (left, right)
    }

    fn pcm16(&self, off: usize) -> i16 {
        le_u16(self.data, off).map(|v| v as i16).unwrap_or(0)
    }

    fn pcm8(&self, off: usize) -> i16 {
        self.data
            .get(off)
            .map(|&b| (b as i16 - 128) << 8)
            .unwrap_or(0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a canonical 44-byte-header WAV around `data`.
    pub(crate) fn build_wav(channels: u16, bits: u16, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        buf.extend_from_slice(&fmt_chunk(FORMAT_PCM, channels, bits));
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
        buf.extend_from_slice(data);
        buf
    }

    fn fmt_chunk(tag: u16, channels: u16, bits: u16) -> Vec<u8> {
        let rate = 44_100u32;
        let block_align = channels * bits / 8;
        let mut chunk = Vec::new();
        chunk.extend_from_slice(b"fmt ");
        chunk.extend_from_slice(&16u32.to_le_bytes());
        chunk.extend_from_slice(&tag.to_le_bytes());
        chunk.extend_from_slice(&channels.to_le_bytes());
        chunk.extend_from_slice(&rate.to_le_bytes());
        chunk.extend_from_slice(&(rate * block_align as u32).to_le_bytes());
        chunk.extend_from_slice(&block_align.to_le_bytes());
        chunk.extend_from_slice(&bits.to_le_bytes());
        chunk
    }

    pub(crate) fn samples16(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn short_buffer_rejected() {
        let err = Wav::parse(&[0u8; 43]).unwrap_err();
        assert!(format!("{err}").contains("too short"));
    }

    #[test]
    fn wrong_magic_rejected() {
        let mut buf = build_wav(1, 16, &[0; 8]);
        buf[8..12].copy_from_slice(b"AVI ");
        assert!(Wav::parse(&buf).is_err());
    }

    #[test]
    fn non_pcm_rejected() {
        let mut buf = build_wav(1, 16, &[0; 8]);
        // Format tag lives right after the fmt chunk header.
        buf[20..22].copy_from_slice(&3u16.to_le_bytes());
        let err = Wav::parse(&buf).unwrap_err();
        assert!(format!("{err}").contains("format tag 3"));
    }

    #[test]
    fn unsupported_depth_rejected() {
        let buf = build_wav(1, 24, &[0; 12]);
        assert!(Wav::parse(&buf).is_err());
    }

    #[test]
    fn mono_16_bit_count() {
        let buf = build_wav(1, 16, &samples16(&[1, 2, 3, 4, 5]));
        let wav = Wav::parse(&buf).unwrap();
        assert_eq!(wav.sample_count, 5);
        assert_eq!(wav.sample_rate, 44_100);
        assert_eq!(wav.frame(2), (3, 3));
        assert_eq!(wav.frame(5), (0, 0));
    }

    #[test]
    fn stereo_16_bit_frames() {
        let buf = build_wav(2, 16, &samples16(&[10, -10, 20, -20]));
        let wav = Wav::parse(&buf).unwrap();
        assert_eq!(wav.sample_count, 2);
        assert_eq!(wav.frame(1), (20, -20));
    }

    #[test]
    fn eight_bit_is_unbiased() {
        let buf = build_wav(1, 8, &[128, 255, 0]);
        let wav = Wav::parse(&buf).unwrap();
        assert_eq!(wav.sample_count, 3);
        assert_eq!(wav.frame(0), (0, 0));
        assert_eq!(wav.frame(1), (127 << 8, 127 << 8));
        assert_eq!(wav.frame(2), (-128 << 8, -128 << 8));
    }

    #[test]
    fn fmt_after_data_and_padded_chunks() {
        let data = samples16(&[7, 8, 9]);
        let mut buf = Vec::new();
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        // Odd-sized unknown chunk followed by its pad byte.
        buf.extend_from_slice(b"LIST");
        buf.extend_from_slice(&3u32.to_le_bytes());
        buf.extend_from_slice(&[1, 2, 3, 0]);
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
        buf.extend_from_slice(&data);
        buf.extend_from_slice(&fmt_chunk(FORMAT_PCM, 1, 16));

        let wav = Wav::parse(&buf).unwrap();
        assert_eq!(wav.sample_count, 3);
        assert_eq!(wav.frame(2), (9, 9));
    }

    #[test]
    fn overlong_data_chunk_clamped() {
        let mut buf = build_wav(1, 16, &samples16(&[1, 2, 3, 4]));
        // Claim 1000 bytes of data; only 8 follow.
        buf[40..44].copy_from_slice(&1000u32.to_le_bytes());
        let wav = Wav::parse(&buf).unwrap();
        assert_eq!(wav.sample_count, 4);
    }

    #[test]
    fn missing_data_chunk() {
        let mut buf = build_wav(1, 16, &[0; 8]);
        buf[36..40].copy_from_slice(b"junk");
        let err = Wav::parse(&buf).unwrap_err();
        assert!(format!("{err}").contains("missing data"));
    }

    #[test]
    fn layout_view_matches_parse() {
        let buf = build_wav(2, 8, &[0, 255, 128, 128]);
        let layout = WavLayout::scan(&buf).unwrap();
        assert_eq!(layout.data, 44..48);
        let wav = layout.view(&buf);
        assert_eq!(wav.sample_count, 2);
        assert_eq!(wav.frame(0), (-128 << 8, 127 << 8));
    }
}
