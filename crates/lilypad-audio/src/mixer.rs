//! Fixed-voice software mixer.
//!
//! Sounds are loaded once and referenced by [`SoundId`]. Each call to
//! [`Mixer::mix`] renders exactly [`AUDIO_FRAMES`] interleaved stereo
//! frames: the background voice loops, effect voices play once and free
//! their slot when they run out.

use lilypad_types::error::{LilypadError, Result};

use crate::wav::{Wav, WavLayout};

/// Stereo frames rendered per call.
pub const AUDIO_FRAMES: usize = 1024;

/// Concurrent one-shot effect voices.
pub const MAX_SFX_VOICES: usize = 8;

/// Volume that leaves samples unchanged.
pub const UNITY_VOLUME: u16 = 256;

/// Handle to a sound loaded into a [`Mixer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundId(usize);

/// A WAV file kept in memory together with its parsed layout.
#[derive(Debug)]
pub struct Sound {
    bytes: Vec<u8>,
    layout: WavLayout,
}

impl Sound {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let layout = WavLayout::scan(&bytes)?;
        Ok(Self { bytes, layout })
    }

    pub fn wav(&self) -> Wav<'_> {
        self.layout.view(&self.bytes)
    }
}

/// What happened to an effect trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfxOutcome {
    /// Playing on the given voice slot.
    Playing { voice: usize },
    /// All effect voices are busy; the trigger was dropped.
    VoiceUnavailable,
}

#[derive(Debug, Clone, Copy)]
struct Voice {
    sound: SoundId,
    cursor: usize,
    volume: u16,
    active: bool,
}

impl Voice {
    const IDLE: Self = Self {
        sound: SoundId(0),
        cursor: 0,
        volume: 0,
        active: false,
    };
}

/// One looping background voice plus [`MAX_SFX_VOICES`] effect voices.
#[derive(Debug)]
pub struct Mixer {
    sounds: Vec<Sound>,
    bgm: Voice,
    sfx: [Voice; MAX_SFX_VOICES],
    buffer: Vec<i16>,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            sounds: Vec::new(),
            bgm: Voice::IDLE,
            sfx: [Voice::IDLE; MAX_SFX_VOICES],
            buffer: vec![0; AUDIO_FRAMES * 2],
        }
    }

    /// Parse and keep a WAV file.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<SoundId> {
        let sound = Sound::from_bytes(bytes)?;
        let wav = sound.wav();
        log::debug!(
            "Loaded sound: {} Hz, {} ch, {}-bit, {} frames",
            wav.sample_rate,
            wav.channels,
            wav.bits_per_sample,
            wav.sample_count
        );
        self.sounds.push(sound);
        Ok(SoundId(self.sounds.len() - 1))
    }

    pub fn sound(&self, id: SoundId) -> Option<&Sound> {
        self.sounds.get(id.0)
    }

    /// Start (or restart) the looping background track.
    pub fn play_background(&mut self, id: SoundId, volume: u16) -> Result<()> {
        if self.sound(id).is_none() {
            return Err(LilypadError::Wav(format!("unknown sound {}", id.0)));
        }
        self.bgm = Voice {
            sound: id,
            cursor: 0,
            volume: volume.min(UNITY_VOLUME),
            active: true,
        };
        Ok(())
    }

    pub fn background_playing(&self) -> bool {
        self.bgm.active
    }

    /// Trigger a one-shot effect on the first free voice.
    pub fn play_sfx(&mut self, id: SoundId, volume: u16) -> SfxOutcome {
        if self.sound(id).is_none() {
            log::warn!("Ignoring trigger for unknown sound {}", id.0);
            return SfxOutcome::VoiceUnavailable;
        }
        match self.sfx.iter().position(|v| !v.active) {
            Some(slot) => {
                self.sfx[slot] = Voice {
                    sound: id,
                    cursor: 0,
                    volume: volume.min(UNITY_VOLUME),
                    active: true,
                };
                SfxOutcome::Playing { voice: slot }
            },
            None => {
                log::debug!("All {MAX_SFX_VOICES} effect voices busy, dropping trigger");
                SfxOutcome::VoiceUnavailable
            },
        }
    }

    /// Number of effect voices currently sounding.
    pub fn active_sfx(&self) -> usize {
        self.sfx.iter().filter(|v| v.active).count()
    }

    /// Render the next block. The returned slice holds
    /// `AUDIO_FRAMES * 2` interleaved left/right samples.
    pub fn mix(&mut self) -> &[i16] {
        let Self {
            sounds,
            bgm,
            sfx,
            buffer,
        } = self;

        for frame in buffer.chunks_exact_mut(2) {
            let mut left: i32 = 0;
            let mut right: i32 = 0;

            if bgm.active {
                if let Some(wav) = sounds.get(bgm.sound.0).map(Sound::wav) {
                    if wav.sample_count > 0 {
                        if bgm.cursor >= wav.sample_count {
                            bgm.cursor = 0;
                        }
                        let (l, r) = wav.frame(bgm.cursor);
                        bgm.cursor += 1;
                        left += scale(l, bgm.volume);
                        right += scale(r, bgm.volume);
                    }
                }
            }

            for voice in sfx.iter_mut().filter(|v| v.active) {
                let Some(wav) = sounds.get(voice.sound.0).map(Sound::wav) else {
                    voice.active = false;
                    continue;
                };
                if voice.cursor >= wav.sample_count {
                    voice.active = false;
                    continue;
                }
                let (l, r) = wav.frame(voice.cursor);
                voice.cursor += 1;
                if voice.cursor >= wav.sample_count {
                    voice.active = false;
                }
                left += scale(l, voice.volume);
                right += scale(r, voice.volume);
            }

            frame[0] = clamp16(left);
            frame[1] = clamp16(right);
        }

        buffer
    }
}

fn scale(sample: i16, volume: u16) -> i32 {
    (sample as i32 * volume as i32) >> 8
}

fn clamp16(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
