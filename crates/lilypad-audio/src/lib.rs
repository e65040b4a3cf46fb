//! Menu audio: a minimal WAV decoder and a software mixer.
//!
//! One looping background voice plus a small pool of one-shot effect
//! voices, mixed into a fixed-size interleaved stereo block once per frame.

pub mod mixer;
pub mod wav;

pub use mixer::{AUDIO_FRAMES, MAX_SFX_VOICES, Mixer, SfxOutcome, Sound, SoundId, UNITY_VOLUME};
pub use wav::{Wav, WavLayout};
