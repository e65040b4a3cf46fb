//! Error types for lilypad.

use std::io;

/// Errors produced by the launcher.
///
/// None of these are fatal to the process: callers log them and fall back to
/// an empty or absent state.
#[derive(Debug, thiserror::Error)]
pub enum LilypadError {
    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("WAV error: {0}")]
    Wav(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("launch error: {0}")]
    Launch(String),

    #[error("capacity exceeded: {what} (max {max})")]
    Capacity { what: &'static str, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LilypadError>;
