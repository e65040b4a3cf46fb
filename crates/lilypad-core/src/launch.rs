//! Hand-off to the external loader.
//!
//! The launcher never runs games itself. It writes a one-line record
//! `core;directory;stem` that the loader picks up once the menu exits.

use std::path::PathBuf;

use lilypad_types::error::{LilypadError, Result};
use serde::{Deserialize, Serialize};

/// Core and directory used for files in the tools folder.
pub const TOOLS_CORE: &str = "js2000";

/// Everything the loader needs to start a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    /// Console folder name, which doubles as the core selector.
    pub core: String,
    /// Folder holding the game, relative to the console root.
    pub directory: String,
    /// File name including extension.
    pub filename: String,
}

/// `Tetris.gb` -> `Tetris`. A leading dot is not an extension.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

impl LaunchRequest {
    pub fn new(
        core: impl Into<String>,
        directory: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            core: core.into(),
            directory: directory.into(),
            filename: filename.into(),
        }
    }

    /// Decompose an absolute ROM path.
    ///
    /// The root prefix is stripped, the first remaining segment is the
    /// core and everything up to the file name is the directory, so
    /// `/ROMS/gb/hacks/x.gb` gives `("gb", "gb/hacks", "x.gb")`. Paths
    /// outside the root are taken as already relative.
    pub fn from_rom_path(root: &str, path: &str) -> Option<Self> {
        let root = root.trim_end_matches('/');
        let relative = path
            .strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(path)
            .trim_start_matches('/');

        let (directory, filename) = relative.rsplit_once('/')?;
        if filename.is_empty() {
            return None;
        }
        let core = directory.split('/').next().unwrap_or(directory);
        Some(Self::new(core, directory, filename))
    }

    /// A file from the tools folder.
    pub fn tool(filename: impl Into<String>) -> Self {
        Self::new(TOOLS_CORE, TOOLS_CORE, filename)
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        strip_extension(&self.filename)
    }

    /// The record line understood by the loader.
    pub fn record_line(&self) -> String {
        format!("{};{};{}", self.core, self.directory, self.stem())
    }
}

/// Receives the game chosen by the user.
pub trait LaunchSink {
    fn launch(&mut self, request: &LaunchRequest) -> Result<()>;
}

/// Writes the launch record to a file on the host.
#[derive(Debug, Clone)]
pub struct RecordFileSink {
    path: PathBuf,
}

impl RecordFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LaunchSink for RecordFileSink {
    fn launch(&mut self, request: &LaunchRequest) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, request.record_line()).map_err(|e| {
            LilypadError::Launch(format!("{}: {e}", self.path.display()))
        })?;
        log::info!("Launch record written to {}", self.path.display());
        Ok(())
    }
}

/// Keeps launches in memory. Used when no loader is attached.
#[derive(Debug, Default)]
pub struct MemoryLaunchSink {
    pub launched: Vec<LaunchRequest>,
}

impl LaunchSink for MemoryLaunchSink {
    fn launch(&mut self, request: &LaunchRequest) -> Result<()> {
        self.launched.push(request.clone());
        Ok(())
    }
}
