//! Launcher configuration.
//!
//! Static settings come from an optional TOML file; the host's key/value
//! settings query can override a subset of them at runtime through
//! [`LauncherConfig::apply_variable`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Host settings key for the colour theme name.
pub const KEY_THEME: &str = "lilypad_theme";
/// Host settings key for the font name.
pub const KEY_FONT: &str = "lilypad_font";
/// Host settings key for "launch the most recent game at boot".
pub const KEY_RESUME_ON_BOOT: &str = "lilypad_resume_on_boot";
/// Host settings key for hiding empty console folders at the root.
pub const KEY_HIDE_EMPTY: &str = "lilypad_hide_empty";

/// Built-in colour theme names.
pub const THEME_NAMES: [&str; 3] = ["default", "dusk", "mono"];
/// Built-in font names.
pub const FONT_NAMES: [&str; 2] = ["default", "wide"];

/// Every host settings key the launcher understands.
pub const HOST_KEYS: [&str; 4] = [KEY_THEME, KEY_FONT, KEY_RESUME_ON_BOOT, KEY_HIDE_EMPTY];

/// Top-level launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Root folder holding one sub-folder per console.
    pub roms_root: String,
    /// Side file listing empty console folders, one per line.
    pub empty_cache_file: String,
    /// Looping background track.
    pub music_path: String,
    /// One-shot effect played on d-pad releases.
    pub nav_sfx_path: String,
    /// Where the launch record for the external loader is written.
    pub launch_record_path: String,
    /// Background volume, 0-256 (256 is unity gain).
    pub music_volume: u16,
    /// Effect volume, 0-256.
    pub sfx_volume: u16,
    pub hide_empty_folders: bool,
    pub resume_on_boot: bool,
    pub theme: String,
    pub font: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            roms_root: "/mnt/sda1/ROMS".to_string(),
            empty_cache_file: "/mnt/sda1/configs/lilypad_empty_dirs.cache".to_string(),
            music_path: "/mnt/sda1/lilypad/menu_music.wav".to_string(),
            nav_sfx_path: "/mnt/sda1/lilypad/navigation.wav".to_string(),
            launch_record_path: "/mnt/sda1/lilypad/launch.txt".to_string(),
            music_volume: 128,
            sfx_volume: 128,
            hide_empty_folders: true,
            resume_on_boot: false,
            theme: "default".to_string(),
            font: "default".to_string(),
        }
    }
}

impl LauncherConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a file, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Apply one host key/value setting.
    ///
    /// Returns `true` if the value was recognised and applied. Unknown keys
    /// and unrecognised values leave the configuration untouched.
    pub fn apply_variable(&mut self, key: &str, value: &str) -> bool {
        match key {
            KEY_THEME => match known_name(&THEME_NAMES, value) {
                Some(name) => {
                    self.theme = name.to_string();
                    true
                },
                None => false,
            },
            KEY_FONT => match known_name(&FONT_NAMES, value) {
                Some(name) => {
                    self.font = name.to_string();
                    true
                },
                None => false,
            },
            KEY_RESUME_ON_BOOT => match parse_flag(value) {
                Some(flag) => {
                    self.resume_on_boot = flag;
                    true
                },
                None => false,
            },
            KEY_HIDE_EMPTY => match parse_flag(value) {
                Some(flag) => {
                    self.hide_empty_folders = flag;
                    true
                },
                None => false,
            },
            _ => false,
        }
    }
}

/// Canonical spelling of `value` if it names one of `names`, ignoring case.
fn known_name(names: &[&'static str], value: &str) -> Option<&'static str> {
    names.iter().copied().find(|name| name.eq_ignore_ascii_case(value))
}

/// Only the exact strings `"true"` and `"false"` are accepted.
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hide_empty_folders() {
        let cfg = LauncherConfig::default();
        assert!(cfg.hide_empty_folders);
        assert!(!cfg.resume_on_boot);
        assert_eq!(cfg.music_volume, 128);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = LauncherConfig::from_toml("roms_root = \"/tmp/roms\"\nsfx_volume = 256\n").unwrap();
        assert_eq!(cfg.roms_root, "/tmp/roms");
        assert_eq!(cfg.sfx_volume, 256);
        assert_eq!(cfg.music_volume, 128);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(LauncherConfig::from_toml("roms_root = [").is_err());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = LauncherConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, LauncherConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lilypad.toml");
        std::fs::write(&path, "theme = \"dusk\"\nresume_on_boot = true\n").unwrap();
        let cfg = LauncherConfig::load(&path).unwrap();
        assert_eq!(cfg.theme, "dusk");
        assert!(cfg.resume_on_boot);
    }

    #[test]
    fn apply_flags() {
        let mut cfg = LauncherConfig::default();
        assert!(cfg.apply_variable(KEY_HIDE_EMPTY, "false"));
        assert!(!cfg.hide_empty_folders);
        assert!(cfg.apply_variable(KEY_RESUME_ON_BOOT, "true"));
        assert!(cfg.resume_on_boot);
    }

    #[test]
    fn unrecognised_values_keep_prior() {
        let mut cfg = LauncherConfig::default();
        assert!(!cfg.apply_variable(KEY_HIDE_EMPTY, "yes"));
        assert!(cfg.hide_empty_folders);
        assert!(!cfg.apply_variable(KEY_THEME, ""));
        assert_eq!(cfg.theme, "default");
        assert!(!cfg.apply_variable("unknown_key", "true"));
    }

    #[test]
    fn apply_theme_and_font() {
        let mut cfg = LauncherConfig::default();
        assert!(cfg.apply_variable(KEY_THEME, "dusk"));
        assert!(cfg.apply_variable(KEY_FONT, "wide"));
        assert_eq!(cfg.theme, "dusk");
        assert_eq!(cfg.font, "wide");
        assert!(cfg.apply_variable(KEY_THEME, "MONO"));
        assert_eq!(cfg.theme, "mono");
    }

    #[test]
    fn unknown_theme_and_font_keep_prior() {
        let mut cfg = LauncherConfig::default();
        assert!(cfg.apply_variable(KEY_THEME, "dusk"));
        assert!(!cfg.apply_variable(KEY_THEME, "bogus"));
        assert_eq!(cfg.theme, "dusk");
        assert!(!cfg.apply_variable(KEY_FONT, "comic"));
        assert_eq!(cfg.font, "default");
    }
}
