//! Interfaces to the stores and editors that live outside the launcher.
//!
//! The recent-games and favourites lists, and the options editor, are owned
//! by the host. Only their boundaries are defined here, plus simple
//! in-memory versions used by tests and the desktop runner.

use lilypad_types::config::{KEY_FONT, KEY_HIDE_EMPTY, KEY_RESUME_ON_BOOT, KEY_THEME, LauncherConfig};
use lilypad_types::input::Button;
use lilypad_vfs::join;
use serde::{Deserialize, Serialize};

use crate::launch::{LaunchRequest, strip_extension};

/// A game remembered by one of the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub core: String,
    /// Folder relative to the console root, e.g. `gb/hacks`.
    pub directory: String,
    pub filename: String,
    pub display_name: String,
}

impl GameRecord {
    pub fn new(
        core: impl Into<String>,
        directory: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        let display_name = strip_extension(&filename).to_string();
        Self {
            core: core.into(),
            directory: directory.into(),
            filename,
            display_name,
        }
    }

    pub fn from_request(request: &LaunchRequest) -> Self {
        Self::new(&request.core, &request.directory, &request.filename)
    }

    /// Absolute path of the ROM under `root`.
    pub fn rom_path(&self, root: &str) -> String {
        join(&join(root, &self.directory), &self.filename)
    }

    pub fn launch_request(&self) -> LaunchRequest {
        LaunchRequest::new(&self.core, &self.directory, &self.filename)
    }

    fn same_game(&self, other: &GameRecord) -> bool {
        self.core == other.core && self.directory == other.directory && self.filename == other.filename
    }
}

/// Most-recent-first history of launched games.
pub trait RecentGames {
    fn list(&self) -> &[GameRecord];
    /// Move `record` to the front, inserting it if new.
    fn add(&mut self, record: GameRecord);
}

/// User-curated list of games.
pub trait Favorites {
    fn list(&self) -> &[GameRecord];
    fn is_favorite(&self, directory: &str, filename: &str) -> bool;
    /// Add or remove `record`. Returns whether it is now a favourite.
    fn toggle(&mut self, record: GameRecord) -> bool;
    fn remove(&mut self, index: usize) -> Option<GameRecord>;
}

/// Default number of games kept in the history.
pub const RECENT_LIMIT: usize = 30;

#[derive(Debug)]
pub struct MemoryRecentGames {
    records: Vec<GameRecord>,
    limit: usize,
}

impl MemoryRecentGames {
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit: limit.max(1),
        }
    }
}

impl Default for MemoryRecentGames {
    fn default() -> Self {
        Self::new(RECENT_LIMIT)
    }
}

impl RecentGames for MemoryRecentGames {
    fn list(&self) -> &[GameRecord] {
        &self.records
    }

    fn add(&mut self, record: GameRecord) {
        self.records.retain(|r| !r.same_game(&record));
        self.records.insert(0, record);
        self.records.truncate(self.limit);
    }
}

#[derive(Debug, Default)]
pub struct MemoryFavorites {
    records: Vec<GameRecord>,
}

impl Favorites for MemoryFavorites {
    fn list(&self) -> &[GameRecord] {
        &self.records
    }

    fn is_favorite(&self, directory: &str, filename: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.directory == directory && r.filename == filename)
    }

    fn toggle(&mut self, record: GameRecord) -> bool {
        if let Some(i) = self.records.iter().position(|r| r.same_game(&record)) {
            self.records.remove(i);
            false
        } else {
            self.records.push(record);
            true
        }
    }

    fn remove(&mut self, index: usize) -> Option<GameRecord> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }
}

// -- Console to core mapping --------------------------------------------

/// Console folder name to emulator core name.
const CONSOLE_CORES: &[(&str, &str)] = &[
    ("gb", "Gambatte"),
    ("gbb", "TGBDual"),
    ("gbgb", "Gearboy"),
    ("dblcherrygb", "DoubleCherry-GB"),
    ("gba", "gpSP"),
    ("gbaf", "gpSP"),
    ("gbaff", "gpSP"),
    ("gbav", "VBA-Next"),
    ("mgba", "mGBA"),
    ("nes", "FCEUmm"),
    ("nesq", "QuickNES"),
    ("nest", "Nestopia"),
    ("snes", "Snes9x2005"),
    ("snes02", "Snes9x2002"),
    ("sega", "PicoDrive"),
    ("gg", "Gearsystem"),
    ("gpgx", "Genesis-Plus-GX"),
    ("pce", "Beetle-PCE-Fast"),
    ("pcesgx", "Beetle-SuperGrafx"),
    ("pcfx", "Beetle-PCFX"),
    ("ngpc", "RACE"),
    ("lnx", "Handy"),
    ("lnxb", "Beetle-Lynx"),
    ("wswan", "Beetle-WonderSwan"),
    ("wsv", "Potator"),
    ("pokem", "PokeMini"),
    ("vb", "Beetle-VB"),
    ("a26", "Stella2014"),
    ("a5200", "Atari5200"),
    ("a78", "ProSystem"),
    ("a800", "Atari800"),
    ("int", "FreeIntv"),
    ("col", "Gearcoleco"),
    ("msx", "BlueMSX"),
    ("spec", "Fuse"),
    ("zx81", "EightyOne"),
    ("thom", "Theodore"),
    ("vec", "VecX"),
    ("c64", "VICE-x64"),
    ("c64sc", "VICE-x64sc"),
    ("c64f", "Frodo"),
    ("c64fc", "Frodo"),
    ("vic20", "VICE-xvic"),
    ("amstradb", "CAP32"),
    ("amstrad", "CrocoDS"),
    ("bk", "BK-Emulator"),
    ("pc8800", "QUASI88"),
    ("xmil", "X-Millennium"),
    ("m2k", "MAME2000"),
    ("chip8", "JAXE"),
    ("fcf", "FreeChaF"),
    ("retro8", "Retro8"),
    ("vapor", "VaporSpec"),
    ("gong", "Gong"),
    ("outrun", "Cannonball"),
    ("wolf3d", "ECWolf"),
    ("prboom", "PrBoom"),
    ("doom", "PrBoom"),
    ("doom2", "PrBoom"),
    ("doom-plutonia", "PrBoom"),
    ("doom-tnt", "PrBoom"),
    ("flashback", "REminiscence"),
    ("xrick", "XRick"),
    ("gw", "Game-and-Watch"),
    ("cdg", "PocketCDG"),
    ("gme", "Game-Music-Emu"),
    ("fake08", "FAKE-08"),
    ("lowres-nx", "LowRes-NX"),
    ("jnb", "Jump-n-Bump"),
    ("cavestory", "NXEngine"),
    ("o2em", "O2EM"),
    ("quake", "TyrQuake"),
    ("arduboy", "Arduous"),
    ("js2000", "js2000"),
];

/// Core that runs games from the given console folder (exact match).
pub fn core_for_console(folder: &str) -> Option<&'static str> {
    CONSOLE_CORES
        .iter()
        .find(|(console, _)| *console == folder)
        .map(|(_, core)| *core)
}

// -- Settings editor ----------------------------------------------------

/// What the options editor is asked to edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsTarget {
    /// The launcher's own options.
    Launcher,
    /// Options of one emulator core.
    Core(String),
}

impl SettingsTarget {
    pub fn title(&self) -> &str {
        match self {
            SettingsTarget::Launcher => "LAUNCHER SETTINGS",
            SettingsTarget::Core(_) => "CORE SETTINGS",
        }
    }
}

/// One row of the options editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRow {
    pub label: String,
    pub value: String,
}

/// Host-provided options editor shown as an overlay.
pub trait SettingsEditor {
    /// Open the editor. Returns `false` if there is nothing to edit.
    fn open(&mut self, target: &SettingsTarget) -> bool;
    fn is_open(&self) -> bool;
    /// Feed a released button while open.
    fn handle_button(&mut self, button: Button);
    fn title(&self) -> &str;
    fn rows(&self) -> Vec<SettingsRow>;
    fn selected(&self) -> usize;
    /// Key/value pairs saved since the last call.
    fn take_changes(&mut self) -> Vec<(String, String)>;
}

#[derive(Debug, Clone)]
struct SettingsOption {
    key: String,
    label: String,
    choices: Vec<String>,
    current: usize,
}

/// A small list-of-choices editor for the launcher's own keys.
///
/// Up/down pick a row, left/right cycle its value, confirm saves and
/// closes, cancel closes without saving, square resets to the values the
/// editor was opened with. Core targets have no options.
#[derive(Debug)]
pub struct ChoiceSettings {
    options: Vec<SettingsOption>,
    opened_with: Vec<usize>,
    selected: usize,
    open: bool,
    title: String,
    changes: Vec<(String, String)>,
}

fn flag(value: bool) -> usize {
    if value { 1 } else { 0 }
}

impl ChoiceSettings {
    /// Editor seeded from the current configuration and the theme and font
    /// names that may be picked.
    pub fn for_launcher(config: &LauncherConfig, themes: &[&str], fonts: &[&str]) -> Self {
        let named = |key: &str, label: &str, names: &[&str], current: &str| {
            let mut choices: Vec<String> = names.iter().map(|n| n.to_string()).collect();
            let index = match choices.iter().position(|c| c == current) {
                Some(i) => i,
                None => {
                    choices.push(current.to_string());
                    choices.len() - 1
                },
            };
            SettingsOption {
                key: key.to_string(),
                label: label.to_string(),
                choices,
                current: index,
            }
        };
        let boolean = |key: &str, label: &str, value: bool| SettingsOption {
            key: key.to_string(),
            label: label.to_string(),
            choices: vec!["false".to_string(), "true".to_string()],
            current: flag(value),
        };

        Self {
            options: vec![
                named(KEY_THEME, "Theme", themes, &config.theme),
                named(KEY_FONT, "Font", fonts, &config.font),
                boolean(KEY_RESUME_ON_BOOT, "Resume on boot", config.resume_on_boot),
                boolean(KEY_HIDE_EMPTY, "Hide empty folders", config.hide_empty_folders),
            ],
            opened_with: Vec::new(),
            selected: 0,
            open: false,
            title: String::new(),
            changes: Vec::new(),
        }
    }

    fn close(&mut self) {
        self.open = false;
    }
}

impl SettingsEditor for ChoiceSettings {
    fn open(&mut self, target: &SettingsTarget) -> bool {
        if *target != SettingsTarget::Launcher || self.options.is_empty() {
            return false;
        }
        self.opened_with = self.options.iter().map(|o| o.current).collect();
        self.selected = 0;
        self.title = target.title().to_string();
        self.open = true;
        true
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn handle_button(&mut self, button: Button) {
        if !self.open {
            return;
        }
        let count = self.options.len();
        match button {
            Button::Up => self.selected = (self.selected + count - 1) % count,
            Button::Down => self.selected = (self.selected + 1) % count,
            Button::Left | Button::Right => {
                let option = &mut self.options[self.selected];
                let n = option.choices.len();
                option.current = if button == Button::Right {
                    (option.current + 1) % n
                } else {
                    (option.current + n - 1) % n
                };
            },
            Button::Confirm => {
                for (option, before) in self.options.iter().zip(&self.opened_with) {
                    if option.current != *before {
                        self.changes
                            .push((option.key.clone(), option.choices[option.current].clone()));
                    }
                }
                self.close();
            },
            Button::Cancel => {
                for (option, before) in self.options.iter_mut().zip(&self.opened_with) {
                    option.current = *before;
                }
                self.close();
            },
            Button::Square => {
                for (option, before) in self.options.iter_mut().zip(&self.opened_with) {
                    option.current = *before;
                }
            },
            _ => {},
        }
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn rows(&self) -> Vec<SettingsRow> {
        self.options
            .iter()
            .map(|o| SettingsRow {
                label: o.label.clone(),
                value: o.choices[o.current].clone(),
            })
            .collect()
    }

    fn selected(&self) -> usize {
        self.selected
    }

    fn take_changes(&mut self) -> Vec<(String, String)> {
        std::mem::take(&mut self.changes)
    }
}
