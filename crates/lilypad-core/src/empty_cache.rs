//! Persistent set of console folders that hold nothing to launch.
//!
//! Probing every folder under the root on each visit is slow on SD cards,
//! so the answer is kept in a side file (one folder name per line) and only
//! recomputed on request or when the file is missing.

use lilypad_types::error::Result;
use lilypad_vfs::{Vfs, dirname, join};

use crate::scanner::{is_directory, is_hidden, is_reserved};

/// Most folder names the cache will hold.
pub const MAX_EMPTY_FOLDERS: usize = 256;

/// Longest folder name the cache records, in bytes. Longer folders are
/// never hidden.
pub const MAX_FOLDER_NAME_BYTES: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
    /// The set is full; the name was dropped.
    CapacityExceeded,
    /// Longer than [`MAX_FOLDER_NAME_BYTES`]; not recorded.
    NameTooLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Complete { empty: usize },
    /// More empty folders were found than the cache can hold.
    CapacityExceeded { kept: usize, dropped: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    AlreadyLoaded,
    Loaded { names: usize },
    Rebuilt(RebuildOutcome),
}

/// Reported before the first probe and after each folder is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildProgress {
    pub done: usize,
    pub total: usize,
}

/// Case-insensitive, bounded set of empty folder names.
///
/// Either unloaded (and empty) or fully loaded; a rebuild swaps in a
/// complete new set in one step.
#[derive(Debug, Default)]
pub struct EmptyFolderCache {
    names: Vec<String>,
    loaded: bool,
}

fn insert_into(names: &mut Vec<String>, name: &str) -> InsertOutcome {
    if name.len() > MAX_FOLDER_NAME_BYTES {
        return InsertOutcome::NameTooLong;
    }
    if names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
        return InsertOutcome::AlreadyPresent;
    }
    if names.len() >= MAX_EMPTY_FOLDERS {
        return InsertOutcome::CapacityExceeded;
    }
    names.push(name.to_string());
    InsertOutcome::Inserted
}

impl EmptyFolderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is recorded as an empty folder (ASCII case-insensitive).
    pub fn is_empty_folder(&self, name: &str) -> bool {
        name.len() <= MAX_FOLDER_NAME_BYTES && self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn insert(&mut self, name: &str) -> InsertOutcome {
        insert_into(&mut self.names, name)
    }

    /// Load the side file once. A missing or unreadable file triggers a
    /// rebuild.
    pub fn load(
        &mut self,
        vfs: &mut dyn Vfs,
        root: &str,
        cache_file: &str,
        progress: &mut dyn FnMut(RebuildProgress),
    ) -> Result<LoadOutcome> {
        if self.loaded {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let bytes = if vfs.exists(cache_file) {
            match vfs.read(cache_file) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    log::warn!("Empty folder cache unreadable ({e}), rebuilding");
                    None
                },
            }
        } else {
            log::info!("Empty folder cache {cache_file} not found, rebuilding");
            None
        };

        let Some(bytes) = bytes else {
            return self
                .rebuild(vfs, root, cache_file, progress)
                .map(LoadOutcome::Rebuilt);
        };

        let text = String::from_utf8_lossy(&bytes);
        let mut names = Vec::new();
        for line in text.lines().map(|l| l.trim_end_matches('\r')) {
            if line.is_empty() {
                continue;
            }
            match insert_into(&mut names, line) {
                InsertOutcome::CapacityExceeded => {
                    log::warn!("Empty folder cache holds more than {MAX_EMPTY_FOLDERS} names, ignoring the rest");
                    break;
                },
                InsertOutcome::NameTooLong => log::debug!("Skipping over-long cached name {line}"),
                InsertOutcome::Inserted | InsertOutcome::AlreadyPresent => {},
            }
        }
        self.names = names;
        self.loaded = true;
        log::info!("Empty folder cache: loaded {} entries", self.names.len());
        Ok(LoadOutcome::Loaded {
            names: self.names.len(),
        })
    }

    /// Probe every console folder under `root` and rewrite the side file.
    pub fn rebuild(
        &mut self,
        vfs: &mut dyn Vfs,
        root: &str,
        cache_file: &str,
        progress: &mut dyn FnMut(RebuildProgress),
    ) -> Result<RebuildOutcome> {
        let listing = match vfs.readdir(root) {
            Ok(listing) => listing,
            Err(e) => {
                self.names.clear();
                self.loaded = true;
                return Err(e);
            },
        };

        let folders: Vec<String> = listing
            .into_iter()
            .filter(|e| !is_hidden(&e.name) && !is_reserved(&e.name))
            .filter(|e| is_directory(&*vfs, &join(root, &e.name), e.kind))
            .map(|e| e.name)
            .collect();

        let total = folders.len();
        progress(RebuildProgress { done: 0, total });

        let mut staged = Vec::new();
        let mut dropped = 0;
        for (i, name) in folders.iter().enumerate() {
            let has_content = match vfs.readdir(&join(root, name)) {
                Ok(children) => children.iter().any(|c| !is_hidden(&c.name)),
                Err(e) => {
                    log::warn!("Cannot probe {name}: {e}");
                    true
                },
            };
            if !has_content {
                match insert_into(&mut staged, name) {
                    InsertOutcome::CapacityExceeded => dropped += 1,
                    InsertOutcome::NameTooLong => log::debug!("Not caching over-long folder name {name}"),
                    InsertOutcome::Inserted | InsertOutcome::AlreadyPresent => {},
                }
            }
            progress(RebuildProgress { done: i + 1, total });
        }

        let mut text = String::new();
        for name in &staged {
            text.push_str(name);
            text.push('\n');
        }
        if let Some(parent) = dirname(cache_file) {
            if !vfs.exists(parent) {
                if let Err(e) = vfs.mkdir(parent) {
                    log::warn!("Cannot create {parent}: {e}");
                }
            }
        }
        if let Err(e) = vfs.write(cache_file, text.as_bytes()) {
            log::warn!("Cannot write empty folder cache {cache_file}: {e}");
        }

        self.names = staged;
        self.loaded = true;
        log::info!("Empty folder cache: rebuilt with {} entries", self.names.len());

        if dropped > 0 {
            log::warn!("Empty folder cache full, dropped {dropped} names");
            Ok(RebuildOutcome::CapacityExceeded {
                kept: self.names.len(),
                dropped,
            })
        } else {
            Ok(RebuildOutcome::Complete {
                empty: self.names.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lilypad_vfs::MemoryVfs;

    const ROOT: &str = "/ROMS";
    const CACHE: &str = "/configs/empty.cache";

    fn no_progress() -> impl FnMut(RebuildProgress) {
        |_| {}
    }

    fn sample_vfs() -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        vfs.add_file("/ROMS/gb/Tetris.gb", b"").unwrap();
        vfs.mkdir("/ROMS/nes").unwrap();
        vfs.add_file("/ROMS/snes/.keep", b"").unwrap();
        vfs.add_file("/ROMS/saves/x.sav", b"").unwrap();
        vfs.mkdir("/ROMS/.hidden").unwrap();
        vfs.mkdir("/ROMS/Lilypad").unwrap();
        vfs.add_file("/ROMS/readme.txt", b"").unwrap();
        vfs
    }

    #[test]
    fn rebuild_finds_empty_folders() {
        let mut vfs = sample_vfs();
        let mut cache = EmptyFolderCache::new();
        let outcome = cache.rebuild(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert_eq!(outcome, RebuildOutcome::Complete { empty: 2 });
        assert!(cache.is_empty_folder("nes"));
        assert!(cache.is_empty_folder("SNES"));
        assert!(!cache.is_empty_folder("gb"));
        assert!(!cache.is_empty_folder("Lilypad"));
        assert_eq!(vfs.read(CACHE).unwrap(), b"nes\nsnes\n");
    }

    #[test]
    fn load_round_trips_rebuild() {
        let mut vfs = sample_vfs();
        let mut first = EmptyFolderCache::new();
        first.rebuild(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();

        let mut second = EmptyFolderCache::new();
        let outcome = second.load(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { names: 2 });
        assert_eq!(first.names(), second.names());
    }

    #[test]
    fn load_missing_file_rebuilds() {
        let mut vfs = sample_vfs();
        let mut cache = EmptyFolderCache::new();
        let mut calls = Vec::new();
        let outcome = cache
            .load(&mut vfs, ROOT, CACHE, &mut |p| calls.push(p))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Rebuilt(RebuildOutcome::Complete { empty: 2 }));
        assert!(vfs.exists(CACHE));
        assert_eq!(calls.first(), Some(&RebuildProgress { done: 0, total: 3 }));
        assert_eq!(calls.last(), Some(&RebuildProgress { done: 3, total: 3 }));
    }

    #[test]
    fn load_is_once_per_process() {
        let mut vfs = sample_vfs();
        vfs.mkdir("/configs").unwrap();
        vfs.write(CACHE, b"gba\n").unwrap();
        let mut cache = EmptyFolderCache::new();
        cache.load(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        vfs.write(CACHE, b"nes\n").unwrap();
        let outcome = cache.load(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert_eq!(outcome, LoadOutcome::AlreadyLoaded);
        assert!(cache.is_empty_folder("gba"));
        assert!(!cache.is_empty_folder("nes"));
    }

    #[test]
    fn load_skips_blank_lines_and_crlf() {
        let mut vfs = MemoryVfs::new();
        vfs.add_file(CACHE, b"gb\r\n\n\nnes\n").unwrap();
        let mut cache = EmptyFolderCache::new();
        cache.load(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert_eq!(cache.names(), ["gb".to_string(), "nes".to_string()]);
    }

    #[test]
    fn rebuild_uses_stat_when_kind_unknown() {
        let mut vfs = MemoryVfs::new().with_unknown_kinds();
        vfs.mkdir("/ROMS/nes").unwrap();
        vfs.add_file("/ROMS/notes.txt", b"").unwrap();
        let mut cache = EmptyFolderCache::new();
        cache.rebuild(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert!(cache.is_empty_folder("nes"));
        assert!(!cache.is_empty_folder("notes.txt"));
        assert!(vfs.stat_calls() >= 2);
    }

    #[test]
    fn rebuild_missing_root_is_error_but_loaded() {
        let mut vfs = MemoryVfs::new();
        let mut cache = EmptyFolderCache::new();
        assert!(cache.rebuild(&mut vfs, ROOT, CACHE, &mut no_progress()).is_err());
        assert!(cache.is_loaded());
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_is_enforced() {
        let mut cache = EmptyFolderCache::new();
        for i in 0..MAX_EMPTY_FOLDERS {
            assert_eq!(cache.insert(&format!("dir{i}")), InsertOutcome::Inserted);
        }
        assert_eq!(cache.insert("DIR0"), InsertOutcome::AlreadyPresent);
        assert_eq!(cache.insert("overflow"), InsertOutcome::CapacityExceeded);
        assert_eq!(cache.len(), MAX_EMPTY_FOLDERS);
    }

    #[test]
    fn rebuild_overflow_reports_dropped() {
        let mut vfs = MemoryVfs::new();
        for i in 0..MAX_EMPTY_FOLDERS + 4 {
            vfs.mkdir(&format!("/ROMS/c{i:03}")).unwrap();
        }
        let mut cache = EmptyFolderCache::new();
        let outcome = cache.rebuild(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert_eq!(
            outcome,
            RebuildOutcome::CapacityExceeded {
                kept: MAX_EMPTY_FOLDERS,
                dropped: 4
            }
        );
    }

    #[test]
    fn long_names_are_never_recorded() {
        let prefix = "x".repeat(MAX_FOLDER_NAME_BYTES);
        let empty = format!("{prefix}-empty");
        let full = format!("{prefix}-full");
        let mut cache = EmptyFolderCache::new();
        assert_eq!(cache.insert(&empty), InsertOutcome::NameTooLong);
        assert!(cache.is_empty());
        assert!(!cache.is_empty_folder(&full));

        // A stored name at the limit does not match a longer one it prefixes.
        assert_eq!(cache.insert(&prefix), InsertOutcome::Inserted);
        assert!(cache.is_empty_folder(&prefix));
        assert!(!cache.is_empty_folder(&full));
        assert!(!cache.is_empty_folder(&"é".repeat(40)));
    }

    #[test]
    fn rebuild_skips_long_empty_folder_names() {
        let long = "y".repeat(MAX_FOLDER_NAME_BYTES + 1);
        let mut vfs = sample_vfs();
        vfs.mkdir(&format!("{ROOT}/{long}")).unwrap();
        let mut cache = EmptyFolderCache::new();
        let outcome = cache.rebuild(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert!(matches!(outcome, RebuildOutcome::Complete { .. }));
        assert!(!cache.is_empty_folder(&long));
        assert!(!cache.names().contains(&long));
    }

    #[test]
    fn rebuild_over_existing_file_truncates() {
        let mut vfs = sample_vfs();
        vfs.mkdir("/configs").unwrap();
        vfs.write(CACHE, b"a\nvery\nlong\nstale\nlist\n").unwrap();
        let mut cache = EmptyFolderCache::new();
        cache.rebuild(&mut vfs, ROOT, CACHE, &mut no_progress()).unwrap();
        assert_eq!(vfs.read(CACHE).unwrap(), b"nes\nsnes\n");
    }
}
