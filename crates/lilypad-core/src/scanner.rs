//! Builds the rows for each view from storage.
//!
//! Scanning is pure with respect to navigation: it returns rows and never
//! touches selection or scroll state.

use lilypad_vfs::{EntryKind as FsKind, Vfs, dirname, join};

use crate::collab::GameRecord;
use crate::empty_cache::EmptyFolderCache;
use crate::entry::{Action, Entry, MAX_ENTRIES};

/// Folders under the root that never show up in listings.
pub const RESERVED_FOLDERS: [&str; 3] = ["lilypad", "saves", "save"];

/// Folder under the root whose contents the Utils view lists.
pub const TOOLS_FOLDER: &str = "js2000";

/// Synthetic rows added to the root listing (three on top, one at the end).
const ROOT_SYNTHETIC_ROWS: usize = 4;

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_FOLDERS.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Classify a listed child, trusting the listing's kind and only paying for
/// a `stat` when the listing could not tell.
pub fn is_directory(vfs: &dyn Vfs, path: &str, kind: FsKind) -> bool {
    match kind {
        FsKind::Directory => true,
        FsKind::File => false,
        FsKind::Unknown => vfs
            .stat(path)
            .map(|m| m.kind == FsKind::Directory)
            .unwrap_or(false),
    }
}

/// Whether `dir` names the console root (ignoring a trailing `/`).
pub fn is_root(dir: &str, root: &str) -> bool {
    let trim = |s: &str| -> String {
        let t = s.trim_end_matches('/');
        if t.is_empty() { "/".to_string() } else { t.to_string() }
    };
    trim(dir) == trim(root)
}

/// Inputs that shape a folder scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub root: &'a str,
    pub hide_empty: bool,
    pub empty_folders: &'a EmptyFolderCache,
}

#[derive(Debug, Default)]
pub struct ScanResult {
    pub entries: Vec<Entry>,
    /// `false` when the folder could not be listed; only synthetic rows
    /// are present then.
    pub readable: bool,
    /// Real items left out because the row limit was reached.
    pub truncated: usize,
}

/// List `dir` for browsing.
///
/// Hidden and reserved names are skipped. At the root only folders are
/// listed (minus cached empty ones when `hide_empty` is set) and the
/// synthetic rows are added; elsewhere a parent link comes first.
pub fn scan(vfs: &dyn Vfs, dir: &str, ctx: &ScanContext<'_>) -> ScanResult {
    let at_root = is_root(dir, ctx.root);
    let budget = if at_root {
        MAX_ENTRIES - ROOT_SYNTHETIC_ROWS
    } else {
        MAX_ENTRIES - 1
    };

    let mut items = Vec::new();
    let mut truncated = 0;
    let readable = match vfs.readdir(dir) {
        Ok(listing) => {
            for child in listing {
                if is_hidden(&child.name) || is_reserved(&child.name) {
                    continue;
                }
                let path = join(dir, &child.name);
                let is_dir = is_directory(vfs, &path, child.kind);
                if at_root {
                    if !is_dir {
                        continue;
                    }
                    if ctx.hide_empty && ctx.empty_folders.is_empty_folder(&child.name) {
                        continue;
                    }
                }
                if items.len() >= budget {
                    truncated += 1;
                    continue;
                }
                items.push(if is_dir {
                    Entry::directory(path, child.name)
                } else {
                    Entry::file(path, child.name)
                });
            }
            true
        },
        Err(e) => {
            log::warn!("Cannot list {dir}: {e}");
            false
        },
    };

    if truncated > 0 {
        log::warn!("{dir}: {truncated} items past the row limit were left out");
    }

    items.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    let mut entries = Vec::with_capacity(items.len() + ROOT_SYNTHETIC_ROWS);
    if at_root {
        entries.push(Entry::action(Action::RecentGames));
        entries.push(Entry::action(Action::Favorites));
        entries.push(Entry::action(Action::RandomGame));
        entries.extend(items);
        entries.push(Entry::action(Action::Tools));
    } else {
        let parent = dirname(dir).unwrap_or(ctx.root);
        entries.push(Entry::parent(parent));
        entries.extend(items);
    }

    ScanResult {
        entries,
        readable,
        truncated,
    }
}

/// Rows of the Tools view.
pub fn tools_entries() -> Vec<Entry> {
    vec![
        Entry::action(Action::Hotkeys),
        Entry::action(Action::Credits),
        Entry::action(Action::Utils),
        Entry::parent(""),
    ]
}

/// Rows of the Utils view: the tools folder (every kind checked with
/// `stat`), then the cache rebuild action and a parent link.
pub fn utils_entries(vfs: &dyn Vfs, root: &str) -> Vec<Entry> {
    let dir = join(root, TOOLS_FOLDER);
    let mut entries = Vec::new();
    match vfs.readdir(&dir) {
        Ok(listing) => {
            for child in listing {
                if is_hidden(&child.name) {
                    continue;
                }
                let path = join(&dir, &child.name);
                let Ok(meta) = vfs.stat(&path) else {
                    continue;
                };
                if entries.len() >= MAX_ENTRIES - 2 {
                    break;
                }
                entries.push(if meta.kind == FsKind::Directory {
                    Entry::directory(path, child.name)
                } else {
                    Entry::file(path, child.name)
                });
            }
        },
        Err(e) => log::debug!("No tools folder at {dir}: {e}"),
    }
    entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    entries.push(Entry::action(Action::RebuildCache));
    entries.push(Entry::parent(""));
    entries
}

/// Rows for a stored game list (recent games, favourites) followed by a
/// parent link.
pub fn record_entries(records: &[GameRecord], root: &str) -> Vec<Entry> {
    let mut entries: Vec<Entry> = records
        .iter()
        .take(MAX_ENTRIES - 1)
        .map(|r| Entry::file(r.rom_path(root), r.display_name.clone()))
        .collect();
    entries.push(Entry::parent(root));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use lilypad_vfs::MemoryVfs;

    const ROOT: &str = "/ROMS";

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.display_name.as_str()).collect()
    }

    fn ctx(cache: &EmptyFolderCache, hide_empty: bool) -> ScanContext<'_> {
        ScanContext {
            root: ROOT,
            hide_empty,
            empty_folders: cache,
        }
    }

    fn library() -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        vfs.add_file("/ROMS/gb/Tetris.gb", b"").unwrap();
        vfs.add_file("/ROMS/gb/.hidden.gb", b"").unwrap();
        vfs.add_file("/ROMS/gb/Zelda.gb", b"").unwrap();
        vfs.add_file("/ROMS/gb/alpha.gb", b"").unwrap();
        vfs.mkdir("/ROMS/gb/hacks").unwrap();
        vfs.mkdir("/ROMS/gb/Saves").unwrap();
        vfs.add_file("/ROMS/nes/Mario.nes", b"").unwrap();
        vfs.mkdir("/ROMS/GBA").unwrap();
        vfs.mkdir("/ROMS/lilypad").unwrap();
        vfs.mkdir("/ROMS/.git").unwrap();
        vfs.add_file("/ROMS/notes.txt", b"").unwrap();
        vfs
    }

    #[test]
    fn root_lists_folders_with_synthetic_rows() {
        let vfs = library();
        let cache = EmptyFolderCache::new();
        let result = scan(&vfs, ROOT, &ctx(&cache, true));
        assert!(result.readable);
        assert_eq!(
            names(&result.entries),
            vec!["Recent games", "Favorites", "Random game", "GBA", "gb", "nes", "Tools"]
        );
        assert_eq!(result.entries[3].path, "/ROMS/GBA");
        assert_eq!(
            result.entries[0].kind,
            EntryKind::Action(Action::RecentGames)
        );
    }

    #[test]
    fn root_hides_cached_empty_folders_when_enabled() {
        let vfs = library();
        let mut cache = EmptyFolderCache::new();
        cache.insert("gba");
        let hidden = scan(&vfs, ROOT, &ctx(&cache, true));
        assert!(!names(&hidden.entries).contains(&"GBA"));
        let shown = scan(&vfs, ROOT, &ctx(&cache, false));
        assert!(names(&shown.entries).contains(&"GBA"));
    }

    #[test]
    fn subfolder_has_parent_first_then_byte_order() {
        let vfs = library();
        let cache = EmptyFolderCache::new();
        let result = scan(&vfs, "/ROMS/gb", &ctx(&cache, true));
        assert_eq!(
            names(&result.entries),
            vec!["..", "Tetris.gb", "Zelda.gb", "alpha.gb", "hacks"]
        );
        assert!(result.entries[0].is_parent());
        assert_eq!(result.entries[0].path, "/ROMS");
        assert!(result.entries[4].is_directory);
        assert!(!result.entries[1].is_directory);
    }

    #[test]
    fn unreadable_folder_yields_synthetic_only() {
        let vfs = MemoryVfs::new();
        let cache = EmptyFolderCache::new();
        let root = scan(&vfs, ROOT, &ctx(&cache, true));
        assert!(!root.readable);
        assert_eq!(
            names(&root.entries),
            vec!["Recent games", "Favorites", "Random game", "Tools"]
        );
        let sub = scan(&vfs, "/ROMS/missing", &ctx(&cache, true));
        assert_eq!(names(&sub.entries), vec![".."]);
    }

    #[test]
    fn stat_only_when_kind_unknown() {
        let mut vfs = MemoryVfs::new();
        vfs.add_file("/ROMS/gb/a.gb", b"").unwrap();
        let cache = EmptyFolderCache::new();
        scan(&vfs, "/ROMS/gb", &ctx(&cache, true));
        assert_eq!(vfs.stat_calls(), 0);

        let mut blind = MemoryVfs::new().with_unknown_kinds();
        blind.add_file("/ROMS/gb/a.gb", b"").unwrap();
        blind.mkdir("/ROMS/gb/sub").unwrap();
        let result = scan(&blind, "/ROMS/gb", &ctx(&cache, true));
        assert_eq!(blind.stat_calls(), 2);
        assert!(result.entries[2].is_directory);
    }

    #[test]
    fn reserved_match_is_case_insensitive() {
        assert!(is_reserved("LilyPad"));
        assert!(is_reserved("SAVE"));
        assert!(!is_reserved("saved"));
        assert!(is_hidden(".thumbs"));
    }

    #[test]
    fn root_detection_ignores_trailing_slash() {
        assert!(is_root("/ROMS/", "/ROMS"));
        assert!(!is_root("/ROMS/gb", "/ROMS"));
        assert!(is_root("/", "/"));
    }

    #[test]
    fn tools_rows() {
        assert_eq!(
            names(&tools_entries()),
            vec!["Hotkeys", "Credits", "Utils", ".."]
        );
    }

    #[test]
    fn utils_lists_tools_folder_then_actions() {
        let mut vfs = MemoryVfs::new().with_unknown_kinds();
        vfs.add_file("/ROMS/js2000/tetris.js", b"").unwrap();
        vfs.add_file("/ROMS/js2000/.secret", b"").unwrap();
        vfs.mkdir("/ROMS/js2000/lib").unwrap();
        let entries = utils_entries(&vfs, ROOT);
        assert_eq!(
            names(&entries),
            vec!["lib", "tetris.js", "Rebuild folder cache", ".."]
        );
        assert!(entries[0].is_directory);
        assert!(!entries[1].is_directory);
        assert_eq!(entries[2].action_kind(), Some(Action::RebuildCache));
    }

    #[test]
    fn utils_without_tools_folder() {
        let vfs = MemoryVfs::new();
        assert_eq!(
            names(&utils_entries(&vfs, ROOT)),
            vec!["Rebuild folder cache", ".."]
        );
    }

    #[test]
    fn record_rows_end_with_parent() {
        let records = vec![GameRecord::new("gb", "gb", "Tetris.gb")];
        let entries = record_entries(&records, ROOT);
        assert_eq!(names(&entries), vec!["Tetris", ".."]);
        assert_eq!(entries[0].path, "/ROMS/gb/Tetris.gb");
        assert!(entries[1].is_parent());
        assert_eq!(names(&record_entries(&[], ROOT)), vec![".."]);
    }
}
