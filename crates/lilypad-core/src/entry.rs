//! Menu entries and the bounded list that holds them.

use lilypad_types::error::{LilypadError, Result};

/// Upper bound on rows in a single view.
pub const MAX_ENTRIES: usize = 4096;

/// Display name of the parent link.
pub const PARENT_NAME: &str = "..";

/// Rows that do something other than open a folder or launch a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RecentGames,
    Favorites,
    RandomGame,
    Tools,
    Hotkeys,
    Credits,
    Utils,
    RebuildCache,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::RecentGames => "Recent games",
            Action::Favorites => "Favorites",
            Action::RandomGame => "Random game",
            Action::Tools => "Tools",
            Action::Hotkeys => "Hotkeys",
            Action::Credits => "Credits",
            Action::Utils => "Utils",
            Action::RebuildCache => "Rebuild folder cache",
        }
    }
}

/// What a row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real file or folder on storage.
    Item,
    /// The `..` link back to the enclosing view.
    Parent,
    Action(Action),
}

/// One navigable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute storage path for items; the enclosing folder for parent
    /// links; empty for actions.
    pub path: String,
    pub display_name: String,
    pub is_directory: bool,
    pub kind: EntryKind,
}

impl Entry {
    pub fn file(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: name.into(),
            is_directory: false,
            kind: EntryKind::Item,
        }
    }

    pub fn directory(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: name.into(),
            is_directory: true,
            kind: EntryKind::Item,
        }
    }

    pub fn parent(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: PARENT_NAME.to_string(),
            is_directory: true,
            kind: EntryKind::Parent,
        }
    }

    /// A synthetic row. Everything except the rebuild action presents as
    /// a folder.
    pub fn action(action: Action) -> Self {
        Self {
            path: String::new(),
            display_name: action.label().to_string(),
            is_directory: action != Action::RebuildCache,
            kind: EntryKind::Action(action),
        }
    }

    pub fn is_parent(&self) -> bool {
        self.kind == EntryKind::Parent
    }

    pub fn action_kind(&self) -> Option<Action> {
        match self.kind {
            EntryKind::Action(a) => Some(a),
            _ => None,
        }
    }

    /// A real file that can be launched or favourited.
    pub fn is_file_item(&self) -> bool {
        self.kind == EntryKind::Item && !self.is_directory
    }
}

/// Ordered rows with a hard cap.
///
/// Rebuilding a view clears the list without giving back its allocation.
#[derive(Debug, Default)]
pub struct EntryList {
    items: Vec<Entry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, or fail with [`LilypadError::Capacity`] when full.
    pub fn push(&mut self, entry: Entry) -> Result<()> {
        if self.items.len() >= MAX_ENTRIES {
            return Err(LilypadError::Capacity {
                what: "menu entries",
                max: MAX_ENTRIES,
            });
        }
        self.items.push(entry);
        Ok(())
    }

    /// Replace the contents, dropping anything past the cap. Returns the
    /// number of rows dropped.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = Entry>) -> usize {
        self.items.clear();
        let mut dropped = 0;
        for entry in entries {
            if self.push(entry).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("Dropped {dropped} rows past the {MAX_ENTRIES}-entry limit");
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.items.iter()
    }

    /// Index of the first row whose display name is `name`.
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|e| e.display_name == name)
    }

    /// Index of the first synthetic row for `action`.
    pub fn position_of_action(&self, action: Action) -> Option<usize> {
        self.items
            .iter()
            .position(|e| e.action_kind() == Some(action))
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_rows_present_as_folders_except_rebuild() {
        assert!(Entry::action(Action::Tools).is_directory);
        assert!(!Entry::action(Action::RebuildCache).is_directory);
        assert_eq!(Entry::action(Action::RandomGame).display_name, "Random game");
    }

    #[test]
    fn file_item_classification() {
        assert!(Entry::file("/r/gb/a.gb", "a.gb").is_file_item());
        assert!(!Entry::directory("/r/gb", "gb").is_file_item());
        assert!(!Entry::parent("/r").is_file_item());
        assert!(Entry::parent("/r").is_parent());
    }

    #[test]
    fn push_enforces_cap() {
        let mut list = EntryList::new();
        for i in 0..MAX_ENTRIES {
            list.push(Entry::file(format!("/f{i}"), format!("f{i}"))).unwrap();
        }
        let err = list.push(Entry::file("/x", "x")).unwrap_err();
        assert!(matches!(err, LilypadError::Capacity { max: MAX_ENTRIES, .. }));
        assert_eq!(list.len(), MAX_ENTRIES);
    }

    #[test]
    fn replace_keeps_allocation() {
        let mut list = EntryList::new();
        list.replace((0..100).map(|i| Entry::file(format!("/f{i}"), format!("f{i}"))));
        let cap = list.capacity();
        assert!(cap >= 100);
        list.replace([Entry::parent("/")]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.capacity(), cap);
    }

    #[test]
    fn replace_reports_dropped() {
        let mut list = EntryList::new();
        let dropped = list.replace(
            (0..MAX_ENTRIES + 3).map(|i| Entry::file(format!("/f{i}"), format!("f{i}"))),
        );
        assert_eq!(dropped, 3);
        assert_eq!(list.len(), MAX_ENTRIES);
    }

    #[test]
    fn lookups() {
        let mut list = EntryList::new();
        list.replace([
            Entry::action(Action::RecentGames),
            Entry::directory("/r/gb", "gb"),
            Entry::action(Action::Tools),
        ]);
        assert_eq!(list.position_by_name("gb"), Some(1));
        assert_eq!(list.position_by_name("nes"), None);
        assert_eq!(list.position_of_action(Action::Tools), Some(2));
    }
}
