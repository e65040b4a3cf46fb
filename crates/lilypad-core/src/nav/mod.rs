//! View and selection state.
//!
//! [`NavigationState`] owns the rows of the current view together with the
//! selection and scroll position, and keeps them consistent: the selection
//! is always a valid row (or zero for an empty list) and always inside the
//! visible window.

mod repeat;

pub use repeat::{BOUNDARY_DELAY_FRAMES, Direction, REPEAT_DELAY_FRAMES, REPEAT_INTERVAL_FRAMES};

use lilypad_vfs::basename;

use crate::entry::{Entry, EntryList};
use repeat::{HoldRepeat, HoldStep};

/// Rows drawn at once.
pub const VISIBLE_ROWS: usize = 9;
/// Rows skipped by the shoulder buttons.
pub const PAGE_STEP: usize = 7;

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// The console list at the storage root.
    RootBrowser,
    /// A folder below the root.
    SubdirBrowser(String),
    RecentGames,
    Favorites,
    Tools,
    Utils,
    Hotkeys,
    Credits,
    /// The options editor drawn over another view.
    SettingsOverlay(Box<ViewKind>),
}

impl ViewKind {
    /// Views that are not backed by a storage folder.
    pub fn is_virtual(&self) -> bool {
        match self {
            ViewKind::RootBrowser | ViewKind::SubdirBrowser(_) => false,
            ViewKind::RecentGames
            | ViewKind::Favorites
            | ViewKind::Tools
            | ViewKind::Utils
            | ViewKind::Hotkeys
            | ViewKind::Credits
            | ViewKind::SettingsOverlay(_) => true,
        }
    }

    /// Menu views give unselected rows the long label budget.
    pub fn uses_long_labels(&self) -> bool {
        !matches!(self, ViewKind::SubdirBrowser(_))
    }

    /// Views whose rows may be games with a preview image.
    pub fn shows_thumbnails(&self) -> bool {
        matches!(
            self,
            ViewKind::SubdirBrowser(_) | ViewKind::RecentGames | ViewKind::Favorites
        )
    }

    /// Text screens without rows.
    pub fn is_text_screen(&self) -> bool {
        matches!(self, ViewKind::Hotkeys | ViewKind::Credits)
    }

    pub fn title(&self) -> &str {
        match self {
            ViewKind::RootBrowser => "LILYPAD: SYSTEMS",
            ViewKind::SubdirBrowser(path) => basename(path),
            ViewKind::RecentGames => "RECENT GAMES",
            ViewKind::Favorites => "FAVORITES",
            ViewKind::Tools => "TOOLS",
            ViewKind::Utils => "UTILS",
            ViewKind::Hotkeys => "HOTKEYS",
            ViewKind::Credits => "CREDITS",
            ViewKind::SettingsOverlay(under) => under.title(),
        }
    }
}

#[derive(Debug)]
pub struct NavigationState {
    view: ViewKind,
    entries: EntryList,
    selected: usize,
    scroll: usize,
    repeat: HoldRepeat,
    /// Bumped whenever the view or the selected row changes.
    generation: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            view: ViewKind::RootBrowser,
            entries: EntryList::new(),
            selected: 0,
            scroll: 0,
            repeat: HoldRepeat::default(),
            generation: 0,
        }
    }

    pub fn view(&self) -> &ViewKind {
        &self.view
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// First visible row.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Side and elapsed frames of a pending edge wrap, if any.
    pub fn boundary(&self) -> Option<(Direction, u32)> {
        self.repeat.boundary()
    }

    /// Switch to `view` with new rows. Selection and scroll go to the top.
    /// Returns the number of rows dropped past the entry limit.
    pub fn set_view(&mut self, view: ViewKind, entries: impl IntoIterator<Item = Entry>) -> usize {
        log::debug!("View -> {view:?}");
        self.view = view;
        let dropped = self.entries.replace(entries);
        self.selected = 0;
        self.scroll = 0;
        self.repeat.reset();
        self.generation += 1;
        dropped
    }

    /// Swap the rows of the current view, keeping the selection as close as
    /// the new length allows.
    pub fn refresh(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.replace(entries);
        let target = self.selected;
        self.selected = usize::MAX;
        self.select_index(target);
    }

    /// Show the options editor over the current view.
    pub fn enter_settings(&mut self) {
        if matches!(self.view, ViewKind::SettingsOverlay(_)) {
            return;
        }
        let under = std::mem::replace(&mut self.view, ViewKind::RootBrowser);
        self.view = ViewKind::SettingsOverlay(Box::new(under));
        self.generation += 1;
    }

    /// Drop the options editor and return to the view beneath it.
    pub fn leave_settings(&mut self) {
        if let ViewKind::SettingsOverlay(under) = &mut self.view {
            let under = std::mem::replace(under.as_mut(), ViewKind::RootBrowser);
            self.view = under;
            self.generation += 1;
        }
    }

    /// Select row `index`, clamped into range.
    pub fn select_index(&mut self, index: usize) {
        let len = self.entries.len();
        let index = if len == 0 { 0 } else { index.min(len - 1) };
        if index != self.selected {
            self.selected = index;
            self.generation += 1;
        }
        self.clamp_scroll();
    }

    /// Keep the selection inside the visible window.
    fn clamp_scroll(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + VISIBLE_ROWS {
            self.scroll = self.selected + 1 - VISIBLE_ROWS;
        }
    }

    pub fn move_up(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let next = if self.selected > 0 { self.selected - 1 } else { len - 1 };
        self.select_index(next);
    }

    pub fn move_down(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let next = if self.selected + 1 < len { self.selected + 1 } else { 0 };
        self.select_index(next);
    }

    /// Seven rows up, wrapping modulo the list length. From the top rows
    /// of a long list this lands `7 - selected` rows above the end.
    pub fn page_up(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let next = (self.selected as isize - PAGE_STEP as isize).rem_euclid(len as isize) as usize;
        self.select_index(next);
    }

    /// Seven rows down, continuing from the top when that passes the end.
    pub fn page_down(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let next = if self.selected + PAGE_STEP < len {
            self.selected + PAGE_STEP
        } else {
            (self.selected + PAGE_STEP) % len
        };
        self.select_index(next);
    }

    fn step(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// One frame of `dir` being held for `held_frames` frames (1 on the
    /// frame it went down). Returns whether the selection moved.
    pub fn hold(&mut self, dir: Direction, held_frames: u32) -> bool {
        let len = self.entries.len();
        if len == 0 {
            return false;
        }
        let at_edge = len > 1
            && match dir {
                Direction::Up => self.selected == 0,
                Direction::Down => self.selected + 1 == len,
            };
        match self.repeat.held(dir, held_frames, at_edge) {
            HoldStep::Move => {
                self.step(dir);
                true
            },
            HoldStep::Wait => false,
        }
    }

    /// `dir` went up. A tap moves one row; a hold that already repeated
    /// does not move again. Returns whether the selection moved.
    pub fn release(&mut self, dir: Direction) -> bool {
        if self.entries.is_empty() {
            self.repeat.reset();
            return false;
        }
        if self.repeat.released() {
            self.step(dir);
            true
        } else {
            false
        }
    }
}
