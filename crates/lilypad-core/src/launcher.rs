//! The launcher runtime.
//!
//! [`Launcher`] owns every piece of mutable state: configuration, storage,
//! navigation, caches, the mixer and the frame buffer. The host drives it
//! with [`Launcher::start`] once and [`Launcher::run_frame`] per frame.
//!
//! Actions fire when a button is released. Holding up or down auto-repeats
//! through [`NavigationState::hold`].

use rand::SeedableRng;
use rand::rngs::StdRng;

use lilypad_audio::{Mixer, SoundId};
use lilypad_types::config::{HOST_KEYS, LauncherConfig};
use lilypad_types::input::{Button, Control, InputEvent, Trigger};
use lilypad_vfs::{Vfs, basename, dirname};

use crate::collab::{
    ChoiceSettings, Favorites, GameRecord, MemoryFavorites, MemoryRecentGames, RecentGames,
    SettingsEditor, SettingsTarget, core_for_console,
};
use crate::empty_cache::{EmptyFolderCache, RebuildProgress};
use crate::entry::{Action, Entry, EntryKind};
use crate::host::HostCallbacks;
use crate::input_tracker::InputTracker;
use crate::label::{ScrollState, format_label};
use crate::launch::{LaunchRequest, LaunchSink, MemoryLaunchSink};
use crate::nav::{Direction, NavigationState, VISIBLE_ROWS, ViewKind};
use crate::quick_jump::{CELL_LABELS, GRID_COLUMNS, JumpOutcome, QuickJump};
use crate::random::pick_random_game;
use crate::render::{
    BlockFont, FONT_NAMES, Framebuffer, LegendMode, Painter, RowView, SCREEN_H, SCREEN_W,
    TextRenderer, font_by_name,
};
use crate::scanner::{
    ScanContext, ScanResult, is_root, record_entries, scan, tools_entries, utils_entries,
};
use crate::theme::{THEME_NAMES, Theme};
use crate::thumbnail::{ImageLoader, PngLoader, ThumbnailCache};

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Still in the menu.
    Browsing,
    /// A game was handed to the loader; the menu only shows the loading
    /// screen from now on.
    Launching,
}

pub struct Launcher {
    config: LauncherConfig,
    vfs: Box<dyn Vfs>,
    host: HostCallbacks,
    sink: Box<dyn LaunchSink>,
    recent: Box<dyn RecentGames>,
    favorites: Box<dyn Favorites>,
    settings: Box<dyn SettingsEditor>,
    loader: Box<dyn ImageLoader>,
    rng: StdRng,
    font: BlockFont,
    theme: Theme,
    nav: NavigationState,
    quick_jump: QuickJump,
    empty_cache: EmptyFolderCache,
    thumbnail: ThumbnailCache,
    label_scroll: ScrollState,
    /// Navigation generation the thumbnail and label scroll belong to.
    seen_generation: u64,
    input: InputTracker,
    mixer: Mixer,
    nav_sfx: Option<SoundId>,
    framebuffer: Framebuffer,
    queued: Option<LaunchRequest>,
}

impl std::fmt::Debug for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("view", self.nav.view())
            .field("selected", &self.nav.selected())
            .field("queued", &self.queued)
            .finish_non_exhaustive()
    }
}

impl Launcher {
    /// A launcher with in-memory stores, the built-in settings editor and
    /// no host callbacks. Use the `with_*` methods to attach the rest.
    pub fn new(config: LauncherConfig, vfs: Box<dyn Vfs>) -> Self {
        let settings = ChoiceSettings::for_launcher(&config, &THEME_NAMES, &FONT_NAMES);
        let theme = Theme::by_name(&config.theme);
        let font = font_by_name(&config.font);
        Self {
            config,
            vfs,
            host: HostCallbacks::new(),
            sink: Box::new(MemoryLaunchSink::default()),
            recent: Box::new(MemoryRecentGames::default()),
            favorites: Box::new(MemoryFavorites::default()),
            settings: Box::new(settings),
            loader: Box::new(PngLoader),
            rng: StdRng::from_entropy(),
            font,
            theme,
            nav: NavigationState::new(),
            quick_jump: QuickJump::new(),
            empty_cache: EmptyFolderCache::new(),
            thumbnail: ThumbnailCache::new(),
            label_scroll: ScrollState::new(),
            seen_generation: 0,
            input: InputTracker::new(),
            mixer: Mixer::new(),
            nav_sfx: None,
            framebuffer: Framebuffer::new(),
            queued: None,
        }
    }

    pub fn with_host(mut self, host: HostCallbacks) -> Self {
        self.host = host;
        self
    }

    pub fn with_sink(mut self, sink: impl LaunchSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_recent(mut self, recent: impl RecentGames + 'static) -> Self {
        self.recent = Box::new(recent);
        self
    }

    pub fn with_favorites(mut self, favorites: impl Favorites + 'static) -> Self {
        self.favorites = Box::new(favorites);
        self
    }

    pub fn with_settings(mut self, settings: impl SettingsEditor + 'static) -> Self {
        self.settings = Box::new(settings);
        self
    }

    pub fn with_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Fix the random game picker's generator, e.g. for reproducible runs.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    // -- Accessors ------------------------------------------------------

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn vfs(&self) -> &dyn Vfs {
        self.vfs.as_ref()
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    pub fn recent(&self) -> &dyn RecentGames {
        self.recent.as_ref()
    }

    pub fn favorites(&self) -> &dyn Favorites {
        self.favorites.as_ref()
    }

    pub fn thumbnail(&self) -> &ThumbnailCache {
        &self.thumbnail
    }

    pub fn empty_cache(&self) -> &EmptyFolderCache {
        &self.empty_cache
    }

    pub fn quick_jump_active(&self) -> bool {
        self.quick_jump.is_active()
    }

    /// The game handed to the loader, if any.
    pub fn queued_launch(&self) -> Option<&LaunchRequest> {
        self.queued.as_ref()
    }

    pub fn status(&self) -> FrameStatus {
        if self.queued.is_some() {
            FrameStatus::Launching
        } else {
            FrameStatus::Browsing
        }
    }

    // -- Lifecycle ------------------------------------------------------

    /// Apply host settings, load the menu sounds and show the first view.
    ///
    /// With resume-on-boot set and a game in the history, that game is
    /// launched straight away and the root is never scanned.
    pub fn start(&mut self) {
        log::info!("Starting launcher at {}", self.config.roms_root);
        self.apply_host_settings();
        self.load_audio();

        if self.config.resume_on_boot {
            if let Some(record) = self.recent.list().first().cloned() {
                log::info!("Resuming {}", record.display_name);
                self.launch(record.launch_request());
                if self.queued.is_some() {
                    return;
                }
            }
        }
        self.show_root();
    }

    /// Run one frame: settings, input, audio, then video.
    pub fn run_frame(&mut self) -> FrameStatus {
        if self.host.variables_updated() && self.apply_host_settings() {
            self.rescan_root_in_place();
        }

        self.host.poll_input();
        let host = &mut self.host;
        let events = self.input.update(|control| host.input_state(control));
        if self.queued.is_none() {
            self.handle_events(&events);
        }

        let block = self.mixer.mix();
        self.host.audio_batch(block);

        self.render();
        self.host
            .video_refresh(self.framebuffer.pixels(), SCREEN_W, SCREEN_H);
        self.status()
    }

    /// Return to a freshly scanned root.
    pub fn reset(&mut self) {
        log::info!("Reset");
        self.quick_jump.close();
        self.input.reset();
        self.show_root();
        if self.settings.is_open() {
            self.nav.enter_settings();
        }
    }

    // -- Settings -------------------------------------------------------

    /// Pull the host's key/value settings into the configuration. Returns
    /// whether the hide-empty flag changed.
    fn apply_host_settings(&mut self) -> bool {
        let hide_before = self.config.hide_empty_folders;
        for key in HOST_KEYS {
            if let Some(value) = self.host.get_variable(key) {
                if !self.config.apply_variable(key, &value) {
                    log::warn!("Ignoring setting {key}={value}");
                }
            }
        }
        self.refresh_presentation();
        hide_before != self.config.hide_empty_folders
    }

    fn refresh_presentation(&mut self) {
        self.theme = Theme::by_name(&self.config.theme);
        self.font = font_by_name(&self.config.font);
    }

    fn rescan_root_in_place(&mut self) {
        if *self.nav.view() == ViewKind::RootBrowser {
            self.show_root();
        }
    }

    fn open_settings(&mut self) {
        let target = match self.nav.view() {
            ViewKind::RootBrowser => SettingsTarget::Launcher,
            ViewKind::SubdirBrowser(path) => {
                let Some(folder) = console_folder(&self.config.roms_root, path) else {
                    return;
                };
                match core_for_console(folder) {
                    Some(core) => SettingsTarget::Core(core.to_string()),
                    None => {
                        log::debug!("No core mapped for console folder {folder}");
                        return;
                    },
                }
            },
            _ => return,
        };
        if self.settings.open(&target) {
            log::debug!("Opened {}", target.title());
            self.nav.enter_settings();
        }
    }

    /// The editor closed itself: leave the overlay and apply what it saved.
    fn close_settings(&mut self) {
        self.nav.leave_settings();
        let changes = self.settings.take_changes();
        if changes.is_empty() {
            return;
        }
        let hide_before = self.config.hide_empty_folders;
        for (key, value) in &changes {
            if self.config.apply_variable(key, value) {
                log::info!("Setting {key} = {value}");
            } else {
                log::warn!("Ignoring setting {key}={value}");
            }
        }
        self.refresh_presentation();
        if hide_before != self.config.hide_empty_folders {
            self.rescan_root_in_place();
        }
    }

    // -- Audio ----------------------------------------------------------

    fn load_audio(&mut self) {
        if let Some(id) = load_sound(self.vfs.as_ref(), &mut self.mixer, &self.config.music_path) {
            if let Err(e) = self.mixer.play_background(id, self.config.music_volume) {
                log::warn!("Cannot start background music: {e}");
            }
        }
        self.nav_sfx = load_sound(self.vfs.as_ref(), &mut self.mixer, &self.config.nav_sfx_path);
    }

    fn play_nav_sfx(&mut self) {
        if let Some(id) = self.nav_sfx {
            self.mixer.play_sfx(id, self.config.sfx_volume);
        }
    }

    // -- Input ----------------------------------------------------------

    fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::ButtonRelease(button) => self.on_button_release(button),
                InputEvent::TriggerRelease(trigger) => self.on_trigger_release(trigger),
                InputEvent::ButtonPress(_) | InputEvent::TriggerPress(_) => {},
            }
            if self.queued.is_some() {
                return;
            }
        }

        if self.settings.is_open() || self.quick_jump.is_active() {
            return;
        }
        for (control, dir) in [
            (Control::Button(Button::Up), Direction::Up),
            (Control::Button(Button::Down), Direction::Down),
        ] {
            let held = self.input.held_frames(control);
            if held > 0 {
                self.nav.hold(dir, held);
            }
        }
    }

    fn on_button_release(&mut self, button: Button) {
        if matches!(button, Button::Up | Button::Down | Button::Left | Button::Right) {
            self.play_nav_sfx();
        }

        if self.settings.is_open() {
            self.settings.handle_button(button);
            if !self.settings.is_open() {
                self.close_settings();
            }
            return;
        }

        if self.quick_jump.is_active() {
            match self.quick_jump.handle_button(button, self.nav.entries().as_slice()) {
                JumpOutcome::Jump(Some(index)) => self.nav.select_index(index),
                JumpOutcome::Jump(None) => log::debug!("Quick jump: no match"),
                JumpOutcome::Open | JumpOutcome::Cancelled => {},
            }
            return;
        }

        match button {
            Button::Up => {
                self.nav.release(Direction::Up);
            },
            Button::Down => {
                self.nav.release(Direction::Down);
            },
            Button::Right => self.open_quick_jump(),
            Button::Confirm => self.activate(),
            Button::Cancel => self.back(),
            Button::Triangle => self.favorite_action(),
            Button::Select => self.open_settings(),
            Button::Left | Button::Square | Button::Start => {},
        }
    }

    fn on_trigger_release(&mut self, trigger: Trigger) {
        if self.settings.is_open() || self.quick_jump.is_active() {
            return;
        }
        match trigger {
            Trigger::Left => self.nav.page_up(),
            Trigger::Right => self.nav.page_down(),
        }
    }

    fn open_quick_jump(&mut self) {
        if self.nav.view().is_virtual() || self.nav.is_empty() {
            return;
        }
        self.quick_jump.open();
    }

    // -- Navigation -----------------------------------------------------

    fn scan_dir(&self, dir: &str) -> ScanResult {
        let ctx = ScanContext {
            root: &self.config.roms_root,
            hide_empty: self.config.hide_empty_folders,
            empty_folders: &self.empty_cache,
        };
        scan(self.vfs.as_ref(), dir, &ctx)
    }

    fn show_root(&mut self) {
        self.ensure_empty_cache();
        let root = self.config.roms_root.clone();
        let result = self.scan_dir(&root);
        self.nav.set_view(ViewKind::RootBrowser, result.entries);
    }

    fn show_dir(&mut self, path: &str) {
        if is_root(path, &self.config.roms_root) {
            self.show_root();
            return;
        }
        let result = self.scan_dir(path);
        self.nav
            .set_view(ViewKind::SubdirBrowser(path.to_string()), result.entries);
    }

    fn show_tools(&mut self) {
        self.nav.set_view(ViewKind::Tools, tools_entries());
    }

    /// Go back to the view `action` was reached from, selecting its row.
    fn return_to(&mut self, action: Action) {
        match action {
            Action::Hotkeys | Action::Credits | Action::Utils => self.show_tools(),
            _ => self.show_root(),
        }
        if let Some(index) = self.nav.entries().position_of_action(action) {
            self.nav.select_index(index);
        }
    }

    fn back(&mut self) {
        match self.nav.view().clone() {
            ViewKind::RootBrowser | ViewKind::SettingsOverlay(_) => {},
            ViewKind::SubdirBrowser(path) => {
                let left = basename(&path);
                match dirname(&path) {
                    Some(parent) => self.show_dir(parent),
                    None => self.show_root(),
                }
                let index = self.nav.entries().position_by_name(left).unwrap_or(0);
                self.nav.select_index(index);
            },
            ViewKind::RecentGames => self.return_to(Action::RecentGames),
            ViewKind::Favorites => self.return_to(Action::Favorites),
            ViewKind::Tools => self.return_to(Action::Tools),
            ViewKind::Utils => self.return_to(Action::Utils),
            ViewKind::Hotkeys => self.return_to(Action::Hotkeys),
            ViewKind::Credits => self.return_to(Action::Credits),
        }
    }

    fn activate(&mut self) {
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };
        match entry.kind {
            EntryKind::Parent => self.back(),
            EntryKind::Action(action) => self.run_action(action),
            EntryKind::Item if entry.is_directory => self.show_dir(&entry.path),
            EntryKind::Item => self.launch_entry(&entry),
        }
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::RecentGames => {
                let entries = record_entries(self.recent.list(), &self.config.roms_root);
                self.nav.set_view(ViewKind::RecentGames, entries);
            },
            Action::Favorites => {
                let entries = record_entries(self.favorites.list(), &self.config.roms_root);
                self.nav.set_view(ViewKind::Favorites, entries);
            },
            Action::RandomGame => self.launch_random(),
            Action::Tools => self.show_tools(),
            Action::Hotkeys => {
                self.nav.set_view(ViewKind::Hotkeys, Vec::new());
            },
            Action::Credits => {
                self.nav.set_view(ViewKind::Credits, Vec::new());
            },
            Action::Utils => {
                let entries = utils_entries(self.vfs.as_ref(), &self.config.roms_root);
                self.nav.set_view(ViewKind::Utils, entries);
            },
            Action::RebuildCache => {
                self.rebuild_empty_cache();
                self.show_root();
            },
        }
    }

    fn favorite_action(&mut self) {
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };
        let in_folder = matches!(self.nav.view(), ViewKind::SubdirBrowser(_));
        let in_favorites = *self.nav.view() == ViewKind::Favorites;

        if in_folder && entry.is_file_item() {
            let Some(request) = LaunchRequest::from_rom_path(&self.config.roms_root, &entry.path)
            else {
                return;
            };
            if self.favorites.toggle(GameRecord::from_request(&request)) {
                log::info!("Added {} to favorites", entry.display_name);
            } else {
                log::info!("Removed {} from favorites", entry.display_name);
            }
        } else if in_favorites && !entry.is_parent() {
            let index = self.nav.selected();
            if let Some(removed) = self.favorites.remove(index) {
                log::info!("Removed {} from favorites", removed.display_name);
            }
            let count = self.favorites.list().len();
            let entries = record_entries(self.favorites.list(), &self.config.roms_root);
            self.nav.refresh(entries);
            self.nav
                .select_index(if count == 0 { 0 } else { index.min(count - 1) });
        }
    }

    // -- Launching ------------------------------------------------------

    fn launch_entry(&mut self, entry: &Entry) {
        let selected = self.nav.selected();
        let request = match self.nav.view() {
            ViewKind::Utils => Some(LaunchRequest::tool(entry.display_name.clone())),
            ViewKind::RecentGames => self.recent.list().get(selected).map(GameRecord::launch_request),
            ViewKind::Favorites => self
                .favorites
                .list()
                .get(selected)
                .map(GameRecord::launch_request),
            _ => LaunchRequest::from_rom_path(&self.config.roms_root, &entry.path),
        };
        match request {
            Some(request) => self.launch(request),
            None => log::warn!("Cannot work out how to launch {}", entry.path),
        }
    }

    fn launch_random(&mut self) {
        let ctx = ScanContext {
            root: &self.config.roms_root,
            hide_empty: self.config.hide_empty_folders,
            empty_folders: &self.empty_cache,
        };
        match pick_random_game(self.vfs.as_ref(), &ctx, &mut self.rng) {
            Some(request) => self.launch(request),
            None => self.show_root(),
        }
    }

    /// Hand `request` to the sink, remember it and switch to the loading
    /// screen. A failed hand-off leaves the menu as it was.
    fn launch(&mut self, request: LaunchRequest) {
        if let Err(e) = self.sink.launch(&request) {
            log::warn!("Launch of {} failed: {e}", request.record_line());
            return;
        }
        log::info!("Launching {}", request.record_line());
        self.recent.add(GameRecord::from_request(&request));
        self.quick_jump.close();
        self.thumbnail.release();
        self.queued = Some(request);
    }

    // -- Empty folder cache ---------------------------------------------

    fn ensure_empty_cache(&mut self) {
        if !self.config.hide_empty_folders || self.empty_cache.is_loaded() {
            return;
        }
        let Self {
            config,
            vfs,
            empty_cache,
            framebuffer,
            font,
            theme,
            host,
            ..
        } = self;
        let mut progress = |p: RebuildProgress| paint_progress(framebuffer, &*font, theme, host, p);
        if let Err(e) = empty_cache.load(
            vfs.as_mut(),
            &config.roms_root,
            &config.empty_cache_file,
            &mut progress,
        ) {
            log::warn!("Empty folder cache unavailable: {e}");
        }
    }

    fn rebuild_empty_cache(&mut self) {
        let Self {
            config,
            vfs,
            empty_cache,
            framebuffer,
            font,
            theme,
            host,
            ..
        } = self;
        let mut progress = |p: RebuildProgress| paint_progress(framebuffer, &*font, theme, host, p);
        match empty_cache.rebuild(
            vfs.as_mut(),
            &config.roms_root,
            &config.empty_cache_file,
            &mut progress,
        ) {
            Ok(outcome) => log::info!("Folder cache rebuilt: {outcome:?}"),
            Err(e) => log::warn!("Folder cache rebuild failed: {e}"),
        }
    }

    // -- Rendering ------------------------------------------------------

    fn update_thumbnail(&mut self) {
        let source = match self.nav.selected_entry() {
            Some(entry) if self.nav.view().shows_thumbnails() && entry.is_file_item() => {
                Some(entry.path.clone())
            },
            _ => None,
        };
        self.thumbnail
            .ensure_current(self.vfs.as_ref(), self.loader.as_ref(), source.as_deref());
    }

    fn visible_rows(&mut self) -> Vec<RowView> {
        let Self {
            nav,
            label_scroll,
            favorites,
            config,
            ..
        } = self;
        let view = nav.view();
        let mark_favorites = matches!(view, ViewKind::SubdirBrowser(_));
        nav.entries()
            .iter()
            .enumerate()
            .skip(nav.scroll_offset())
            .take(VISIBLE_ROWS)
            .map(|(i, entry)| {
                let selected = i == nav.selected();
                let favorite = mark_favorites
                    && entry.is_file_item()
                    && LaunchRequest::from_rom_path(&config.roms_root, &entry.path)
                        .is_some_and(|r| favorites.is_favorite(&r.directory, &r.filename));
                RowView {
                    text: format_label(&entry.display_name, selected, view, label_scroll),
                    selected,
                    favorite,
                }
            })
            .collect()
    }

    fn render(&mut self) {
        if self.queued.is_some() {
            let mut painter = Painter {
                fb: &mut self.framebuffer,
                font: &self.font,
                theme: &self.theme,
            };
            painter.loading();
            return;
        }

        if self.nav.generation() != self.seen_generation {
            self.seen_generation = self.nav.generation();
            self.label_scroll.reset();
            self.update_thumbnail();
        }
        let rows = self.visible_rows();

        let Self {
            framebuffer,
            font,
            theme,
            nav,
            quick_jump,
            settings,
            thumbnail,
            ..
        } = self;
        let mut painter = Painter {
            fb: framebuffer,
            font: &*font,
            theme: &*theme,
        };
        match nav.view() {
            ViewKind::SettingsOverlay(_) => {
                painter.settings(settings.title(), &settings.rows(), settings.selected());
            },
            ViewKind::Hotkeys => painter.hotkeys(),
            ViewKind::Credits => painter.credits(),
            view => {
                painter.background();
                if let Some(image) = thumbnail.image() {
                    painter.thumbnail(image);
                }
                painter.header(view.title());
                painter.rows(&rows);
                if !nav.is_empty() {
                    painter.position_label(nav.selected(), nav.len());
                }
                painter.legend(legend_for(view));
                if quick_jump.is_active() {
                    painter.quick_jump(&CELL_LABELS, quick_jump.grid_index(), GRID_COLUMNS);
                }
            },
        }
    }
}

fn legend_for(view: &ViewKind) -> LegendMode {
    match view {
        ViewKind::SubdirBrowser(_) => LegendMode::Favourite,
        ViewKind::Favorites => LegendMode::Remove,
        _ => LegendMode::Browse,
    }
}

/// First folder below `root` on `path`, i.e. the console a subfolder
/// belongs to.
fn console_folder<'a>(root: &str, path: &'a str) -> Option<&'a str> {
    let rest = path
        .strip_prefix(root.trim_end_matches('/'))?
        .trim_start_matches('/');
    rest.split('/').next().filter(|s| !s.is_empty())
}

/// Read and register a WAV. A missing or malformed file means silence.
fn load_sound(vfs: &dyn Vfs, mixer: &mut Mixer, path: &str) -> Option<SoundId> {
    if path.is_empty() {
        return None;
    }
    let bytes = match vfs.read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("No sound at {path}: {e}");
            return None;
        },
    };
    match mixer.load(bytes) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("Ignoring sound {path}: {e}");
            None
        },
    }
}

/// Paint the blocking rebuild screen and push it straight to the host.
fn paint_progress(
    fb: &mut Framebuffer,
    font: &dyn TextRenderer,
    theme: &Theme,
    host: &mut HostCallbacks,
    progress: RebuildProgress,
) {
    Painter {
        fb: &mut *fb,
        font,
        theme,
    }
    .rebuild_progress(progress.done, progress.total);
    host.video_refresh(fb.pixels(), SCREEN_W, SCREEN_H);
}
