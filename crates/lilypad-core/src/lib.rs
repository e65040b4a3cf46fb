//! lilypad launcher runtime.
//!
//! Console-style game browser: folder scanning with an empty-folder cache,
//! list navigation with auto-repeat, A-Z quick jump, thumbnails, menu audio
//! and the hand-off to an external loader. Everything is driven one frame at
//! a time through [`launcher::Launcher`] and the callbacks in
//! [`host::HostCallbacks`].

// Re-exports from the foundation crates.
pub use lilypad_audio as audio;
pub use lilypad_types::color;
pub use lilypad_types::config;
pub use lilypad_types::error;
pub use lilypad_types::input;
pub use lilypad_vfs as vfs;

pub mod collab;
pub mod empty_cache;
pub mod entry;
pub mod host;
pub mod input_tracker;
pub mod label;
pub mod launch;
pub mod launcher;
pub mod nav;
pub mod quick_jump;
pub mod random;
pub mod render;
pub mod scanner;
pub mod theme;
pub mod thumbnail;
