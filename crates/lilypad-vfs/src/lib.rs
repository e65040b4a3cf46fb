//! File system abstraction.
//!
//! The launcher never touches `std::fs` directly; everything goes through
//! the [`Vfs`] trait so scanning, caching and asset loading can run against
//! an in-memory tree in tests and against the SD card in production.
//!
//! Paths are `/`-separated absolute strings.

mod memory;
mod real;

pub use memory::MemoryVfs;
pub use real::RealVfs;

use lilypad_types::error::Result;

/// What a directory listing says about an entry.
///
/// Some drivers (FAT without `d_type`) cannot tell files from folders
/// during a listing and report [`EntryKind::Unknown`]; callers then fall
/// back to [`Vfs::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Unknown,
}

/// One item returned by [`Vfs::readdir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Result of [`Vfs::stat`]. Never reports [`EntryKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsMetadata {
    pub kind: EntryKind,
    pub size: u64,
}

/// A hierarchical file store.
pub trait Vfs {
    /// List the direct children of a directory, in no particular order.
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>>;

    /// Read a whole file.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Create or truncate a file and write `data` to it.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<()>;

    /// Query an entry's kind and size.
    fn stat(&self, path: &str) -> Result<VfsMetadata>;

    /// Create a directory and any missing parents.
    fn mkdir(&mut self, path: &str) -> Result<()>;

    /// Remove a file or an empty directory.
    fn remove(&mut self, path: &str) -> Result<()>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &str) -> bool;
}

/// Join a directory and a child name with exactly one `/`.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Final path component (`/a/b.gb` -> `b.gb`).
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Everything before the final `/` (`/a/b.gb` -> `/a`), or `None` when the
/// path has no parent component.
pub fn dirname(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) | None => None,
        Some(i) => Some(&path[..i]),
    }
}
