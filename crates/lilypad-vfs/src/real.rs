//! Host file system backend.
//!
//! VFS paths are resolved under a root directory, so `/ROMS/gb` maps to
//! `<root>/ROMS/gb`. `..` components are dropped rather than followed.

use std::fs;
use std::path::{Component, Path, PathBuf};

use lilypad_types::error::{LilypadError, Result};

use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

/// A [`Vfs`] backed by a directory on the host.
#[derive(Debug, Clone)]
pub struct RealVfs {
    root: PathBuf,
}

impl RealVfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let mut out = self.root.clone();
        for component in Path::new(path.trim_start_matches('/')).components() {
            if let Component::Normal(part) = component {
                out.push(part);
            }
        }
        out
    }
}

fn kind_of(ft: fs::FileType) -> EntryKind {
    if ft.is_dir() {
        EntryKind::Directory
    } else if ft.is_file() {
        EntryKind::File
    } else {
        // Symlinks and specials: let the caller stat through them.
        EntryKind::Unknown
    }
}

fn vfs_err(path: &Path, e: std::io::Error) -> LilypadError {
    LilypadError::Vfs(format!("{}: {e}", path.display()))
}

impl Vfs for RealVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let dir = self.resolve(path);
        let mut entries = Vec::new();
        for item in fs::read_dir(&dir).map_err(|e| vfs_err(&dir, e))? {
            let item = item.map_err(|e| vfs_err(&dir, e))?;
            let name = item.file_name().to_string_lossy().into_owned();
            let kind = item.file_type().map(kind_of).unwrap_or(EntryKind::Unknown);
            entries.push(VfsEntry { name, kind });
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let file = self.resolve(path);
        fs::read(&file).map_err(|e| vfs_err(&file, e))
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let file = self.resolve(path);
        fs::write(&file, data).map_err(|e| vfs_err(&file, e))
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        let target = self.resolve(path);
        let meta = fs::metadata(&target).map_err(|e| vfs_err(&target, e))?;
        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Ok(VfsMetadata {
            kind,
            size: meta.len(),
        })
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let dir = self.resolve(path);
        fs::create_dir_all(&dir).map_err(|e| vfs_err(&dir, e))
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let target = self.resolve(path);
        if target == self.root {
            return Err(LilypadError::Vfs("cannot remove root".to_string()));
        }
        let meta = fs::metadata(&target).map_err(|e| vfs_err(&target, e))?;
        if meta.is_dir() {
            fs::remove_dir(&target).map_err(|e| vfs_err(&target, e))
        } else {
            fs::remove_file(&target).map_err(|e| vfs_err(&target, e))
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}
