//! In-memory VFS implementation.
//!
//! Used by unit tests and by the demo runner. The tree lives in a
//! `BTreeMap<String, Node>` keyed by normalized absolute path, so listing a
//! directory is a range scan over its prefix.

use std::borrow::Cow;
use std::cell::Cell;
use std::collections::BTreeMap;

use lilypad_types::error::{LilypadError, Result};

use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// A fully in-memory file tree.
#[derive(Debug)]
pub struct MemoryVfs {
    nodes: BTreeMap<String, Node>,
    /// When set, `readdir` reports every kind as `Unknown`, like a FAT
    /// driver without `d_type`.
    hide_kinds: bool,
    stat_calls: Cell<usize>,
}

impl MemoryVfs {
    /// Create an empty tree containing only `/`.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self {
            nodes,
            hide_kinds: false,
            stat_calls: Cell::new(0),
        }
    }

    /// Make listings report [`EntryKind::Unknown`] for every child.
    pub fn with_unknown_kinds(mut self) -> Self {
        self.hide_kinds = true;
        self
    }

    /// Number of `stat` calls served so far.
    pub fn stat_calls(&self) -> usize {
        self.stat_calls.get()
    }

    /// Create a file, creating parent directories as needed.
    pub fn add_file(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path);
        let par = parent(&path).to_string();
        self.mkdir(&par)?;
        self.nodes.insert(path.into_owned(), Node::File(data.to_vec()));
        Ok(())
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensure a leading `/`, collapse `//`, strip a trailing `/` (except root).
/// Borrows the input when it is already normal.
fn normalize(path: &str) -> Cow<'_, str> {
    let normal = path.starts_with('/')
        && !path.contains("//")
        && (path.len() == 1 || !path.ends_with('/'));
    if normal {
        return Cow::Borrowed(path);
    }
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    Cow::Owned(out)
}

fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

impl Vfs for MemoryVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(LilypadError::Vfs(format!("not a directory: {path}")));
            },
            None => {
                return Err(LilypadError::Vfs(format!("no such directory: {path}")));
            },
        }

        let prefix = if path.as_ref() == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };

        let mut entries = Vec::new();
        for (key, node) in self.nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            let kind = match (self.hide_kinds, node) {
                (true, _) => EntryKind::Unknown,
                (false, Node::Dir) => EntryKind::Directory,
                (false, Node::File(_)) => EntryKind::File,
            };
            entries.push(VfsEntry {
                name: rest.to_string(),
                kind,
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Dir) => Err(LilypadError::Vfs(format!("is a directory: {path}"))),
            None => Err(LilypadError::Vfs(format!("no such file: {path}"))),
        }
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path);
        let par = parent(&path);
        if !matches!(self.nodes.get(par), Some(Node::Dir)) {
            return Err(LilypadError::Vfs(format!(
                "parent directory does not exist: {par}"
            )));
        }
        if matches!(self.nodes.get(path.as_ref()), Some(Node::Dir)) {
            return Err(LilypadError::Vfs(format!("is a directory: {path}")));
        }
        self.nodes.insert(path.into_owned(), Node::File(data.to_vec()));
        Ok(())
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        self.stat_calls.set(self.stat_calls.get() + 1);
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File(data)) => Ok(VfsMetadata {
                kind: EntryKind::File,
                size: data.len() as u64,
            }),
            Some(Node::Dir) => Ok(VfsMetadata {
                kind: EntryKind::Directory,
                size: 0,
            }),
            None => Err(LilypadError::Vfs(format!("no such path: {path}"))),
        }
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => return Ok(()),
            Some(Node::File(_)) => {
                return Err(LilypadError::Vfs(format!("file exists: {path}")));
            },
            None => {},
        }
        let par = parent(&path).to_string();
        if par != path.as_ref() {
            self.mkdir(&par)?;
        }
        self.nodes.insert(path.into_owned(), Node::Dir);
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        if path.as_ref() == "/" {
            return Err(LilypadError::Vfs("cannot remove root".to_string()));
        }
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {
                let prefix = format!("{path}/");
                let has_children = self
                    .nodes
                    .range(prefix.clone()..)
                    .next()
                    .is_some_and(|(k, _)| k.starts_with(&prefix));
                if has_children {
                    return Err(LilypadError::Vfs(format!("directory not empty: {path}")));
                }
            },
            Some(Node::File(_)) => {},
            None => return Err(LilypadError::Vfs(format!("no such path: {path}"))),
        }
        self.nodes.remove(path.as_ref());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(normalize(path).as_ref())
    }
}
