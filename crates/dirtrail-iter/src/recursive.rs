//! Directory iterator that can descend into subdirectories.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use dirtrail_core::{DirectoryEntry, Flags, IterError, Result};

use crate::directory::{seek_by_replay, DirectoryIterator, Positioned};
use crate::traits::{Current, PositionalIterator, RecursiveIterator, SeekableIterator};

/// A [`DirectoryIterator`] that tracks the path travelled from the original
/// root and hands out child iterators for subdirectories.
///
/// Children are independent values: each owns its own handle and a copy of
/// the flags, so advancing a child never moves its parent.
#[derive(Debug)]
pub struct RecursiveDirectoryIterator {
    inner: DirectoryIterator,
    sub_path: Vec<OsString>,
}

impl RecursiveDirectoryIterator {
    /// Open `path` with the default flags (`CURRENT_AS_FILEINFO`).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(path, Flags::default())
    }

    /// Open `path` as the root of a traversal.
    pub fn new(path: impl AsRef<Path>, flags: Flags) -> Result<Self> {
        Ok(Self {
            inner: DirectoryIterator::new(path, flags)?,
            sub_path: Vec::new(),
        })
    }

    /// Whether the current entry is a directory worth descending into.
    ///
    /// `.` and `..` never have children. A symlink to a directory counts
    /// only when `FOLLOW_SYMLINKS` is set or `allow_links` is passed.
    pub fn has_children_with(&self, allow_links: bool) -> bool {
        let Some(entry) = self.inner.entry() else {
            return false;
        };
        if entry.is_dot() {
            return false;
        }

        let metadata = if allow_links || self.inner.flags().follow_symlinks() {
            std::fs::metadata(entry.path())
        } else {
            std::fs::symlink_metadata(entry.path())
        };
        metadata.is_ok_and(|m| m.is_dir())
    }

    /// Open a child iterator, treating symlinked directories per
    /// [`has_children_with`](Self::has_children_with).
    pub fn get_children_with(&self, allow_links: bool) -> Result<Self> {
        if !self.has_children_with(allow_links) {
            return Err(IterError::logic("Cannot descend into non-directory"));
        }
        let entry = self.inner.require_entry("get_children")?;

        let inner = DirectoryIterator::new(entry.path(), self.inner.flags())?;
        let mut sub_path = self.sub_path.clone();
        sub_path.push(entry.name().to_os_string());

        tracing::debug!(
            path = %entry.path().display(),
            depth = sub_path.len(),
            "descending into directory"
        );

        Ok(Self { inner, sub_path })
    }

    /// Path of the directory being iterated, relative to the original root.
    ///
    /// Empty at the root level.
    pub fn sub_path(&self) -> String {
        let separator = self.inner.flags().separator().to_string();
        self.sub_path
            .iter()
            .map(|segment| segment.to_string_lossy())
            .collect::<Vec<_>>()
            .join(&separator)
    }

    /// Path of the current entry relative to the original root.
    pub fn sub_pathname(&self) -> Result<String> {
        let entry = self.inner.require_entry("sub_pathname")?;
        let mut out = self.sub_path();
        if !out.is_empty() {
            out.push(self.inner.flags().separator());
        }
        out.push_str(&entry.file_name_lossy());
        Ok(out)
    }

    /// Raw segments travelled since the original root.
    pub fn sub_path_segments(&self) -> impl Iterator<Item = &OsStr> {
        self.sub_path.iter().map(OsString::as_os_str)
    }

    /// Number of descents from the original root.
    pub fn depth(&self) -> usize {
        self.sub_path.len()
    }

    /// Number of entries advanced past since the last rewind.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Flags fixed at construction.
    pub fn flags(&self) -> Flags {
        self.inner.flags()
    }

    /// Directory being listed.
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Current entry, if any.
    pub fn entry(&self) -> Option<&DirectoryEntry> {
        self.inner.entry()
    }

    /// Whether an OS listing is currently held.
    pub fn has_open_handle(&self) -> bool {
        self.inner.has_open_handle()
    }

    /// Bare name of the current entry.
    pub fn file_name(&self) -> Result<String> {
        self.inner.file_name()
    }

    /// Pathname of the current entry.
    pub fn pathname(&self) -> Result<String> {
        self.inner.pathname()
    }

    /// Whether the current entry is `.` or `..`.
    pub fn is_dot(&self) -> bool {
        self.inner.is_dot()
    }

    /// String form of the current entry: its pathname.
    pub fn try_to_string(&self) -> Result<String> {
        self.inner.try_to_string()
    }
}

impl PositionalIterator for RecursiveDirectoryIterator {
    fn current(&self) -> Result<Current<'_, Self>> {
        self.inner.render(self)
    }

    fn key(&self) -> Result<String> {
        self.inner.key()
    }

    fn next(&mut self) -> Result<()> {
        self.inner.next()
    }

    fn rewind(&mut self) -> Result<()> {
        self.inner.rewind()
    }

    fn valid(&self) -> bool {
        self.inner.valid()
    }
}

impl SeekableIterator for RecursiveDirectoryIterator {
    fn seek(&mut self, position: i64) -> Result<()> {
        seek_by_replay(self, position)
    }
}

impl Positioned for RecursiveDirectoryIterator {
    fn position(&self) -> u64 {
        self.inner.position()
    }
}

impl RecursiveIterator for RecursiveDirectoryIterator {
    fn has_children(&self) -> bool {
        self.has_children_with(false)
    }

    fn get_children(&self) -> Result<Self> {
        self.get_children_with(false)
    }
}
