//! Depth-first tree walk built on [`RecursiveDirectoryIterator`].

use serde::{Deserialize, Serialize};

use dirtrail_core::{EntryKind, FileInfo, IterError, Result, WalkConfig, WalkMode};

use crate::recursive::RecursiveDirectoryIterator;
use crate::traits::{PositionalIterator, RecursiveIterator};

/// One entry produced by a [`TreeWalker`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkEntry {
    /// Descents from the root (0 = root level).
    pub depth: usize,
    /// Key as rendered by the iterator flags.
    pub key: String,
    /// Full pathname.
    pub pathname: String,
    /// Pathname relative to the walk root.
    pub sub_pathname: String,
    /// Entry type (symlinks are not followed).
    pub kind: EntryKind,
    /// Size in bytes.
    pub size: u64,
}

impl WalkEntry {
    fn capture(iter: &RecursiveDirectoryIterator) -> Result<Self> {
        let entry = iter
            .entry()
            .ok_or_else(|| IterError::logic("Cannot capture an exhausted iterator"))?;
        let info = FileInfo::stat(entry.path(), entry.file_name_lossy())?;

        Ok(Self {
            depth: iter.depth(),
            key: iter.key()?,
            sub_pathname: iter.sub_pathname()?,
            kind: info.kind,
            size: info.size,
            pathname: info.pathname,
        })
    }
}

/// Walks a directory tree depth-first.
///
/// Keeps one [`RecursiveDirectoryIterator`] per open level. A subdirectory
/// that cannot be opened yields a single error and the walk carries on with
/// its next sibling.
#[derive(Debug)]
pub struct TreeWalker {
    stack: Vec<RecursiveDirectoryIterator>,
    config: WalkConfig,
}

impl TreeWalker {
    /// Open the configured root.
    pub fn new(config: WalkConfig) -> Result<Self> {
        let root = RecursiveDirectoryIterator::new(&config.root, config.flags())?;
        Ok(Self {
            stack: vec![root],
            config,
        })
    }

    /// Walk starting from an already positioned iterator.
    ///
    /// Depths are measured from that iterator, not from the original root.
    pub fn from_iterator(root: RecursiveDirectoryIterator, config: WalkConfig) -> Self {
        Self {
            stack: vec![root],
            config,
        }
    }

    /// Number of levels currently open.
    pub fn open_levels(&self) -> usize {
        self.stack.len()
    }

    fn within_depth(&self, depth: usize) -> bool {
        self.config
            .max_depth
            .is_none_or(|max| depth < max as usize)
    }

    fn is_hidden(&self, iter: &RecursiveDirectoryIterator) -> bool {
        iter.entry()
            .is_some_and(|e| self.config.should_skip_hidden(&e.file_name_lossy()))
    }
}

impl Iterator for TreeWalker {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let mode = self.config.mode;

        loop {
            let level = self.stack.len().checked_sub(1)?;
            let top = self.stack.last()?;

            if !top.valid() {
                self.stack.pop();
                let parent = self.stack.last_mut()?;
                let finished = (mode == WalkMode::ChildFirst).then(|| WalkEntry::capture(parent));
                if let Err(err) = parent.next() {
                    return Some(Err(err));
                }
                match finished {
                    Some(entry) => return Some(entry),
                    None => continue,
                }
            }

            if self.is_hidden(top) {
                if let Err(err) = self.advance_top() {
                    return Some(Err(err));
                }
                continue;
            }

            if top.has_children() && self.within_depth(level) {
                match top.get_children() {
                    Ok(child) => {
                        let entry = (mode == WalkMode::SelfFirst).then(|| WalkEntry::capture(top));
                        self.stack.push(child);
                        match entry {
                            Some(entry) => return Some(entry),
                            None => continue,
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping unreadable directory");
                        if let Err(next_err) = self.advance_top() {
                            return Some(Err(next_err));
                        }
                        return Some(Err(err));
                    }
                }
            }

            let entry = WalkEntry::capture(top);
            if let Err(err) = self.advance_top() {
                return Some(Err(err));
            }
            return Some(entry);
        }
    }
}

impl TreeWalker {
    fn advance_top(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            Some(top) => top.next(),
            None => Ok(()),
        }
    }
}
