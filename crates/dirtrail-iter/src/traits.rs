//! Iterator capability traits.

use dirtrail_core::{FileInfo, Result};

/// Value produced by [`PositionalIterator::current`].
#[derive(Debug)]
pub enum Current<'a, I: ?Sized> {
    /// Entry pathname.
    Pathname(String),
    /// Entry metadata snapshot.
    FileInfo(FileInfo),
    /// The iterator itself.
    Iterator(&'a I),
}

impl<I: ?Sized> Current<'_, I> {
    /// Pathname, if that is the active representation.
    pub fn as_pathname(&self) -> Option<&str> {
        match self {
            Current::Pathname(p) => Some(p),
            _ => None,
        }
    }

    /// File info, if that is the active representation.
    pub fn as_file_info(&self) -> Option<&FileInfo> {
        match self {
            Current::FileInfo(info) => Some(info),
            _ => None,
        }
    }
}

/// Cursor over a sequence with an explicit current position.
pub trait PositionalIterator {
    /// Render the current entry.
    ///
    /// Fails with a logic error when the iterator is not valid.
    fn current(&self) -> Result<Current<'_, Self>>;

    /// Key of the current entry.
    ///
    /// Fails with a logic error when the iterator is not valid.
    fn key(&self) -> Result<String>;

    /// Advance to the next entry.
    fn next(&mut self) -> Result<()>;

    /// Return to the first entry.
    fn rewind(&mut self) -> Result<()>;

    /// Whether a current entry is held.
    fn valid(&self) -> bool;
}

/// Positional iterator that can move to an absolute position.
pub trait SeekableIterator: PositionalIterator {
    /// Move to `position`, as if by `rewind` followed by `position` calls
    /// to `next`.
    fn seek(&mut self, position: i64) -> Result<()>;
}

/// Positional iterator whose entries may themselves be iterated.
pub trait RecursiveIterator: PositionalIterator {
    /// Whether the current entry can be descended into.
    fn has_children(&self) -> bool;

    /// Open an iterator over the current entry's contents.
    fn get_children(&self) -> Result<Self>
    where
        Self: Sized;
}
