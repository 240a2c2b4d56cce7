//! Single-level positional directory iterator.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use dirtrail_core::{CurrentMode, DirectoryEntry, FileInfo, Flags, IterError, KeyMode, Result};

use crate::handle::DirectoryHandle;
use crate::traits::{Current, PositionalIterator, SeekableIterator};

/// Iterator over the entries of one directory.
///
/// Holds at most one open [`DirectoryHandle`]. The handle is released as
/// soon as the listing is exhausted, and replaced on every rewind.
#[derive(Debug)]
pub struct DirectoryIterator {
    path: PathBuf,
    flags: Flags,
    handle: Option<DirectoryHandle>,
    current: Option<DirectoryEntry>,
    position: u64,
}

impl DirectoryIterator {
    /// Open `path` with the default flags (`CURRENT_AS_FILEINFO`).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(path, Flags::default())
    }

    /// Open `path` and position the iterator on its first entry.
    pub fn new(path: impl AsRef<Path>, flags: Flags) -> Result<Self> {
        let path = normalize_dir(path.as_ref());
        let mut handle = DirectoryHandle::open(&path)?;
        let current = pull_entry(&mut handle, path.as_os_str(), flags)?;

        Ok(Self {
            handle: current.is_some().then_some(handle),
            path,
            flags,
            current,
            position: 0,
        })
    }

    /// Number of entries advanced past since the last rewind.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flags fixed at construction.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Directory being listed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entry, if any.
    pub fn entry(&self) -> Option<&DirectoryEntry> {
        self.current.as_ref()
    }

    /// Whether an OS listing is currently held.
    pub fn has_open_handle(&self) -> bool {
        self.handle.as_ref().is_some_and(DirectoryHandle::is_open)
    }

    /// Bare name of the current entry.
    pub fn file_name(&self) -> Result<String> {
        self.require_entry("file_name")
            .map(DirectoryEntry::file_name_lossy)
    }

    /// Pathname of the current entry.
    pub fn pathname(&self) -> Result<String> {
        self.require_entry("pathname")
            .map(|e| e.pathname().to_string())
    }

    /// Whether the current entry is `.` or `..`.
    pub fn is_dot(&self) -> bool {
        self.current.as_ref().is_some_and(DirectoryEntry::is_dot)
    }

    /// String form of the current entry: its pathname.
    pub fn try_to_string(&self) -> Result<String> {
        self.require_entry("to_string")
            .map(|e| e.pathname().to_string())
    }

    pub(crate) fn require_entry(&self, op: &str) -> Result<&DirectoryEntry> {
        self.current.as_ref().ok_or_else(|| {
            IterError::logic(format!("Cannot call {op}() without a current entry"))
        })
    }

    /// Render the current entry, using `this` for the self representation.
    pub(crate) fn render<'a, I: ?Sized>(&self, this: &'a I) -> Result<Current<'a, I>> {
        let entry = self.require_entry("current")?;
        match self.flags.current_mode() {
            CurrentMode::Pathname => Ok(Current::Pathname(entry.pathname().to_string())),
            CurrentMode::FileInfo => {
                FileInfo::stat(entry.path(), entry.file_name_lossy()).map(Current::FileInfo)
            }
            CurrentMode::SelfRef => Ok(Current::Iterator(this)),
        }
    }
}

impl PositionalIterator for DirectoryIterator {
    fn current(&self) -> Result<Current<'_, Self>> {
        self.render(self)
    }

    fn key(&self) -> Result<String> {
        let entry = self.require_entry("key")?;
        Ok(match self.flags.key_mode() {
            KeyMode::Pathname => entry.pathname().to_string(),
            KeyMode::Filename => entry.file_name_lossy(),
        })
    }

    fn next(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }

        let next = match self.handle.as_mut() {
            Some(handle) => pull_entry(handle, self.path.as_os_str(), self.flags)?,
            None => None,
        };
        if next.is_none() {
            // Exhausted: release the listing now rather than on drop.
            self.handle = None;
        }
        self.current = next;
        self.position += 1;
        Ok(())
    }

    /// Reopen the listing and move to its first entry.
    ///
    /// The replacement handle is opened before the old one is released, so
    /// two handles are open for a moment. A failed rewind leaves the
    /// iterator exactly as it was.
    fn rewind(&mut self) -> Result<()> {
        let mut handle = DirectoryHandle::open(&self.path)?;
        let first = pull_entry(&mut handle, self.path.as_os_str(), self.flags)?;

        self.handle = first.is_some().then_some(handle);
        self.current = first;
        self.position = 0;
        tracing::trace!(path = %self.path.display(), "rewound directory iterator");
        Ok(())
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }
}

impl SeekableIterator for DirectoryIterator {
    fn seek(&mut self, position: i64) -> Result<()> {
        seek_by_replay(self, position)
    }
}

/// Move `iter` to `position` by forward replay.
///
/// Listings are not randomly addressable: seeking backwards rewinds first.
/// Seeking past the end leaves the iterator exhausted.
pub(crate) fn seek_by_replay<I>(iter: &mut I, position: i64) -> Result<()>
where
    I: PositionalIterator + Positioned,
{
    let Ok(target) = u64::try_from(position) else {
        return Err(IterError::invalid_argument(format!(
            "seek position {position} is negative"
        )));
    };

    if target < iter.position() {
        iter.rewind()?;
    }
    while iter.position() < target && iter.valid() {
        iter.next()?;
    }
    Ok(())
}

/// Iterators that report their position.
pub(crate) trait Positioned {
    fn position(&self) -> u64;
}

impl Positioned for DirectoryIterator {
    fn position(&self) -> u64 {
        self.position
    }
}

/// Pull the next name from `handle`, dropping dot entries if requested.
fn pull_entry(
    handle: &mut DirectoryHandle,
    dir: &OsStr,
    flags: Flags,
) -> Result<Option<DirectoryEntry>> {
    let separator = flags.separator();
    while let Some(name) = handle.next_raw_name()? {
        let entry = DirectoryEntry::new(dir, name, separator);
        if flags.skip_dots() && entry.is_dot() {
            continue;
        }
        return Ok(Some(entry));
    }
    Ok(None)
}

/// Path as given, without trailing separators (the root itself is kept).
///
/// Works on the raw OS string so names that are not UTF-8 survive.
fn normalize_dir(path: &Path) -> PathBuf {
    let raw = path.as_os_str();
    let bytes = raw.as_encoded_bytes();
    let is_separator = |b: &u8| *b == b'/' || char::from(*b) == MAIN_SEPARATOR;

    let keep = bytes.len() - bytes.iter().rev().take_while(|b| is_separator(b)).count();
    let keep = if keep == 0 { bytes.len().min(1) } else { keep };
    if keep == bytes.len() {
        return path.to_path_buf();
    }
    PathBuf::from(truncate_os_str(raw, keep))
}

#[cfg(unix)]
fn truncate_os_str(raw: &OsStr, len: usize) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(&raw.as_bytes()[..len]).to_os_string()
}

#[cfg(not(unix))]
fn truncate_os_str(raw: &OsStr, len: usize) -> OsString {
    // Only ASCII separators are cut, so a UTF-8 path stays UTF-8.
    match raw.to_str() {
        Some(text) => OsString::from(&text[..len]),
        None => raw.to_os_string(),
    }
}
