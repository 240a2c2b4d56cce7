//! Open directory listings.

use std::ffi::OsString;
use std::fs::ReadDir;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use dirtrail_core::{IterError, Result};

/// Number of handles currently open in this process.
static OPEN_HANDLES: AtomicUsize = AtomicUsize::new(0);

/// Number of directory handles currently open in this process.
pub fn open_handles() -> usize {
    OPEN_HANDLES.load(Ordering::SeqCst)
}

/// One open OS directory listing.
///
/// Yields raw entry names once, in host order. The host API omits `.` and
/// `..`, so they are produced first to give every listing the same shape.
#[derive(Debug)]
pub struct DirectoryHandle {
    path: PathBuf,
    /// `.` and `..` still to be produced.
    pending_dots: u8,
    read_dir: Option<ReadDir>,
}

impl DirectoryHandle {
    /// Open a listing of `path`.
    ///
    /// Fails if the path is missing, unreadable or not a directory; no
    /// resources are held on failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let read_dir = std::fs::read_dir(path).map_err(|e| IterError::io(path, e))?;
        OPEN_HANDLES.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(path = %path.display(), "opened directory handle");

        Ok(Self {
            path: path.to_path_buf(),
            pending_dots: 2,
            read_dir: Some(read_dir),
        })
    }

    /// Path this handle lists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the handle still holds the OS listing.
    pub fn is_open(&self) -> bool {
        self.read_dir.is_some()
    }

    /// Produce the next raw name, or `None` once exhausted.
    ///
    /// Once `None` has been returned the listing is closed and every later
    /// call returns `None` again.
    pub fn next_raw_name(&mut self) -> Result<Option<OsString>> {
        let Some(read_dir) = self.read_dir.as_mut() else {
            return Ok(None);
        };

        match self.pending_dots {
            2 => {
                self.pending_dots = 1;
                return Ok(Some(OsString::from(".")));
            }
            1 => {
                self.pending_dots = 0;
                return Ok(Some(OsString::from("..")));
            }
            _ => {}
        }

        match read_dir.next() {
            Some(Ok(entry)) => Ok(Some(entry.file_name())),
            Some(Err(err)) => Err(IterError::io(&self.path, err)),
            None => {
                self.close();
                Ok(None)
            }
        }
    }

    /// Release the OS listing. Safe to call more than once.
    pub fn close(&mut self) {
        if self.read_dir.take().is_some() {
            OPEN_HANDLES.fetch_sub(1, Ordering::SeqCst);
            tracing::trace!(path = %self.path.display(), "closed directory handle");
        }
    }
}

impl Drop for DirectoryHandle {
    fn drop(&mut self) {
        self.close();
    }
}
