//! Directory entry and file-info types.

use std::ffi::{OsStr, OsString};
use std::fs::{FileType, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::{IterError, Result};

/// Type of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (not followed).
    Symlink,
    /// Other file types (sockets, devices, etc.).
    Other,
}

impl EntryKind {
    /// Classify a file type reported by the host.
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, EntryKind::Symlink)
    }

    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "dir",
            EntryKind::Symlink => "link",
            EntryKind::Other => "other",
        }
    }
}

/// Inode information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InodeInfo {
    /// Inode number.
    pub inode: u64,
    /// Device ID.
    pub device: u64,
}

impl InodeInfo {
    /// Create new inode info.
    pub fn new(inode: u64, device: u64) -> Self {
        Self { inode, device }
    }
}

/// File metadata timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Last modification time.
    pub modified: SystemTime,
    /// Last access time (if available).
    pub accessed: Option<SystemTime>,
    /// Creation time (if available, platform-dependent).
    pub created: Option<SystemTime>,
}

impl Timestamps {
    /// Read every available timestamp from metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            modified: metadata.modified().unwrap_or(std::time::UNIX_EPOCH),
            accessed: metadata.accessed().ok(),
            created: metadata.created().ok(),
        }
    }
}

/// One name produced by a directory listing, joined to its directory.
///
/// The joined path keeps the raw OS bytes; only the rendered pathname is
/// converted to UTF-8. The kind is never stored; it is looked up each time
/// it is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: OsString,
    path: PathBuf,
    pathname: String,
}

impl DirectoryEntry {
    /// Join `name` onto `dir` with the given separator.
    pub fn new(dir: &OsStr, name: OsString, separator: char) -> Self {
        let mut joined = OsString::with_capacity(dir.len() + name.len() + 1);
        joined.push(dir);
        let ends_with_separator = dir
            .as_encoded_bytes()
            .last()
            .is_some_and(|&b| char::from(b) == separator);
        if !dir.is_empty() && !ends_with_separator {
            joined.push(separator.to_string());
        }
        joined.push(&name);

        let path = PathBuf::from(joined);
        let pathname = path.to_string_lossy().into_owned();
        Self {
            name,
            path,
            pathname,
        }
    }

    /// Raw entry name as returned by the OS.
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Entry name, lossily converted to UTF-8.
    pub fn file_name_lossy(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }

    /// Directory path joined with the entry name, as the OS sees it.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory path joined with the entry name, for display.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Whether this is the `.` or `..` entry.
    pub fn is_dot(&self) -> bool {
        is_dot_name(&self.name)
    }

    /// Look up the entry kind without following symlinks.
    pub fn kind(&self) -> Result<EntryKind> {
        std::fs::symlink_metadata(&self.path)
            .map(|m| EntryKind::from_file_type(m.file_type()))
            .map_err(|e| IterError::io(&self.path, e))
    }
}

/// Check whether a raw name is `.` or `..`.
pub fn is_dot_name(name: &OsStr) -> bool {
    name == "." || name == ".."
}

/// Snapshot of one entry's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    /// Directory path joined with the file name.
    pub pathname: String,

    /// Bare file name.
    pub file_name: CompactString,

    /// Entry type (symlinks are not followed).
    pub kind: EntryKind,

    /// Size in bytes.
    pub size: u64,

    /// Unix permission bits (0 on other platforms).
    pub permissions: u32,

    /// File metadata timestamps.
    pub timestamps: Timestamps,

    /// Inode info where the platform has one.
    pub inode: Option<InodeInfo>,

    /// Link target for symlinks.
    pub link_target: Option<CompactString>,
}

impl FileInfo {
    /// Stat `path` without following symlinks.
    pub fn stat(path: impl AsRef<Path>, file_name: impl Into<CompactString>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::symlink_metadata(path).map_err(|e| IterError::io(path, e))?;
        let kind = EntryKind::from_file_type(metadata.file_type());

        let link_target = if kind.is_symlink() {
            std::fs::read_link(path)
                .ok()
                .map(|p| CompactString::new(p.to_string_lossy()))
        } else {
            None
        };

        Ok(Self {
            file_name: file_name.into(),
            kind,
            size: metadata.len(),
            permissions: permission_bits(&metadata),
            timestamps: Timestamps::from_metadata(&metadata),
            inode: inode_info(&metadata),
            link_target,
            pathname: path.to_string_lossy().into_owned(),
        })
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this entry is a symlink.
    pub fn is_symlink(&self) -> bool {
        self.kind.is_symlink()
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(self.file_name.as_str())
            .extension()
            .and_then(|e| e.to_str())
    }

    /// Check if any executable bit is set.
    pub fn is_executable(&self) -> bool {
        self.permissions & 0o111 != 0
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    metadata.mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &Metadata) -> u32 {
    0
}

#[cfg(unix)]
fn inode_info(metadata: &Metadata) -> Option<InodeInfo> {
    Some(InodeInfo::new(metadata.ino(), metadata.dev()))
}

#[cfg(not(unix))]
fn inode_info(_metadata: &Metadata) -> Option<InodeInfo> {
    None // Windows doesn't have inodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dir: &str, name: &str) -> DirectoryEntry {
        DirectoryEntry::new(OsStr::new(dir), OsString::from(name), '/')
    }

    #[test]
    fn test_entry_pathname_join() {
        let e = entry("/tmp/root", "a.txt");
        assert_eq!(e.pathname(), "/tmp/root/a.txt");
        assert_eq!(e.path(), Path::new("/tmp/root/a.txt"));
        assert_eq!(e.file_name_lossy(), "a.txt");

        assert_eq!(entry("/", "etc").pathname(), "/etc");
    }

    #[test]
    fn test_is_dot() {
        assert!(entry("x", ".").is_dot());
        assert!(entry("x", "..").is_dot());
        assert!(!entry("x", ".hidden").is_dot());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_keeps_raw_path() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"d\xffir").to_os_string();
        let e = DirectoryEntry::new(OsStr::new("/data"), name, '/');

        assert_eq!(e.path().as_os_str().as_bytes(), b"/data/d\xffir");
        assert_eq!(e.pathname(), "/data/d\u{FFFD}ir");
    }

    #[test]
    fn test_executable_bits() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("plain");
        std::fs::write(&path, "x").unwrap();

        let mut info = FileInfo::stat(&path, "plain").unwrap();
        info.permissions = 0o644;
        assert!(!info.is_executable());
        info.permissions = 0o754;
        assert!(info.is_executable());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(EntryKind::Directory.label(), "dir");
        assert!(EntryKind::Symlink.is_symlink());
        assert!(!EntryKind::Other.is_file());
    }
}
