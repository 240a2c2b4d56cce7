//! Iterator behavior flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Bitmask controlling how an iterator renders and filters entries.
    ///
    /// The value is fixed when an iterator is constructed and copied into
    /// every child iterator produced by descent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Flags: u32 {
        /// `current()` yields a [`FileInfo`](crate::FileInfo) value.
        const CURRENT_AS_FILEINFO = 0x0010;
        /// `current()` yields the entry's pathname.
        const CURRENT_AS_PATHNAME = 0x0020;
        /// `current()` yields the iterator itself.
        const CURRENT_AS_SELF     = 0x0040;
        /// `key()` yields the entry's pathname.
        const KEY_AS_PATHNAME     = 0x0080;
        /// `key()` yields the bare file name.
        const KEY_AS_FILENAME     = 0x0100;
        /// Descend through symbolic links to directories.
        const FOLLOW_SYMLINKS     = 0x0200;
        /// Never yield `.` or `..`.
        const SKIP_DOTS           = 0x1000;
        /// Always join paths with `/`.
        const UNIX_PATHS          = 0x2000;
    }
}

/// Effective rendering of `current()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentMode {
    /// Render as a file-info value.
    #[default]
    FileInfo,
    /// Render as a pathname string.
    Pathname,
    /// Render as the iterator itself.
    SelfRef,
}

/// Effective rendering of `key()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// Full pathname.
    #[default]
    Pathname,
    /// Bare file name.
    Filename,
}

impl Default for Flags {
    fn default() -> Self {
        Flags::CURRENT_AS_FILEINFO | Flags::KEY_AS_PATHNAME
    }
}

impl Flags {
    /// Resolve which `current()` representation is active.
    ///
    /// Pathname wins over self, which wins over file-info.
    pub fn current_mode(self) -> CurrentMode {
        if self.contains(Flags::CURRENT_AS_PATHNAME) {
            CurrentMode::Pathname
        } else if self.contains(Flags::CURRENT_AS_SELF) {
            CurrentMode::SelfRef
        } else {
            CurrentMode::FileInfo
        }
    }

    /// Resolve which `key()` representation is active.
    pub fn key_mode(self) -> KeyMode {
        if self.contains(Flags::KEY_AS_FILENAME) {
            KeyMode::Filename
        } else {
            KeyMode::Pathname
        }
    }

    /// Whether `.` and `..` are filtered out.
    pub fn skip_dots(self) -> bool {
        self.contains(Flags::SKIP_DOTS)
    }

    /// Whether symlinked directories count as directories for recursion.
    pub fn follow_symlinks(self) -> bool {
        self.contains(Flags::FOLLOW_SYMLINKS)
    }

    /// Separator used when building pathnames.
    pub fn separator(self) -> char {
        if self.contains(Flags::UNIX_PATHS) {
            '/'
        } else {
            std::path::MAIN_SEPARATOR
        }
    }

    /// Build flags from explicit modes plus the boolean options.
    pub fn from_modes(current: CurrentMode, key: KeyMode) -> Self {
        let current = match current {
            CurrentMode::FileInfo => Flags::CURRENT_AS_FILEINFO,
            CurrentMode::Pathname => Flags::CURRENT_AS_PATHNAME,
            CurrentMode::SelfRef => Flags::CURRENT_AS_SELF,
        };
        let key = match key {
            KeyMode::Pathname => Flags::KEY_AS_PATHNAME,
            KeyMode::Filename => Flags::KEY_AS_FILENAME,
        };
        current | key
    }
}
