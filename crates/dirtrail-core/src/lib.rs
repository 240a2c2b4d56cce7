//! Core types for dirtrail.
//!
//! This crate provides the values shared by the iterators: the behavior
//! flags, the error taxonomy, entry and file-info types, and walk
//! configuration.

mod config;
mod entry;
mod error;
mod flags;

pub use config::{WalkConfig, WalkConfigBuilder, WalkMode};
pub use entry::{is_dot_name, DirectoryEntry, EntryKind, FileInfo, InodeInfo, Timestamps};
pub use error::{IterError, Result};
pub use flags::{CurrentMode, Flags, KeyMode};
