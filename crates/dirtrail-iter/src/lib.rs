//! Stateful directory iterators for dirtrail.
//!
//! This crate provides lazy, positional iteration over directory listings
//! and on-demand descent into subdirectories.
//!
//! # Overview
//!
//! - [`DirectoryHandle`] owns one open OS listing and yields raw names.
//! - [`DirectoryIterator`] exposes a listing through the
//!   current/key/next/rewind/valid contract, plus `seek`.
//! - [`RecursiveDirectoryIterator`] adds `has_children`/`get_children` and
//!   tracks the sub-path travelled from the original root.
//! - [`TreeWalker`] drives recursive iterators depth-first.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirtrail_iter::{Flags, PositionalIterator, RecursiveDirectoryIterator, RecursiveIterator};
//!
//! let mut iter = RecursiveDirectoryIterator::new("/path/to/dir", Flags::SKIP_DOTS).unwrap();
//! while iter.valid() {
//!     println!("{}", iter.sub_pathname().unwrap());
//!     if iter.has_children() {
//!         let children = iter.get_children().unwrap();
//!         println!("  -> {} ({})", children.sub_path(), children.path().display());
//!     }
//!     iter.next().unwrap();
//! }
//! ```
//!
//! # Walking a tree
//!
//! ```rust,no_run
//! use dirtrail_iter::{TreeWalker, WalkConfig};
//!
//! let walker = TreeWalker::new(WalkConfig::new("/path/to/dir")).unwrap();
//! for entry in walker.filter_map(Result::ok) {
//!     println!("{}{}", "  ".repeat(entry.depth), entry.sub_pathname);
//! }
//! ```

mod directory;
mod handle;
mod recursive;
mod traits;
mod walk;

pub use directory::DirectoryIterator;
pub use handle::{open_handles, DirectoryHandle};
pub use recursive::RecursiveDirectoryIterator;
pub use traits::{Current, PositionalIterator, RecursiveIterator, SeekableIterator};
pub use walk::{TreeWalker, WalkEntry};

// Re-export core types for convenience
pub use dirtrail_core::{
    CurrentMode, DirectoryEntry, EntryKind, FileInfo, Flags, IterError, KeyMode, Result,
    Timestamps, WalkConfig, WalkMode,
};
