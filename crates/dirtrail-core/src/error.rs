//! Error types for directory iteration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by directory handles and iterators.
///
/// `NotFound`, `PermissionDenied`, `NotADirectory` and `Io` make up the
/// I/O class; `Logic` covers operations called in an invalid state and
/// `InvalidArgument` covers rejected arguments.
#[derive(Debug, Error)]
pub enum IterError {
    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Operation invoked while the iterator is in the wrong state.
    #[error("{message}")]
    Logic { message: String },

    /// Argument rejected by the operation.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Result alias used across dirtrail.
pub type Result<T> = std::result::Result<T, IterError>;

impl IterError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a logic error.
    pub fn logic(message: impl Into<String>) -> Self {
        Self::Logic {
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True for every I/O class variant.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::PermissionDenied { .. }
                | Self::NotADirectory { .. }
                | Self::Io { .. }
        )
    }

    /// True for state violations.
    pub fn is_logic(&self) -> bool {
        matches!(self, Self::Logic { .. })
    }

    /// True for rejected arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
