//! Error types for Docshelf.
//!
//! Library crates use [`DocshelfError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Docshelf operations.
#[derive(Debug, thiserror::Error)]
pub enum DocshelfError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The workspace target directory already exists. Nothing was created.
    #[error("workspace already exists at {path:?}")]
    AlreadyExists { path: PathBuf },

    /// Network/HTTP error while fetching the manifest.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed manifest JSON or a malformed field within a record.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocshelfError>;

impl DocshelfError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
