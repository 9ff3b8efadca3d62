//! Error types for mdpress.
//!
//! Library crates use [`MdpressError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all mdpress operations.
///
/// The conversion core itself never fails — every input line classifies,
/// falling back to a paragraph. These variants cover the collaborator
/// boundary: command-line input, files, and config.
#[derive(Debug, thiserror::Error)]
pub enum MdpressError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Rejected command-line input (bad extension, missing file).
    #[error("usage error: {message}")]
    Usage { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MdpressError>;

impl MdpressError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a usage error from any displayable message.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage {
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
