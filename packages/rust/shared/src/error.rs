//! Error types for shopdash.
//!
//! Library crates use [`ShopdashError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all shopdash operations.
#[derive(Debug, thiserror::Error)]
pub enum ShopdashError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching products.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed input (JSON payloads, selector tokens).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A required form field was missing or a data set broke an invariant.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// No product with the given identifier exists in the catalog.
    #[error("product {0} not found")]
    NotFound(i64),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rendering an export document failed.
    #[error("export error: {0}")]
    Export(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShopdashError>;

impl ShopdashError {
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

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ShopdashError::config("page_size must be at least 1");
        assert_eq!(err.to_string(), "config error: page_size must be at least 1");

        let err = ShopdashError::validation("name is required");
        assert!(err.to_string().contains("name is required"));

        let err = ShopdashError::NotFound(42);
        assert_eq!(err.to_string(), "product 42 not found");
    }

    #[test]
    fn io_error_keeps_path() {
        let err = ShopdashError::io(
            "/tmp/products.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("products.csv"));
        assert!(msg.contains("denied"));
    }
}
