use std::io;

use thiserror::Error;

/// Failures surfaced by the note store. The TUI turns every one of these
/// into an error banner; the CLI prints them and exits non-zero.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("invalid note name: {0:?}")]
    InvalidName(String),

    #[error("I/O error on {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Classifies an `io::Error` raised while touching `name`.
    pub fn from_io(name: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied(name.to_string()),
            io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(name.to_string()),
            _ => StoreError::Io {
                name: name.to_string(),
                source: err,
            },
        }
    }
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
