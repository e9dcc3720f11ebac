//! Error types for pyme-cli

use std::path::{Path, PathBuf};

use pyme_core::RutError;
use thiserror::Error;

/// Result type alias for pyme-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pyme-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from pyme-core
    #[error("Core error: {0}")]
    Core(#[from] pyme_core::Error),

    /// A RUT argument was rejected
    #[error("{0}")]
    Rut(#[from] RutError),

    /// Configuration could not be located, parsed, or written
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A command-line argument is unusable
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What went wrong
        message: String,
    },

    /// Filesystem failure
    #[error("I/O error{}: {source}", at_path(.path))]
    Io {
        /// Path involved, when known
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }
}

fn at_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}
