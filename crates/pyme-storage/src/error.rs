//! Error types for pyme-storage

use pyme_core::Rut;
use thiserror::Error;

/// Result type alias for pyme-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pyme-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from pyme-core (payload validation, RUT parsing)
    #[error("Core error: {0}")]
    Core(#[from] pyme_core::Error),

    /// A user with this email is already registered.
    #[error("Usuario ya existe")]
    UserExists {
        /// The conflicting (lowercased) email
        email: String,
    },

    /// The company already has a client with this RUT.
    #[error("Ya existe un cliente con este RUT")]
    DuplicateRut {
        /// The conflicting RUT
        rut: Rut,
    },

    /// bcrypt failed to hash a password
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// A blocking hash task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// Whether this error should be reported back to the caller as a bad
    /// request rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Core(e) => e.is_client_error(),
            Error::UserExists { .. } | Error::DuplicateRut { .. } => true,
            Error::PasswordHash(_) | Error::Task(_) => false,
        }
    }
}
