//! Error types for the PYME core library.

use crate::rut::RutError;

/// Errors that can occur while validating or converting PYME data.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A RUT failed to parse or validate.
    #[error("RUT error: {0}")]
    Rut(#[from] RutError),

    /// A request payload failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation, in wire (camelCase) form
        field: Option<String>,
        /// What went wrong, suitable for showing to the end user
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value is not present in one of the static lookup tables.
    #[error("Unknown {table}: {value}")]
    UnknownEntry {
        /// Name of the lookup table (e.g. "region")
        table: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Convenience `Result` type alias for PYME core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error was caused by the caller's input.
    ///
    /// Client errors map to a 400-style response; anything else is a
    /// server-side fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Rut(_) => true,
            Error::Validation { .. } => true,
            Error::UnknownEntry { .. } => true,
            Error::Serialization(e) => e.is_data() || e.is_syntax() || e.is_eof(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new unknown lookup-table entry error.
    pub fn unknown_entry<S: Into<String>>(table: &'static str, value: S) -> Self {
        Error::UnknownEntry {
            table,
            value: value.into(),
        }
    }

    /// Returns the offending field name, if this is a field validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}
