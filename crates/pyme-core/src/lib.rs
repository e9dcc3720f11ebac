#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! PYME Core Library
//!
//! Pure building blocks for the PYME ERP: RUT handling, peso formatting,
//! static lookup tables, and validated request schemas. Nothing here does I/O.
//!
//! # Modules
//!
//! - [`rut`]: RUT validation, formatting, and check-digit computation
//! - [`money`]: CLP and `es-CL` number formatting
//! - [`catalog`]: Regions, units of measure, departments
//! - [`schema`]: Typed request payloads and their validation
//! - [`error`]: Error types and Result alias

pub mod catalog;
pub mod error;
pub mod money;
pub mod rut;
pub mod schema;
pub mod util;

mod proptests;

// Re-exports for convenience
pub use catalog::{Department, Region, Unit};
pub use error::{Error, Result};
pub use rut::{Rut, RutError};
