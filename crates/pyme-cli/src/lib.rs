//! # pyme-cli
//!
//! The `pyme` command-line tool:
//! - RUT validation, formatting, and check-digit completion
//! - Chilean peso formatting
//! - Region, unit, and department listings
//! - Configuration file management

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use config::PymeConfig;
pub use error::{Error, Result};
