//! # pyme-storage
//!
//! Persistence for the PYME ERP back office.
//!
//! This crate provides:
//! - Storage traits ([`UserStore`], [`ClientStore`])
//! - In-memory implementations (for tests and demos)
//! - [`AccountService`] for registration and login
//! - [`ClientService`] for per-company client records
//!
//! Request payloads are validated with `pyme-core` before anything is stored.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accounts;
pub mod clients;
pub mod error;
pub mod memory;
pub mod models;
pub mod traits;

pub use accounts::AccountService;
pub use clients::ClientService;
pub use error::{Error, Result};
pub use memory::{MemoryClientStore, MemoryUserStore};
pub use models::{
    Client, CompanyId, DEFAULT_HASH_COST, MIN_HASH_COST, PasswordDigest, User, UserSummary,
};
pub use traits::{ClientStore, UserStore};
