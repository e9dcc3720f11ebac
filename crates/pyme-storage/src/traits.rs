//! Storage traits for users and clients.
//!
//! Services are generic over these traits so the in-memory adapters in
//! [`crate::memory`] can be swapped for a database without touching the
//! validation and logging around them.

use std::sync::Arc;

use async_trait::async_trait;
use pyme_core::Rut;

use crate::error::Result;
use crate::models::{Client, CompanyId, User};

/// Persistence for registered users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email. `email` is expected lowercased.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Store a new user.
    ///
    /// Fails with [`Error::UserExists`](crate::Error::UserExists) if the
    /// email is taken, even when the caller checked first.
    async fn insert(&self, user: User) -> Result<()>;
}

/// Persistence for company clients.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Look up a company's client by RUT.
    async fn find_by_rut(&self, company: &CompanyId, rut: &Rut) -> Result<Option<Client>>;

    /// Store a new client.
    ///
    /// Fails with [`Error::DuplicateRut`](crate::Error::DuplicateRut) if the
    /// company already has a client with that RUT.
    async fn insert(&self, client: Client) -> Result<()>;

    /// A company's clients, newest first.
    async fn list(&self, company: &CompanyId) -> Result<Vec<Client>>;
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        (**self).find_by_email(email).await
    }

    async fn insert(&self, user: User) -> Result<()> {
        (**self).insert(user).await
    }
}

#[async_trait]
impl<T: ClientStore + ?Sized> ClientStore for Arc<T> {
    async fn find_by_rut(&self, company: &CompanyId, rut: &Rut) -> Result<Option<Client>> {
        (**self).find_by_rut(company, rut).await
    }

    async fn insert(&self, client: Client) -> Result<()> {
        (**self).insert(client).await
    }

    async fn list(&self, company: &CompanyId) -> Result<Vec<Client>> {
        (**self).list(company).await
    }
}
