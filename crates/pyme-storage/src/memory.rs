//! In-memory stores, for tests and single-process demos.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pyme_core::Rut;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{Client, CompanyId, User};
use crate::traits::{ClientStore, UserStore};

/// Users keyed by lowercased email.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no user is registered.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&email.to_lowercase()).cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        let key = user.email.to_lowercase();
        let mut users = self.users.write().await;
        if users.contains_key(&key) {
            return Err(Error::UserExists { email: key });
        }
        users.insert(key, user);
        Ok(())
    }
}

/// Clients of every company, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryClientStore {
    clients: Arc<RwLock<Vec<Client>>>,
}

impl MemoryClientStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_by_rut(&self, company: &CompanyId, rut: &Rut) -> Result<Option<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .iter()
            .find(|c| &c.company_id == company && c.rut() == rut)
            .cloned())
    }

    async fn insert(&self, client: Client) -> Result<()> {
        let mut clients = self.clients.write().await;
        if clients
            .iter()
            .any(|c| c.company_id == client.company_id && c.rut() == client.rut())
        {
            return Err(Error::DuplicateRut { rut: *client.rut() });
        }
        clients.push(client);
        Ok(())
    }

    async fn list(&self, company: &CompanyId) -> Result<Vec<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .iter()
            .rev()
            .filter(|c| &c.company_id == company)
            .cloned()
            .collect())
    }
}
