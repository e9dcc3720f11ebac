//! Client creation and listing.

use pyme_core::schema::NewClient;

use crate::error::{Error, Result};
use crate::models::{Client, CompanyId};
use crate::traits::ClientStore;

/// Creates and lists a company's clients through a [`ClientStore`].
#[derive(Debug, Clone)]
pub struct ClientService<S> {
    store: S,
}

impl<S: ClientStore> ClientService<S> {
    /// Create a service over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate a new-client payload and store it for `company`.
    ///
    /// The RUT must be unique within the company.
    pub async fn create(&self, company: &CompanyId, request: NewClient) -> Result<Client> {
        let draft = request.validate()?;

        if self.store.find_by_rut(company, &draft.rut).await?.is_some() {
            tracing::warn!(company = %company, rut = %draft.rut, "Client RUT already registered");
            return Err(Error::DuplicateRut { rut: draft.rut });
        }

        let client = Client::new(company.clone(), draft);
        self.store.insert(client.clone()).await?;

        tracing::info!(
            company = %company,
            client_id = %client.id,
            rut = %client.rut(),
            "Client created"
        );
        Ok(client)
    }

    /// The company's clients, newest first.
    pub async fn list(&self, company: &CompanyId) -> Result<Vec<Client>> {
        let clients = self.store.list(company).await?;
        tracing::debug!(company = %company, count = clients.len(), "Listed clients");
        Ok(clients)
    }
}
