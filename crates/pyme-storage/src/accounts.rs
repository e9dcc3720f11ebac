//! User registration and login.

use pyme_core::schema::RegisterUser;

use crate::error::{Error, Result};
use crate::models::{DEFAULT_HASH_COST, User, UserSummary};
use crate::traits::UserStore;

/// Registers and authenticates users against a [`UserStore`].
///
/// Passwords are bcrypt-hashed on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct AccountService<S> {
    store: S,
    hash_cost: u32,
}

impl<S: UserStore> AccountService<S> {
    /// Create a service over `store`, hashing at [`DEFAULT_HASH_COST`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            hash_cost: DEFAULT_HASH_COST,
        }
    }

    /// Use a different bcrypt cost for new passwords.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a sign-up and create the user.
    ///
    /// Fails with [`Error::UserExists`] when the email is already registered.
    pub async fn register(&self, request: RegisterUser) -> Result<UserSummary> {
        let registration = request.validate()?;

        if self.store.find_by_email(&registration.email).await?.is_some() {
            tracing::warn!(email = %registration.email, "Registration for existing user");
            return Err(Error::UserExists {
                email: registration.email,
            });
        }

        let cost = self.hash_cost;
        let user =
            tokio::task::spawn_blocking(move || User::from_registration(registration, cost))
                .await??;
        let summary = user.summary();
        self.store.insert(user).await?;

        tracing::info!(user_id = %summary.id, email = %summary.email, "User registered");
        Ok(summary)
    }

    /// Check credentials. Returns `None` for an unknown email or a wrong
    /// password, without saying which.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<UserSummary>> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.store.find_by_email(&email).await? else {
            tracing::debug!(email = %email, "Login for unknown user");
            return Ok(None);
        };

        let candidate = password.to_string();
        let (user, matches) = tokio::task::spawn_blocking(move || {
            let matches = user.verify_password(&candidate);
            (user, matches)
        })
        .await?;

        if matches {
            tracing::debug!(user_id = %user.id, "Login succeeded");
            Ok(Some(user.summary()))
        } else {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            Ok(None)
        }
    }
}
