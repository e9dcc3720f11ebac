//! Stored records: users, clients, and the ids that scope them.

use std::fmt;

use chrono::{DateTime, Utc};
use pyme_core::schema::{ClientDraft, Registration};
use pyme_core::Rut;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Identifier of the company (tenant) that owns a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(String);

impl CompanyId {
    /// Creates a new company ID from a string.
    ///
    /// ```
    /// use pyme_storage::CompanyId;
    ///
    /// let id = CompanyId::new("acme");
    /// assert_eq!(id.as_str(), "acme");
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the company ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CompanyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// Passwords
// ============================================================================

/// bcrypt cost used for new passwords.
pub const DEFAULT_HASH_COST: u32 = 12;

/// Lowest cost bcrypt accepts. Only worth using in tests.
pub const MIN_HASH_COST: u32 = 4; // bcrypt::MIN_COST (private in the bcrypt crate)

/// bcrypt hash of a password, in its `$2b$` text form.
///
/// The plain password is never kept. Hashing is deliberately slow, so
/// async callers should run it off the runtime threads.
#[derive(Clone)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `password` with a fresh salt at the given bcrypt cost.
    pub fn new(password: &str, cost: u32) -> Result<Self> {
        Ok(Self(bcrypt::hash(password, cost)?))
    }

    /// Check a candidate password against the digest.
    pub fn verify(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.0).unwrap_or(false)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

// ============================================================================
// Users
// ============================================================================

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user id
    pub id: Uuid,
    /// Lowercased login email
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Company name given at sign-up
    pub company_name: Option<String>,
    /// Company RUT given at sign-up
    pub company_rut: Option<Rut>,
    /// When the user registered
    pub created_at: DateTime<Utc>,
    password: PasswordDigest,
}

impl User {
    /// Build a new user from a validated registration, hashing its password
    /// at bcrypt `cost`.
    pub fn from_registration(registration: Registration, cost: u32) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            password: PasswordDigest::new(&registration.password, cost)?,
            email: registration.email,
            first_name: registration.first_name,
            last_name: registration.last_name,
            company_name: registration.company_name,
            company_rut: registration.company_rut,
            created_at: Utc::now(),
        })
    }

    /// Full display name, "first last".
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check a candidate password.
    pub fn verify_password(&self, password: &str) -> bool {
        self.password.verify(password)
    }

    /// The public view of this user.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            name: self.name(),
        }
    }
}

/// What is returned to callers about a user: never the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// Unique user id
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Full display name
    pub name: String,
}

// ============================================================================
// Clients
// ============================================================================

/// A stored client of a company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client id
    pub id: Uuid,
    /// Owning company
    pub company_id: CompanyId,
    /// Validated client fields
    #[serde(flatten)]
    pub details: ClientDraft,
    /// Inactive clients are kept but hidden from new documents
    pub is_active: bool,
    /// When the client was created
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// A new, active client owned by `company_id`.
    pub fn new(company_id: CompanyId, details: ClientDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            details,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// The client's RUT.
    pub fn rut(&self) -> &Rut {
        &self.details.rut
    }
}
