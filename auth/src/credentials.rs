use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Role classifier carried by identities and token claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Role assigned to newly registered users.
    pub const USER: &'static str = "user";

    /// Role for which ownership filtering is waived.
    pub const ADMIN: &'static str = "admin";

    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    pub fn user() -> Self {
        Self::new(Self::USER)
    }

    pub fn admin() -> Self {
        Self::new(Self::ADMIN)
    }

    pub fn is_admin(&self) -> bool {
        self.0 == Self::ADMIN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::user()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authenticated identity, safe to hand to token issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }
}

/// Stored identity as returned by a credential store.
#[derive(Clone)]
pub struct CredentialRecord {
    pub identity: Identity,
    pub password_hash: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("identity", &self.identity)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Error raised by a credential store that could not answer a lookup.
#[derive(Debug, Clone, Error)]
#[error("Credential store unavailable: {0}")]
pub struct CredentialStoreError(pub String);

/// Read-only lookup of stored credentials by username.
///
/// Implemented by the persistence layer of each service.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find the stored credentials for a username.
    ///
    /// # Returns
    /// The record, or `None` when no user has this username
    ///
    /// # Errors
    /// * `CredentialStoreError` - The backing store failed
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, CredentialStoreError>;
}
