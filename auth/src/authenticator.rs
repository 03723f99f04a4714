use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::credentials::CredentialStoreError;
use crate::credentials::Identity;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Verifies username/password pairs against a credential store.
///
/// Unknown users and wrong passwords produce the same outcome, and both
/// paths run exactly one hash verification.
pub struct Authenticator<S: CredentialStore> {
    store: Arc<S>,
    password_hasher: PasswordHasher,
    dummy_hash: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    NotAuthenticated,

    #[error("Credential lookup failed: {0}")]
    Store(#[from] CredentialStoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl<S: CredentialStore> Authenticator<S> {
    /// Create a new authenticator.
    ///
    /// Computes a dummy hash with the hasher's cost, used to equalise the
    /// unknown-user path.
    ///
    /// # Arguments
    /// * `store` - Credential lookup
    /// * `password_hasher` - Hasher used for verification
    ///
    /// # Errors
    /// * `PasswordError` - Dummy hash could not be computed
    pub fn new(store: Arc<S>, password_hasher: PasswordHasher) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash("dummy password for unknown users")?;

        Ok(Self {
            store,
            password_hasher,
            dummy_hash,
        })
    }

    /// Verify credentials.
    ///
    /// # Arguments
    /// * `username` - Lookup key
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// Identity of the authenticated user
    ///
    /// # Errors
    /// * `NotAuthenticated` - Unknown username or wrong password
    /// * `Store` - Credential lookup failed
    /// * `Password` / `Internal` - Verification could not run
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthenticationError> {
        let record = self.store.find_credentials(username).await?;

        let stored_hash = record
            .as_ref()
            .map(|r| r.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());

        let is_valid = self.verify_blocking(password, stored_hash).await?;

        match record {
            Some(record) if is_valid => Ok(record.identity),
            _ => Err(AuthenticationError::NotAuthenticated),
        }
    }

    async fn verify_blocking(
        &self,
        password: &str,
        stored_hash: String,
    ) -> Result<bool, AuthenticationError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();

        let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AuthenticationError::Internal(e.to_string()))??;

        Ok(is_valid)
    }
}
