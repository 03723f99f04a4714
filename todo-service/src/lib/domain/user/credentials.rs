use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialRecord;
use auth::CredentialStore;
use auth::CredentialStoreError;
use auth::Identity;

use crate::user::ports::UserRepository;

/// Exposes the user repository to the authenticator as a credential store.
///
/// Deactivated accounts are reported as unknown.
pub struct UserCredentialStore<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserCredentialStore<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> CredentialStore for UserCredentialStore<UR>
where
    UR: UserRepository,
{
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, CredentialStoreError> {
        let user = self.repository.find_by_username(username).await?;

        Ok(user.filter(|u| u.is_active).map(|u| CredentialRecord {
            identity: Identity::new(u.id.0, u.username.as_str(), u.role),
            password_hash: u.password_hash,
        }))
    }
}
