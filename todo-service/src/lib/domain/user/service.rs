use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::BearerToken;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;

use crate::domain::user::credentials::UserCredentialStore;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    authenticator: Authenticator<UserCredentialStore<UR>>,
    token_issuer: TokenIssuer,
    access_token_ttl: Duration,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher for new and changed passwords
    /// * `token_issuer` - Access token issuer
    /// * `access_token_ttl` - Lifetime of issued access tokens
    ///
    /// # Errors
    /// * `PasswordError` - Authenticator could not be initialised
    pub fn new(
        repository: Arc<UR>,
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        access_token_ttl: Duration,
    ) -> Result<Self, PasswordError> {
        let authenticator = Authenticator::new(
            Arc::new(UserCredentialStore::new(Arc::clone(&repository))),
            password_hasher.clone(),
        )?;

        Ok(Self {
            repository,
            password_hasher,
            authenticator,
            token_issuer,
            access_token_ttl,
        })
    }

    async fn hash_password(&self, password: &str) -> Result<String, UserError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn find_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password.expose()).await?;

        let user = NewUser {
            username: command.username,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            role: command.role,
            phone_number: command.phone_number,
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            role = %created_user.role,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<BearerToken, UserError> {
        let identity = self
            .authenticator
            .authenticate(username, password)
            .await
            .map_err(|e| match e {
                AuthenticationError::NotAuthenticated => {
                    tracing::info!(username = %username, "Login rejected");
                    UserError::InvalidCredentials
                }
                AuthenticationError::Store(err) => UserError::DatabaseError(err.to_string()),
                AuthenticationError::Password(err) => UserError::Password(err),
                AuthenticationError::Internal(msg) => UserError::Unknown(msg),
            })?;

        let access_token = self.token_issuer.issue(&identity, self.access_token_ttl)?;

        tracing::info!(user_id = identity.user_id, "Access token issued");

        Ok(BearerToken::new(access_token))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_user(id).await
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let user = self.find_user(id).await?;

        if !self
            .verify_password(&command.current_password, &user.password_hash)
            .await?
        {
            return Err(UserError::InvalidCredentials);
        }

        let password_hash = self.hash_password(command.new_password.expose()).await?;
        self.repository
            .update_password_hash(id, &password_hash)
            .await?;

        tracing::info!(user_id = %id, "Password changed");

        Ok(())
    }

    async fn update_phone_number(
        &self,
        id: &UserId,
        phone_number: PhoneNumber,
    ) -> Result<(), UserError> {
        self.repository.update_phone_number(id, &phone_number).await
    }
}
