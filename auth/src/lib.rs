//! Authentication kernel
//!
//! Stateless building blocks shared by services:
//! - Password hashing (Argon2id)
//! - Credential verification against a service-provided store
//! - JWT access token issuance and validation
//! - Ownership scoping derived from validated claims
//!
//! Persistence and transport stay in the services: they implement
//! [`CredentialStore`] and hand bearer strings to [`TokenValidator`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Identity, Role, SigningKey, TokenIssuer, TokenValidator};
//! use chrono::Duration;
//!
//! let key = SigningKey::hs256(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(key.clone());
//! let validator = TokenValidator::new(key);
//!
//! let identity = Identity::new(7, "alice", Role::user());
//! let token = issuer.issue(&identity, Duration::minutes(20)).unwrap();
//! let claims = validator.validate(&token).unwrap();
//! assert_eq!(claims.user_id, 7);
//! ```

pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod ownership;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use credentials::CredentialRecord;
pub use credentials::CredentialStore;
pub use credentials::CredentialStoreError;
pub use credentials::Identity;
pub use credentials::Role;
pub use jwt::Claims;
pub use jwt::InvalidToken;
pub use jwt::JwtError;
pub use jwt::SigningKey;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use ownership::OwnershipScope;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::BearerToken;
