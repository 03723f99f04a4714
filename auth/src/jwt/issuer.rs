use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Header;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;
use super::key::SigningKey;
use crate::credentials::Identity;

/// Issues signed access tokens for authenticated identities.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: SigningKey,
}

impl TokenIssuer {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Issue a token that expires `ttl` from now.
    ///
    /// # Arguments
    /// * `identity` - Identity already verified by the caller
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - Expiration overflows the timestamp range
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, identity: &Identity, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(identity, ttl, Utc::now())
    }

    /// Issue a token as of `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_identity(identity, now, ttl)?;
        self.encode(&claims)
    }

    fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.key.algorithm());

        encode(&header, claims, self.key.encoding_key())
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Role;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SigningKey::hs256(b"my_secret_key_at_least_32_bytes_long!").unwrap())
    }

    #[test]
    fn test_issue_produces_compact_jws() {
        let token = issuer()
            .issue(&Identity::new(7, "alice", Role::user()), Duration::minutes(20))
            .expect("Failed to issue token");

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issue_twice_differs() {
        let identity = Identity::new(7, "alice", Role::user());
        let now = Utc::now();

        let first = issuer()
            .issue_at(&identity, Duration::minutes(20), now)
            .unwrap();
        let second = issuer()
            .issue_at(&identity, Duration::minutes(20), now)
            .unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_issue_with_overflowing_ttl_is_an_error() {
        let result = issuer().issue(
            &Identity::new(7, "alice", Role::user()),
            Duration::days(365 * 300_000),
        );

        assert!(matches!(result, Err(JwtError::LifetimeOutOfRange(_))));
    }
}
