use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::InvalidToken;
use super::errors::JwtError;
use crate::credentials::Identity;
use crate::credentials::Role;

/// Claims carried by an access token.
///
/// A frozen snapshot of the identity at issuance: the role is not re-read
/// from storage while the token is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Identity record id
    pub user_id: i64,

    /// Role at issuance time
    pub role: Role,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Create claims for an authenticated identity.
    ///
    /// # Arguments
    /// * `identity` - Identity the token speaks for
    /// * `now` - Issuance instant
    /// * `ttl` - Lifetime; negative values yield an already expired token
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - `now + ttl` is not a representable instant
    pub fn for_identity(
        identity: &Identity,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::LifetimeOutOfRange(ttl.to_string()))?;

        Ok(Self {
            sub: identity.username.clone(),
            user_id: identity.user_id,
            role: identity.role.clone(),
            exp: expiration.timestamp(),
            iat: Some(now.timestamp()),
            jti: Some(Uuid::new_v4().to_string()),
        })
    }

    /// Identity described by these claims.
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.sub.clone(), self.role.clone())
    }

    /// Expiration as a UTC timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Check if token is expired. A token is no longer valid at `exp` itself.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

/// Wire shape of decoded claims, before required fields are enforced.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    sub: Option<String>,
    user_id: Option<i64>,
    role: Option<Role>,
    exp: Option<i64>,
    iat: Option<i64>,
    jti: Option<String>,
}

impl RawClaims {
    pub(crate) fn exp(&self) -> Result<i64, InvalidToken> {
        self.exp
            .ok_or_else(|| InvalidToken::MissingClaim("exp".to_string()))
    }
}

impl TryFrom<RawClaims> for Claims {
    type Error = InvalidToken;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let exp = raw.exp()?;
        let sub = raw
            .sub
            .ok_or_else(|| InvalidToken::MissingClaim("sub".to_string()))?;
        let user_id = raw
            .user_id
            .ok_or_else(|| InvalidToken::MissingClaim("user_id".to_string()))?;
        let role = raw
            .role
            .ok_or_else(|| InvalidToken::MissingClaim("role".to_string()))?;

        Ok(Self {
            sub,
            user_id,
            role,
            exp,
            iat: raw.iat,
            jti: raw.jti,
        })
    }
}
