use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::RawClaims;
use super::errors::InvalidToken;
use super::key::SigningKey;

/// Validates access tokens and extracts their claims.
///
/// Stateless: validation never touches storage, so a token stays valid
/// until `exp` regardless of what happens to the account meanwhile.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    key: SigningKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(key: SigningKey) -> Self {
        let mut validation = Validation::new(key.algorithm());
        // Expiry is checked against an injectable clock in `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self { key, validation }
    }

    /// Validate a token against the current time.
    ///
    /// # Arguments
    /// * `token` - Compact JWS string as presented by the client
    ///
    /// # Returns
    /// Fully populated claims
    ///
    /// # Errors
    /// * `Malformed` - Not a JWS, or the signed payload is unreadable
    /// * `BadSignature` - Signature, header or algorithm does not verify
    /// * `Expired` - `exp` is at or before now
    /// * `MissingClaim` - A required claim is absent
    pub fn validate(&self, token: &str) -> Result<Claims, InvalidToken> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token as of `now` (Unix timestamp).
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, InvalidToken> {
        check_shape(token)?;

        // A header that no longer decodes means the signed input was altered.
        decode_header(token).map_err(|_| InvalidToken::BadSignature)?;

        let raw = decode::<RawClaims>(token, self.key.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => InvalidToken::BadSignature,
                ErrorKind::ExpiredSignature => InvalidToken::Expired,
                ErrorKind::MissingRequiredClaim(claim) => InvalidToken::MissingClaim(claim.clone()),
                _ => InvalidToken::Malformed(e.to_string()),
            })?;

        if now >= raw.exp()? {
            return Err(InvalidToken::Expired);
        }

        Claims::try_from(raw)
    }
}

fn check_shape(token: &str) -> Result<(), InvalidToken> {
    let segments: Vec<&str> = token.split('.').collect();

    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(InvalidToken::Malformed(
            "expected three non-empty segments".to_string(),
        ));
    }

    Ok(())
}
