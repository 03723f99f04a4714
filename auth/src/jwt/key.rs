use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::JwtError;

/// Symmetric signing material shared by the token issuer and validator.
///
/// Built once at startup from configuration. Construction fails instead of
/// producing a key that would silently weaken signature verification.
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl SigningKey {
    /// Minimum secret length in bytes (256 bits, the HS256 output size).
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a signing key from a raw secret and an HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Secret key bytes (store in env or a secret manager, never in code)
    /// * `algorithm` - One of HS256, HS384, HS512
    ///
    /// # Errors
    /// * `Configuration` - Secret too short or algorithm is not HMAC-based
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::Configuration(format!(
                "algorithm {:?} is not a symmetric HMAC algorithm",
                algorithm
            )));
        }

        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtError::Configuration(format!(
                "secret must be at least {} bytes, got {}",
                Self::MIN_SECRET_LENGTH,
                secret.len()
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        })
    }

    /// Create an HS256 signing key.
    pub fn hs256(secret: &[u8]) -> Result<Self, JwtError> {
        Self::new(secret, Algorithm::HS256)
    }

    /// Create a signing key from configuration strings.
    ///
    /// # Arguments
    /// * `secret` - Secret as configured
    /// * `algorithm` - Algorithm name, e.g. "HS256"
    ///
    /// # Errors
    /// * `Configuration` - Unknown algorithm name or invalid key
    pub fn from_config(secret: &str, algorithm: &str) -> Result<Self, JwtError> {
        let algorithm = Algorithm::from_str(algorithm).map_err(|_| {
            JwtError::Configuration(format!("unknown signing algorithm: {}", algorithm))
        })?;

        Self::new(secret.as_bytes(), algorithm)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("secret", &"<redacted>")
            .finish()
    }
}
