use thiserror::Error;

/// Error type for signing configuration and token issuance.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Invalid signing configuration: {0}")]
    Configuration(String),

    #[error("Token lifetime out of range: {0}")]
    LifetimeOutOfRange(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reason a presented token was rejected.
///
/// The variant is meant for internal logging only. Callers must answer
/// every variant with the same generic 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidToken {
    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

impl InvalidToken {
    /// Stable reason code for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            InvalidToken::BadSignature => "bad_signature",
            InvalidToken::Expired => "expired",
            InvalidToken::Malformed(_) => "malformed",
            InvalidToken::MissingClaim(_) => "missing_claim",
        }
    }
}
