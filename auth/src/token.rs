use serde::Deserialize;
use serde::Serialize;

/// Successful login response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerToken {
    pub access_token: String,
    pub token_type: String,
}

impl BearerToken {
    pub const TOKEN_TYPE: &'static str = "bearer";

    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: Self::TOKEN_TYPE.to_string(),
        }
    }
}
