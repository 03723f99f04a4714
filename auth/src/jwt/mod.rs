pub mod claims;
pub mod errors;
pub mod issuer;
pub mod key;
pub mod validator;

pub use claims::Claims;
pub use errors::InvalidToken;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use key::SigningKey;
pub use validator::TokenValidator;
