use std::env;

use auth::HashingCost;
use auth::JwtError;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::SigningKey;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for todo-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Access token signing configuration.
///
/// `secret` has no default and must be supplied through the environment
/// (`JWT__SECRET`) or a secret store.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
}

/// Argon2id cost used for new password hashes.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Bearer token transport settings.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the auth cookie `Secure`; enable whenever served over HTTPS.
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

impl JwtConfig {
    /// Build the signing key shared by token issuance and validation.
    ///
    /// # Errors
    /// * `Configuration` - Secret too short or algorithm unsupported
    pub fn signing_key(&self) -> Result<SigningKey, JwtError> {
        SigningKey::from_config(&self.secret, &self.algorithm)
    }

    /// Lifetime of issued access tokens.
    ///
    /// # Errors
    /// * `Configuration` - Not a positive, representable number of minutes
    pub fn access_token_ttl(&self) -> Result<chrono::Duration, JwtError> {
        if self.access_token_ttl_minutes <= 0 {
            return Err(JwtError::Configuration(format!(
                "access_token_ttl_minutes must be positive, got {}",
                self.access_token_ttl_minutes
            )));
        }

        chrono::Duration::try_minutes(self.access_token_ttl_minutes).ok_or_else(|| {
            JwtError::Configuration(format!(
                "access_token_ttl_minutes out of range: {}",
                self.access_token_ttl_minutes
            ))
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .finish()
    }
}

impl PasswordConfig {
    /// Build a password hasher with the configured cost.
    ///
    /// # Errors
    /// * `InvalidCost` - Parameters rejected by Argon2
    pub fn hasher(&self) -> Result<PasswordHasher, PasswordError> {
        PasswordHasher::with_cost(HashingCost {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        })
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashingCost::default();
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_cookie_name() -> String {
    "access_token".to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_ttl_minutes() -> i64 {
    20
}
