use std::env;

use auth::Authenticator;
use auth::HashCost;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for platform-service.
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
    pub bootstrap: Option<BootstrapConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Token signing configuration.
///
/// The two secrets must differ and be at least 32 bytes each.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish_non_exhaustive()
    }
}

/// Argon2id cost for newly created password hashes.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashCost::default();
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

impl PasswordConfig {
    pub fn hash_cost(&self) -> HashCost {
        HashCost {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        }
    }
}

/// Default superadmin provisioned at startup when present.
#[derive(Deserialize, Clone)]
pub struct BootstrapConfig {
    pub superadmin_email: String,
    pub superadmin_password: String,
    #[serde(default)]
    pub superadmin_name: Option<String>,
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("superadmin_email", &self.superadmin_email)
            .field("superadmin_name", &self.superadmin_name)
            .finish_non_exhaustive()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl JwtConfig {
    /// Token settings for [`auth::Authenticator`].
    ///
    /// Fails when a lifetime does not fit in a `chrono::Duration`.
    pub fn token_settings(&self) -> Result<TokenSettings, ConfigError> {
        let access_ttl = chrono::Duration::try_minutes(self.access_ttl_minutes).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.access_ttl_minutes out of range: {}",
                self.access_ttl_minutes
            ))
        })?;
        let refresh_ttl = chrono::Duration::try_hours(self.refresh_ttl_hours).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.refresh_ttl_hours out of range: {}",
                self.refresh_ttl_hours
            ))
        })?;

        Ok(TokenSettings {
            access_secret: self.access_secret.as_bytes().to_vec(),
            refresh_secret: self.refresh_secret.as_bytes().to_vec(),
            access_ttl,
            refresh_ttl,
        })
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__ACCESS_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject token or password settings the authenticator would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.authenticator().map(|_| ())
    }

    /// Build the authenticator described by `[jwt]` and `[password]`.
    pub fn authenticator(&self) -> Result<Authenticator, ConfigError> {
        Authenticator::new(&self.jwt.token_settings()?)
            .map_err(|e| ConfigError::Message(format!("invalid jwt settings: {}", e)))?
            .with_hash_cost(self.password.hash_cost())
            .map_err(|e| ConfigError::Message(format!("invalid password settings: {}", e)))
    }
}
