//! Application configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file by the binary) and validated once at startup. Tests and tools
//! build it directly with [`AppConfig::builder`].

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Secret used when `JWT_SECRET_KEY` is unset. Rejected in production.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Longest accepted access token lifetime, in minutes (one year)
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 525_600;
/// Longest accepted refresh token lifetime, in days (ten years)
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 3_650;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name shown on the welcome endpoint
    pub project_name: String,
    /// Deployment environment (`development`, `production`, ...)
    pub environment: String,
    /// Interface to bind
    pub server_host: String,
    /// Port to bind
    pub server_port: u16,
    /// sqlx connection URL
    pub database_url: String,
    /// Maximum pooled connections
    pub database_max_connections: u32,
    /// HMAC secret for signing tokens
    pub jwt_secret_key: String,
    /// Signing algorithm (HMAC family only)
    pub jwt_algorithm: Algorithm,
    /// Expected `iss` claim, if any
    pub jwt_issuer: Option<String>,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Allowed CORS origins; empty disables cross-origin access
    pub cors_origins: Vec<String>,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: "FF Codex".to_string(),
            environment: "development".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            database_url: "sqlite://ffcodex_auth.db".to_string(),
            database_max_connections: 5,
            jwt_secret_key: DEFAULT_JWT_SECRET.to_string(),
            jwt_algorithm: Algorithm::HS256,
            jwt_issuer: None,
            access_token_ttl: Duration::minutes(120),
            refresh_token_ttl: Duration::days(7),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unset keys keep their defaults; set-but-unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            project_name: get("PROJECT_NAME").unwrap_or(defaults.project_name),
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), defaults.server_port)?,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_or(
                "DB_POOL_SIZE",
                get("DB_POOL_SIZE"),
                defaults.database_max_connections,
            )?,
            jwt_secret_key: get("JWT_SECRET_KEY").unwrap_or(defaults.jwt_secret_key),
            jwt_algorithm: match get("JWT_ALGORITHM") {
                Some(raw) => Algorithm::from_str(raw.trim())
                    .map_err(|_| ConfigError::invalid("JWT_ALGORITHM", &raw))?,
                None => defaults.jwt_algorithm,
            },
            jwt_issuer: get("JWT_ISSUER"),
            access_token_ttl: parse_duration(
                "JWT_ACCESS_TOKEN_EXPIRE_MINUTES",
                get("JWT_ACCESS_TOKEN_EXPIRE_MINUTES"),
                defaults.access_token_ttl,
                Duration::try_minutes,
            )?,
            refresh_token_ttl: parse_duration(
                "JWT_REFRESH_TOKEN_EXPIRE_DAYS",
                get("JWT_REFRESH_TOKEN_EXPIRE_DAYS"),
                defaults.refresh_token_ttl,
                Duration::try_days,
            )?,
            bcrypt_cost: parse_or("BCRYPT_ROUNDS", get("BCRYPT_ROUNDS"), defaults.bcrypt_cost)?,
            cors_origins: get("BACKEND_CORS_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or(defaults.cors_origins),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Whether the service runs in production mode
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret_key.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET_KEY"));
        }
        if self.is_production() && self.jwt_secret_key == DEFAULT_JWT_SECRET {
            return Err(ConfigError::InsecureSecret);
        }
        if !matches!(
            self.jwt_algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ConfigError::invalid(
                "JWT_ALGORITHM",
                &format!("{:?}", self.jwt_algorithm),
            ));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_ROUNDS",
                &self.bcrypt_cost.to_string(),
            ));
        }
        if self.access_token_ttl <= Duration::zero()
            || self.access_token_ttl > Duration::minutes(MAX_ACCESS_TOKEN_MINUTES)
        {
            return Err(ConfigError::invalid(
                "JWT_ACCESS_TOKEN_EXPIRE_MINUTES",
                &self.access_token_ttl.num_minutes().to_string(),
            ));
        }
        if self.refresh_token_ttl <= Duration::zero()
            || self.refresh_token_ttl > Duration::days(MAX_REFRESH_TOKEN_DAYS)
        {
            return Err(ConfigError::invalid(
                "JWT_REFRESH_TOKEN_EXPIRE_DAYS",
                &self.refresh_token_ttl.num_days().to_string(),
            ));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::invalid("DB_POOL_SIZE", "0"));
        }
        if self.database_url.is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        Ok(())
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(key, &value)),
        None => Ok(default),
    }
}

fn parse_duration(
    key: &'static str,
    raw: Option<String>,
    default: Duration,
    unit: fn(i64) -> Option<Duration>,
) -> Result<Duration, ConfigError> {
    match raw {
        Some(value) => {
            let amount: i64 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(key, &value))?;
            unit(amount).ok_or_else(|| ConfigError::invalid(key, &value))
        }
        None => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: Option<AppConfig>,
}

impl AppConfigBuilder {
    fn config(&mut self) -> &mut AppConfig {
        self.config.get_or_insert_with(AppConfig::default)
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config().database_url = url.into();
        self
    }

    /// Set the pool size
    pub fn database_max_connections(mut self, connections: u32) -> Self {
        self.config().database_max_connections = connections;
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret_key(mut self, secret: impl Into<String>) -> Self {
        self.config().jwt_secret_key = secret.into();
        self
    }

    /// Set the signing algorithm
    pub fn jwt_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config().jwt_algorithm = algorithm;
        self
    }

    /// Set the expected issuer
    pub fn jwt_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.config().jwt_issuer = Some(issuer.into());
        self
    }

    /// Set the access token lifetime
    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.config().access_token_ttl = ttl;
        self
    }

    /// Set the refresh token lifetime
    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.config().refresh_token_ttl = ttl;
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config().bcrypt_cost = cost;
        self
    }

    /// Set the deployment environment
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.config().environment = environment.into();
        self
    }

    /// Set allowed CORS origins
    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.config().cors_origins = origins;
        self
    }

    /// Build the configuration
    pub fn build(mut self) -> Result<AppConfig, ConfigError> {
        let config = self.config.take().unwrap_or_default();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("JWT_SECRET_KEY must be set to a non-default value in production")]
    InsecureSecret,
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
        }
    }
}
