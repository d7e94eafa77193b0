//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// One-time passcode configuration.
    #[serde(default)]
    pub otp: OtpSettings,
    /// Budget evaluation configuration.
    #[serde(default)]
    pub budget: BudgetSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration as read from config sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    86400 // 24 hours
}

/// One-time passcode settings for the (mocked) contact verification flow.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpSettings {
    /// Minutes a code stays valid.
    #[serde(default = "default_otp_ttl")]
    pub ttl_minutes: i64,
    /// Return the code in the register response. Development only.
    #[serde(default)]
    pub expose_code: bool,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            ttl_minutes: default_otp_ttl(),
            expose_code: false,
        }
    }
}

fn default_otp_ttl() -> i64 {
    10
}

/// Budget evaluation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetSettings {
    /// Utilization percentage above which a budget is reported as near its limit.
    #[serde(default = "default_near_limit_percent")]
    pub near_limit_percent: Decimal,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            near_limit_percent: default_near_limit_percent(),
        }
    }
}

fn default_near_limit_percent() -> Decimal {
    Decimal::from(80)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FINTRACK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
