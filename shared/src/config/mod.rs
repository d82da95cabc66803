//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - OTP challenge and JWT signing configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `notify` - SMS and mail provider credentials
//! - `rate_limit` - OTP issuance rate limiting
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod notify;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{JwtConfig, OtpConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use notify::{MailProviderConfig, SmsProviderConfig};
pub use rate_limit::RateLimitConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// OTP challenge configuration
    pub otp: OtpConfig,

    /// JWT signing configuration
    pub jwt: JwtConfig,

    /// OTP issuance rate limiting
    pub rate_limit: RateLimitConfig,

    /// SMS provider credentials, absent when the channel is disabled
    #[serde(default)]
    pub sms: Option<SmsProviderConfig>,

    /// Mail provider credentials, absent when the channel is disabled
    #[serde(default)]
    pub mail: Option<MailProviderConfig>,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            otp: OtpConfig::default(),
            jwt: JwtConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sms: None,
            mail: None,
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the complete configuration from environment variables
    ///
    /// Provider credentials are optional; a missing set silently disables
    /// that delivery channel.
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            otp: OtpConfig::from_env(),
            jwt: JwtConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            sms: SmsProviderConfig::from_env(),
            mail: MailProviderConfig::from_env(),
            cors: CorsConfig::default(),
        }
    }
}
