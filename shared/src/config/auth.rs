//! OTP challenge and JWT signing configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OTP challenge step of the login flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Whether the OTP challenge is enabled; when disabled a password
    /// login issues the access token immediately
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Number of digits in the generated code; the generator clamps this
    /// to 4..=10
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Minutes until an issued code expires
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            code_length: default_code_length(),
            expiry_minutes: default_expiry_minutes(),
        }
    }
}

impl OtpConfig {
    /// Load OTP settings from environment variables
    pub fn from_env() -> Self {
        let enabled = std::env::var("OTP_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or_else(|_| default_enabled());
        let code_length = std::env::var("OTP_CODE_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_code_length);
        let expiry_minutes = std::env::var("OTP_EXPIRY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_expiry_minutes);

        Self {
            enabled,
            code_length,
            expiry_minutes,
        }
    }
}

/// Configuration for access-token signing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared signing secret; rotating it invalidates all issued tokens
    pub secret: String,

    /// Token validity window in days
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("dev-only-secret-change-me"),
            expiry_days: default_expiry_days(),
        }
    }
}

impl JwtConfig {
    /// Create a configuration with an explicit secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load JWT settings from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "dev-only-secret-change-me".to_string());
        let expiry_days = std::env::var("JWT_EXPIRY_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_expiry_days);

        Self {
            secret,
            expiry_days,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_code_length() -> usize {
    6
}

fn default_expiry_minutes() -> i64 {
    5
}

fn default_expiry_days() -> i64 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_defaults() {
        let config = OtpConfig::default();
        assert!(config.enabled);
        assert_eq!(config.code_length, 6);
        assert_eq!(config.expiry_minutes, 5);
    }

    #[test]
    fn test_jwt_defaults() {
        let config = JwtConfig::default();
        assert_eq!(config.expiry_days, 7);
    }
}
