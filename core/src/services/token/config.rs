//! Token service configuration

use crate::domain::entities::token::ACCESS_TOKEN_EXPIRY_DAYS;

/// Configuration for JWT signing and validation
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC secret for HS256 signing
    pub secret: String,
    /// Access token lifetime in days
    pub expiry_days: i64,
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_days: ACCESS_TOKEN_EXPIRY_DAYS,
        }
    }

    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.expiry_days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiry() {
        let config = TokenServiceConfig::new("secret");
        assert_eq!(config.expiry_days, ACCESS_TOKEN_EXPIRY_DAYS);
    }

    #[test]
    fn test_with_expiry_days() {
        let config = TokenServiceConfig::new("secret").with_expiry_days(1);
        assert_eq!(config.expiry_days, 1);
    }
}
