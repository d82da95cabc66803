//! Configuration for the authentication service

use ep_shared::config::rate_limit::RateLimitConfig;

use crate::domain::entities::otp_session::DEFAULT_EXPIRY_MINUTES;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether login is gated behind an OTP challenge
    pub otp_enabled: bool,
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Minutes before an issued code expires
    pub code_expiry_minutes: i64,
    /// Rate limit for code issuance per contact
    pub rate_limit: RateLimitConfig,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            otp_enabled: true,
            code_length: 6,
            code_expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AuthServiceConfig {
    /// Start of the current rate-limit window, relative to now
    pub fn window_start(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now() - chrono::Duration::seconds(self.rate_limit.window_seconds())
    }
}
