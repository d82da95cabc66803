//! Rate limiting configuration for OTP issuance

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
///
/// Caps how many OTP sessions may be created for a single contact within a
/// rolling window. The count is taken against the OTP session store itself,
/// so the guarantee is approximate under concurrent bursts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Maximum OTP sessions per contact within the window
    #[serde(default = "default_max_per_contact")]
    pub max_per_contact: u32,

    /// Rolling window length in minutes
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_per_contact: default_max_per_contact(),
            window_minutes: default_window_minutes(),
        }
    }
}

impl RateLimitConfig {
    /// Load rate-limit settings from environment variables
    pub fn from_env() -> Self {
        let max_per_contact = std::env::var("OTP_RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_per_contact);
        let window_minutes = std::env::var("OTP_RATE_LIMIT_WINDOW_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_window_minutes);

        Self {
            max_per_contact,
            window_minutes,
        }
    }

    /// Window length in seconds
    pub fn window_seconds(&self) -> i64 {
        self.window_minutes * 60
    }
}

fn default_max_per_contact() -> u32 {
    3
}

fn default_window_minutes() -> i64 {
    10
}
