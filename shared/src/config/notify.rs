//! SMS and mail provider configuration
//!
//! Each provider config only materializes when its full credential set is
//! present in the environment; a missing set disables that delivery channel,
//! letting the dispatcher fall through to the next one.

use serde::{Deserialize, Serialize};

/// Credentials for an HTTP SMS gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsProviderConfig {
    /// Messages endpoint of the gateway
    pub api_url: String,

    /// Account identifier
    pub account_sid: String,

    /// API auth token
    pub auth_token: String,

    /// Sender phone number (E.164)
    pub from_number: String,
}

impl SmsProviderConfig {
    /// Load SMS credentials from environment variables
    ///
    /// Returns `None` when any required variable is missing.
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("SMS_API_URL").ok()?;
        let account_sid = std::env::var("SMS_ACCOUNT_SID").ok()?;
        let auth_token = std::env::var("SMS_AUTH_TOKEN").ok()?;
        let from_number = std::env::var("SMS_FROM_NUMBER").ok()?;

        Some(Self {
            api_url,
            account_sid,
            auth_token,
            from_number,
        })
    }
}

/// Credentials for an HTTP mail API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailProviderConfig {
    /// Send endpoint of the mail API
    pub api_url: String,

    /// Bearer API key
    pub api_key: String,

    /// Sender address
    pub from_address: String,
}

impl MailProviderConfig {
    /// Load mail credentials from environment variables
    ///
    /// Returns `None` when any required variable is missing.
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("MAIL_API_URL").ok()?;
        let api_key = std::env::var("MAIL_API_KEY").ok()?;
        let from_address = std::env::var("MAIL_FROM_ADDRESS").ok()?;

        Some(Self {
            api_url,
            api_key,
            from_address,
        })
    }
}
