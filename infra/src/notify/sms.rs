//! SMS gateway client
//!
//! Talks to a Twilio-compatible REST API: form-encoded message create
//! calls authenticated with the account SID and auth token.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use ep_shared::config::notify::SmsProviderConfig;
use ep_shared::utils::contact::mask_contact;

use crate::InfrastructureError;

/// Timeout for gateway API requests
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: Option<String>,
}

/// Client for a Twilio-compatible SMS gateway
pub struct SmsClient {
    http: reqwest::Client,
    config: SmsProviderConfig,
}

impl SmsClient {
    pub fn new(config: SmsProviderConfig) -> Result<Self, InfrastructureError> {
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "SMS_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            from = %mask_contact(&config.from_number),
            "SMS client initialized"
        );

        Ok(Self { http, config })
    }

    /// Send a text message to a phone number
    pub async fn send(&self, to: &str, body: &str) -> Result<(), InfrastructureError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_url.trim_end_matches('/'),
            self.config.account_sid
        );

        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(InfrastructureError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Delivery(format!(
                "SMS gateway returned {}: {}",
                status, detail
            )));
        }

        let message: MessageResponse = response.json().await.map_err(InfrastructureError::Http)?;
        debug!(
            to = %mask_contact(to),
            message_sid = message.sid.as_deref().unwrap_or("unknown"),
            "SMS accepted by gateway"
        );

        Ok(())
    }
}
