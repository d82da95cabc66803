//! Mail API client
//!
//! Sends transactional mail through a JSON HTTP API authenticated with a
//! bearer token, the shape most hosted mail providers expose.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use ep_shared::config::notify::MailProviderConfig;
use ep_shared::utils::contact::mask_contact;

use crate::InfrastructureError;

/// Timeout for mail API requests
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Client for a JSON transactional mail API
pub struct MailClient {
    http: reqwest::Client,
    config: MailProviderConfig,
}

impl MailClient {
    pub fn new(config: MailProviderConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            from = %mask_contact(&config.from_address),
            "Mail client initialized"
        );

        Ok(Self { http, config })
    }

    /// Send a plain-text email
    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), InfrastructureError> {
        let request = MailRequest {
            from: &self.config.from_address,
            to,
            subject,
            text,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(InfrastructureError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Delivery(format!(
                "Mail API returned {}: {}",
                status, detail
            )));
        }

        debug!(to = %mask_contact(to), "Mail accepted by provider");

        Ok(())
    }
}
