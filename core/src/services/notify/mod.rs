//! Code delivery abstraction
//!
//! The domain layer only decides *that* a code must reach a contact; the
//! concrete channels (SMS gateway, mail API, log fallback) live in the
//! infrastructure crate behind the [`CodeDelivery`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Channel a code was (or would be) sent over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryChannel {
    /// SMS text message to a phone number
    Sms,
    /// Email to an address on file
    Email,
    /// Structured log line, used when no real channel is configured
    FallbackLog,
}

impl DeliveryChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryChannel::Sms => "sms",
            DeliveryChannel::Email => "email",
            DeliveryChannel::FallbackLog => "fallback-log",
        }
    }
}

/// Outcome of a successful delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Channel that accepted the message
    pub channel: DeliveryChannel,
}

impl DeliveryReceipt {
    pub fn new(channel: DeliveryChannel) -> Self {
        Self { channel }
    }
}

/// Outbound delivery of one-time codes
///
/// `deliver` picks the best channel for the contact (implementations fall
/// through SMS -> email -> log and only fail if every channel errors).
/// `deliver_email` forces the email channel and fails if it is unavailable,
/// backing the explicit "send it to my email instead" flow.
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    /// Deliver a code to a contact over the best available channel
    async fn deliver(
        &self,
        contact: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<DeliveryReceipt, String>;

    /// Deliver a code over email only
    async fn deliver_email(
        &self,
        email: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<DeliveryReceipt, String>;
}
