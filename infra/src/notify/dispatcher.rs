//! Channel dispatcher implementing the core delivery seam
//!
//! The general path tries SMS first when the contact looks like a phone
//! number, then email when it looks like an address, and finally falls
//! back to a structured log line so development setups without provider
//! credentials still surface the code. The forced email path has no
//! fallback; the caller asked for email and gets a hard error instead.

use async_trait::async_trait;
use tracing::{info, warn};

use ep_core::services::notify::{CodeDelivery, DeliveryChannel, DeliveryReceipt};
use ep_shared::config::notify::{MailProviderConfig, SmsProviderConfig};
use ep_shared::utils::contact::{is_email_shaped, is_phone_shaped, mask_contact};

use crate::notify::{MailClient, SmsClient};
use crate::InfrastructureError;

const EMAIL_SUBJECT: &str = "Your EduPortal verification code";

fn code_message(code: &str, expiry_minutes: i64) -> String {
    format!(
        "Your EduPortal verification code is {}. It expires in {} minutes.",
        code, expiry_minutes
    )
}

/// Ordered, capability-checked delivery chain
pub struct DeliveryDispatcher {
    sms: Option<SmsClient>,
    mail: Option<MailClient>,
}

impl DeliveryDispatcher {
    pub fn new(sms: Option<SmsClient>, mail: Option<MailClient>) -> Self {
        Self { sms, mail }
    }

    /// Build a dispatcher from optional provider configs
    ///
    /// A missing config disables that channel rather than failing startup.
    pub fn from_config(
        sms: Option<SmsProviderConfig>,
        mail: Option<MailProviderConfig>,
    ) -> Result<Self, InfrastructureError> {
        let sms = sms.map(SmsClient::new).transpose()?;
        let mail = mail.map(MailClient::new).transpose()?;

        if sms.is_none() && mail.is_none() {
            warn!("No delivery provider configured; codes will only be logged");
        }

        Ok(Self { sms, mail })
    }

    async fn try_sms(&self, contact: &str, code: &str, expiry_minutes: i64) -> bool {
        let client = match &self.sms {
            Some(client) if is_phone_shaped(contact) => client,
            _ => return false,
        };
        match client.send(contact, &code_message(code, expiry_minutes)).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    contact = %mask_contact(contact),
                    error = %e,
                    "SMS delivery failed, falling through"
                );
                false
            }
        }
    }

    async fn try_mail(&self, contact: &str, code: &str, expiry_minutes: i64) -> bool {
        let client = match &self.mail {
            Some(client) if is_email_shaped(contact) => client,
            _ => return false,
        };
        match client
            .send(contact, EMAIL_SUBJECT, &code_message(code, expiry_minutes))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    contact = %mask_contact(contact),
                    error = %e,
                    "Email delivery failed, falling through"
                );
                false
            }
        }
    }
}

#[async_trait]
impl CodeDelivery for DeliveryDispatcher {
    async fn deliver(
        &self,
        contact: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<DeliveryReceipt, String> {
        if self.try_sms(contact, code, expiry_minutes).await {
            return Ok(DeliveryReceipt::new(DeliveryChannel::Sms));
        }
        if self.try_mail(contact, code, expiry_minutes).await {
            return Ok(DeliveryReceipt::new(DeliveryChannel::Email));
        }

        // Development fallback: the code only exists in the log line
        info!(
            contact = %mask_contact(contact),
            code,
            expiry_minutes,
            "No delivery channel available, logging code"
        );
        Ok(DeliveryReceipt::new(DeliveryChannel::FallbackLog))
    }

    async fn deliver_email(
        &self,
        email: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<DeliveryReceipt, String> {
        let client = self
            .mail
            .as_ref()
            .ok_or_else(|| "email channel not configured".to_string())?;

        client
            .send(email, EMAIL_SUBJECT, &code_message(code, expiry_minutes))
            .await
            .map_err(|e| e.to_string())?;

        Ok(DeliveryReceipt::new(DeliveryChannel::Email))
    }
}
