//! Outbound code delivery
//!
//! Concrete providers behind the core crate's `CodeDelivery` seam:
//! an SMS gateway client, a mail API client, and a dispatcher that
//! chains them with a structured-log fallback for local development.

pub mod dispatcher;
pub mod email;
pub mod sms;

pub use dispatcher::DeliveryDispatcher;
pub use email::MailClient;
pub use sms::SmsClient;
