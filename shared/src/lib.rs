//! Shared utilities and common types for the EduPortal server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelope types
//! - Contact (phone/email) validation and masking utilities

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, JwtConfig, MailProviderConfig, OtpConfig,
    RateLimitConfig, ServerConfig, SmsProviderConfig,
};
pub use types::response::ApiResponse;
pub use utils::contact;
