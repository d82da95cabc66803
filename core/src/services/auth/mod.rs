//! Authentication service module
//!
//! This module provides the complete login flow:
//! - Password verification against stored bcrypt hashes
//! - OTP challenge issuance with per-contact rate limiting
//! - Single-use code verification and access token exchange
//! - Code resend over the original contact or forced email

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
