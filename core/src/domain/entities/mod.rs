//! Domain entities

pub mod otp_session;
pub mod token;
pub mod user;
