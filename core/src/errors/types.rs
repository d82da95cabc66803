//! Authentication and token error types
//!
//! These enums carry the failure taxonomy of the OTP login flow; the
//! presentation layer maps them onto HTTP statuses and response codes.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Identifier or password missing from the login request
    #[error("Identifier and password are required")]
    MissingInput,

    /// Unknown identifier or wrong password; deliberately uniform so the
    /// caller cannot tell which of the two was wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Too many OTP sessions created for this contact inside the window
    #[error("Too many code requests; retry in {seconds} seconds")]
    RateLimited { seconds: i64 },

    /// No OTP session matches the supplied token
    #[error("Verification session not found")]
    SessionNotFound,

    /// The session was already consumed by a successful verification
    #[error("Verification session already used")]
    AlreadyUsed,

    /// The session passed its expiry timestamp
    #[error("Verification session expired")]
    Expired,

    /// Submitted code does not match; the session stays usable
    #[error("Invalid verification code")]
    InvalidCode,

    /// The session's owning user no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Email-forced resend requested for a user without an email on file
    #[error("No email address on file")]
    NoEmailOnFile,

    /// Email-forced resend could not be delivered
    #[error("Failed to deliver the verification code")]
    DeliveryFailed,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Invalid token")]
    Invalid,

    #[error("Token generation failed")]
    GenerationFailed,
}
