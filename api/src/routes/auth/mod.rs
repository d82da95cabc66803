//! Authentication route handlers
//!
//! Endpoints for the password + OTP login flow:
//! - Credential login opening an OTP challenge
//! - Code verification exchanging the session for an access token
//! - Code resend over the original contact or forced email
//! - Authenticated profile lookup

pub mod login;
pub mod me;
pub mod resend_otp;
pub mod verify_otp;

pub use login::AppState;
