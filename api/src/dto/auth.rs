use serde::{Deserialize, Serialize};
use validator::Validate;

use ep_core::domain::entities::user::UserProfile;

/// Body for POST /api/v1/auth/login
///
/// Both fields are optional so a missing credential reaches the service
/// layer and surfaces as its own error instead of a deserialization 400.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login id or email address
    pub identifier: Option<String>,

    /// Account password
    pub password: Option<String>,
}

/// Body for POST /api/v1/auth/verify-otp
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Opaque session token returned by the login step
    #[validate(length(min = 1, max = 128))]
    pub session_token: String,

    /// Numeric one-time code from SMS or email
    #[validate(length(min = 4, max = 10))]
    pub code: String,
}

/// Body for POST /api/v1/auth/resend-otp and /resend-otp-email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendOtpRequest {
    /// Session token identifying the open challenge
    #[validate(length(min = 1, max = 128))]
    pub session_token: String,
}

/// Challenge payload returned when an OTP was issued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpChallengeResponse {
    /// Always true; clients branch on this flag
    pub otp_required: bool,

    /// Token to present with the code on /verify-otp
    pub session_token: String,

    /// Hint naming the masked destination
    pub message: String,
}

/// Authenticated payload: profile plus signed access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSuccessResponse {
    pub otp_required: bool,
    pub user: UserProfile,
    pub token: String,
}
