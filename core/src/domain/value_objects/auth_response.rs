//! Authentication flow result types

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserProfile;

/// Successful authentication: public profile plus a signed access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Public profile of the authenticated user
    pub user: UserProfile,

    /// Signed access token
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: UserProfile, token: String) -> Self {
        Self { user, token }
    }
}

/// Outcome of the password-verification stage
///
/// With the OTP challenge enabled a successful password login yields a
/// session token for the pending challenge; with it disabled the login
/// authenticates immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// An OTP was issued; the client must verify it against the session token
    OtpChallenge {
        /// Opaque session token identifying the pending challenge
        session_token: String,
        /// Human-readable hint with the masked destination
        message: String,
    },

    /// OTP disabled by configuration; authenticated directly
    Authenticated(AuthResponse),
}
