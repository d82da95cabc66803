//! Access-token claims for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Access token validity window (7 days)
pub const ACCESS_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "edu-portal";

/// JWT audience
pub const JWT_AUDIENCE: &str = "edu-portal-api";

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the authenticated user
    pub role: String,

    /// Display name of the authenticated user
    pub name: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for an access token valid for `expiry_days`
    pub fn new_access_token(
        user_id: Uuid,
        role: UserRole,
        name: &str,
        expiry_days: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::days(expiry_days);

        Self {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            name: name.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the role from the claims, if it parses
    pub fn user_role(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }
}
