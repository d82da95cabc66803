//! OTP session entity for the one-time-passcode challenge.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default expiry for OTP sessions (5 minutes)
pub const DEFAULT_EXPIRY_MINUTES: i64 = 5;

/// A single OTP challenge issued to a user
///
/// The session `token` is the opaque identifier handed to the client in
/// place of the code; the code itself is persisted only as a bcrypt hash.
/// The record is written once and mutated exactly once, when `used` flips
/// from false to true on successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpSession {
    /// Opaque random session identifier, unique across all sessions ever
    pub token: String,

    /// Owning user, immutable once created
    pub user_id: Uuid,

    /// Destination contact (phone or email) captured at creation time,
    /// so a resend always targets the original destination
    pub contact: String,

    /// bcrypt hash of the zero-padded numeric code
    pub code_hash: String,

    /// Timestamp when the session was created (rate-limit windowing)
    pub created_at: DateTime<Utc>,

    /// Absolute expiry, fixed at creation and never extended
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully consumed; monotonic
    pub used: bool,
}

impl OtpSession {
    /// Creates a new OTP session expiring `expiry_minutes` from now
    pub fn new(
        token: String,
        user_id: Uuid,
        contact: String,
        code_hash: String,
        expiry_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            contact,
            code_hash,
            created_at: now,
            expires_at: now + Duration::minutes(expiry_minutes),
            used: false,
        }
    }

    /// Checks if the session has passed its expiry timestamp
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A session is consumable iff it is unused and not expired
    pub fn is_consumable(&self) -> bool {
        !self.used && !self.is_expired()
    }

    /// Marks the session as consumed; the flip is never reversed
    pub fn mark_used(&mut self) {
        self.used = true;
    }

    /// Time remaining until expiry, or zero if already expired
    pub fn time_until_expiry(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session(expiry_minutes: i64) -> OtpSession {
        OtpSession::new(
            "a".repeat(64),
            Uuid::new_v4(),
            "+919812345678".to_string(),
            "$2b$04$fakehashfakehashfakehash".to_string(),
            expiry_minutes,
        )
    }

    #[test]
    fn test_new_session() {
        let session = sample_session(DEFAULT_EXPIRY_MINUTES);
        assert!(!session.used);
        assert!(!session.is_expired());
        assert!(session.is_consumable());
        assert_eq!(
            session.expires_at,
            session.created_at + Duration::minutes(DEFAULT_EXPIRY_MINUTES)
        );
    }

    #[test]
    fn test_expired_session_not_consumable() {
        let mut session = sample_session(5);
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
        assert!(!session.is_consumable());
    }

    #[test]
    fn test_boundary_just_before_expiry() {
        let mut session = sample_session(5);
        session.expires_at = Utc::now() + Duration::seconds(1);
        assert!(!session.is_expired());
        assert!(session.is_consumable());
    }

    #[test]
    fn test_mark_used_is_terminal() {
        let mut session = sample_session(5);
        session.mark_used();
        assert!(session.used);
        assert!(!session.is_consumable());
    }

    #[test]
    fn test_time_until_expiry_clamps_to_zero() {
        let mut session = sample_session(5);
        session.expires_at = Utc::now() - Duration::minutes(1);
        assert_eq!(session.time_until_expiry(), Duration::zero());
    }
}
