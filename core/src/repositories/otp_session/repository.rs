//! OTP session repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_session::OtpSession;
use crate::errors::DomainError;

/// Repository trait for OTP session persistence
///
/// The store enforces uniqueness on `token` and serializes the used-flag
/// transition; the auth core itself never deletes records (expiry cleanup is
/// a storage-level concern).
#[async_trait]
pub trait OtpSessionRepository: Send + Sync {
    /// Persist a freshly created session
    ///
    /// Fails when a session with the same token already exists.
    async fn insert(&self, session: OtpSession) -> Result<OtpSession, DomainError>;

    /// Find a session by its opaque token
    async fn find_by_token(&self, token: &str) -> Result<Option<OtpSession>, DomainError>;

    /// Atomically flip `used` from false to true
    ///
    /// Returns `Ok(true)` iff this call won the transition; a concurrent
    /// verifier (or a second attempt) observes `Ok(false)`. The store must
    /// serialize this so at most one caller ever wins per session.
    async fn mark_used(&self, token: &str) -> Result<bool, DomainError>;

    /// Count sessions created for `contact` at or after `since`
    ///
    /// Used for count-then-insert rate limiting; the check is approximate
    /// under concurrent bursts and that is accepted.
    async fn count_for_contact_since(
        &self,
        contact: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// Creation time of the oldest in-window session for `contact`
    ///
    /// Lets the rate limiter report how long until a slot frees up.
    async fn oldest_for_contact_since(
        &self,
        contact: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError>;
}
