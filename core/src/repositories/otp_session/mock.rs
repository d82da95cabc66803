//! In-memory implementation of OtpSessionRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::otp_session::OtpSession;
use crate::errors::DomainError;

use super::repository::OtpSessionRepository;

/// Mock OTP session store keyed by token
pub struct MockOtpSessionRepository {
    pub sessions: Arc<Mutex<HashMap<String, OtpSession>>>,
}

impl MockOtpSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fetch a session by token, bypassing the trait, for assertions
    pub fn get(&self, token: &str) -> Option<OtpSession> {
        self.sessions.lock().unwrap().get(token).cloned()
    }

    /// Overwrite a session, letting tests back-date expiry or creation time
    pub fn put(&self, session: OtpSession) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session);
    }

    /// Number of stored sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MockOtpSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpSessionRepository for MockOtpSessionRepository {
    async fn insert(&self, session: OtpSession) -> Result<OtpSession, DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&session.token) {
            return Err(DomainError::Validation {
                message: "session token already exists".to_string(),
            });
        }
        sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<OtpSession>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(token) {
            Some(session) if !session.used => {
                session.mark_used();
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Ok(false),
        }
    }

    async fn count_for_contact_since(
        &self,
        contact: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .values()
            .filter(|s| s.contact == contact && s.created_at >= since)
            .count() as u64)
    }

    async fn oldest_for_contact_since(
        &self,
        contact: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .values()
            .filter(|s| s.contact == contact && s.created_at >= since)
            .map(|s| s.created_at)
            .min())
    }
}
