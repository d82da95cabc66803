//! MySQL implementation of the OtpSessionRepository trait
//!
//! The `otp_sessions` table doubles as the rate-limiting ledger: issuance
//! counts are taken from rows created inside the current window, so no
//! separate counter store is needed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ep_core::domain::entities::otp_session::OtpSession;
use ep_core::errors::DomainError;
use ep_core::repositories::OtpSessionRepository;

/// MySQL-backed OTP session store
pub struct MySqlOtpSessionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpSessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an OtpSession entity
    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<OtpSession, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        Ok(OtpSession {
            token: row.try_get("token").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            contact: row.try_get("contact").map_err(|e| DomainError::Internal {
                message: format!("Failed to get contact: {}", e),
            })?,
            code_hash: row.try_get("code_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code_hash: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            used: row.try_get("used").map_err(|e| DomainError::Internal {
                message: format!("Failed to get used: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl OtpSessionRepository for MySqlOtpSessionRepository {
    async fn insert(&self, session: OtpSession) -> Result<OtpSession, DomainError> {
        let query = r#"
            INSERT INTO otp_sessions (
                token, user_id, contact, code_hash, created_at, expires_at, used
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&session.token)
            .bind(session.user_id.to_string())
            .bind(&session.contact)
            .bind(&session.code_hash)
            .bind(session.created_at)
            .bind(session.expires_at)
            .bind(session.used)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert OTP session: {}", e),
            })?;

        Ok(session)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<OtpSession>, DomainError> {
        let query = r#"
            SELECT token, user_id, contact, code_hash, created_at, expires_at, used
            FROM otp_sessions
            WHERE token = ?
        "#;

        let row = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find OTP session: {}", e),
            })?;

        row.as_ref().map(Self::row_to_session).transpose()
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        // The `used = FALSE` guard makes this a compare-and-set: exactly
        // one of two racing verifiers sees rows_affected = 1.
        let query = "UPDATE otp_sessions SET used = TRUE WHERE token = ? AND used = FALSE";

        let result = sqlx::query(query)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to mark OTP session used: {}", e),
            })?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_for_contact_since(
        &self,
        contact: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let query = r#"
            SELECT COUNT(*) as session_count
            FROM otp_sessions
            WHERE contact = ? AND created_at >= ?
        "#;

        let row = sqlx::query(query)
            .bind(contact)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to count OTP sessions: {}", e),
            })?;

        let count: i64 = row
            .try_get("session_count")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get session_count: {}", e),
            })?;

        Ok(count.max(0) as u64)
    }

    async fn oldest_for_contact_since(
        &self,
        contact: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let query = r#"
            SELECT MIN(created_at) as oldest
            FROM otp_sessions
            WHERE contact = ? AND created_at >= ?
        "#;

        let row = sqlx::query(query)
            .bind(contact)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find oldest OTP session: {}", e),
            })?;

        row.try_get::<Option<DateTime<Utc>>, _>("oldest")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get oldest: {}", e),
            })
    }
}
