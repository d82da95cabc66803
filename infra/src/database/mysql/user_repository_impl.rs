//! MySQL implementation of the UserRepository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ep_core::domain::entities::user::{User, UserRole};
use ep_core::errors::DomainError;
use ep_core::repositories::UserRepository;

/// MySQL-backed user repository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let role: String = row.try_get("role").map_err(|e| DomainError::Internal {
            message: format!("Failed to get role: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            login_id: row.try_get("login_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get login_id: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?,
            role: UserRole::parse(&role).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown user role: {}", role),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, login_id, email, name, role, password_hash, phone,
                   created_at, updated_at
            FROM users
            WHERE login_id = ? OR email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by identifier: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, login_id, email, name, role, password_hash, phone,
                   created_at, updated_at
            FROM users
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by id: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, login_id, email, name, role, password_hash, phone,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.login_id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .bind(&user.phone)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    DomainError::Validation {
                        message: "identifier already registered".to_string(),
                    }
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET login_id = ?, email = ?, name = ?, role = ?,
                password_hash = ?, phone = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.login_id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .bind(&user.phone)
            .bind(Utc::now())
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "user".to_string(),
            });
        }

        Ok(user)
    }
}
