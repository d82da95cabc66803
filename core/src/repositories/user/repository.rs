//! User repository trait defining the interface to the credential store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for user persistence operations
///
/// The credential store is an external collaborator of the auth core; this
/// trait is the only surface the services depend on. Implementations handle
/// the actual database operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login identifier or email address
    ///
    /// The identifier matches either the `login_id` or the `email` column;
    /// both are unique so at most one user is returned.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that identifier
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// Fails when the login identifier or email is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
