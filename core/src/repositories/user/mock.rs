//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::repository::UserRepository;

/// Mock user repository backed by a Vec
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_user(user: User) -> Self {
        let repo = Self::new();
        repo.users.lock().unwrap().push(user);
        repo
    }

    /// Remove a user, simulating deletion behind the auth core's back
    pub fn remove(&self, id: Uuid) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| {
                u.login_id.as_deref() == Some(identifier)
                    || u.email.as_deref() == Some(identifier)
            })
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        let taken = users.iter().any(|u| {
            (user.login_id.is_some() && u.login_id == user.login_id)
                || (user.email.is_some() && u.email == user.email)
        });
        if taken {
            return Err(DomainError::Validation {
                message: "identifier already registered".to_string(),
            });
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
            Ok(user)
        } else {
            Err(DomainError::NotFound {
                resource: "user".to_string(),
            })
        }
    }
}
