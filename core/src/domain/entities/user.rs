//! User entity representing a registered portal user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user in the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A student with access to their own records
    Student,
    /// A teacher managing classes and assessments
    Teacher,
    /// An institution administrator
    Institution,
    /// A government education-department user
    Government,
    /// A portal administrator
    Admin,
}

impl UserRole {
    /// String form used in JWT claims and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Institution => "institution",
            UserRole::Government => "government",
            UserRole::Admin => "admin",
        }
    }

    /// Parse a role from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(UserRole::Student),
            "teacher" => Some(UserRole::Teacher),
            "institution" => Some(UserRole::Institution),
            "government" => Some(UserRole::Government),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// User entity as stored by the credential store
///
/// At least one of `login_id` and `email` is present and unique; either may
/// be used as the login identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Stable login identifier, unique when present
    pub login_id: Option<String>,

    /// Email address, unique when present
    pub email: Option<String>,

    /// Display name
    pub name: String,

    /// Role of the user
    pub role: UserRole,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// Phone contact for OTP delivery, preferred over email
    pub phone: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user with credential fields stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub login_id: Option<String>,
    pub email: Option<String>,
    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
}

impl User {
    /// Creates a new User instance
    pub fn new(name: impl Into<String>, role: UserRole, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            login_id: None,
            email: None,
            name: name.into(),
            role,
            password_hash: password_hash.into(),
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the login identifier
    pub fn with_login_id(mut self, login_id: impl Into<String>) -> Self {
        self.login_id = Some(login_id.into());
        self
    }

    /// Sets the email contact
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone contact
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Preferred OTP destination: phone if present, else email
    pub fn preferred_contact(&self) -> Option<&str> {
        self.phone.as_deref().or(self.email.as_deref())
    }

    /// Public view with credential fields stripped
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            login_id: self.login_id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            phone: self.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Asha Verma".to_string(),
            UserRole::Student,
            "$2b$04$fakehashfakehashfakehash".to_string(),
        )
    }

    #[test]
    fn test_new_user() {
        let user = sample_user();
        assert_eq!(user.role, UserRole::Student);
        assert!(user.login_id.is_none());
        assert!(user.preferred_contact().is_none());
    }

    #[test]
    fn test_preferred_contact_prefers_phone() {
        let user = sample_user()
            .with_email("asha@example.edu")
            .with_phone("+919812345678");
        assert_eq!(user.preferred_contact(), Some("+919812345678"));
    }

    #[test]
    fn test_preferred_contact_falls_back_to_email() {
        let user = sample_user().with_email("asha@example.edu");
        assert_eq!(user.preferred_contact(), Some("asha@example.edu"));
    }

    #[test]
    fn test_profile_strips_credentials() {
        let user = sample_user().with_login_id("STU-1001");
        let profile = user.to_profile();
        assert_eq!(profile.login_id.as_deref(), Some("STU-1001"));

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&UserRole::Government).unwrap();
        assert_eq!(json, "\"government\"");
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("pupil"), None);
    }
}
