//! Repository traits for data persistence
//!
//! The traits define the persistence contract the services depend on;
//! concrete sqlx implementations live in the infra crate and in-memory
//! mocks are shipped alongside each trait for tests and local wiring.

pub mod otp_session;
pub mod user;

pub use otp_session::{MockOtpSessionRepository, OtpSessionRepository};
pub use user::{MockUserRepository, UserRepository};
