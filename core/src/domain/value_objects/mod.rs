//! Value objects shared between services and the API layer

pub mod auth_response;

pub use auth_response::{AuthResponse, LoginOutcome};
