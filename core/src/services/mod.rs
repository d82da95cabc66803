//! Service layer - the auth core and its collaborators

pub mod auth;
pub mod notify;
pub mod otp;
pub mod token;
