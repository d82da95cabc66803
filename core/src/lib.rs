//! Core business logic and domain layer for the EduPortal backend
//!
//! This crate holds the domain entities, the error taxonomy, the repository
//! traits (with in-crate mocks for testing), and the services that make up
//! the OTP-gated authentication flow:
//!
//! - password verification against the credential store
//! - rate-limited OTP issuance and delivery
//! - OTP verification with single-use enforcement
//! - signed access-token issuance

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
