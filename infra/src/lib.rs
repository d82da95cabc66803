//! # Infrastructure Layer
//!
//! Concrete implementations behind the core crate's seams:
//! - **Database**: MySQL repositories using SQLx
//! - **Notify**: outbound code delivery over SMS and email providers,
//!   with a structured-log fallback for environments without either

pub mod database;
pub mod notify;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external providers
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Outbound delivery error
    #[error("Delivery error: {0}")]
    Delivery(String),
}
