//! MySQL repository implementations

pub mod otp_session_repository_impl;
pub mod user_repository_impl;

pub use otp_session_repository_impl::MySqlOtpSessionRepository;
pub use user_repository_impl::MySqlUserRepository;
