pub mod mock;
pub mod repository;

pub use mock::MockOtpSessionRepository;
pub use repository::OtpSessionRepository;
