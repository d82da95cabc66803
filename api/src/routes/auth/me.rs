use actix_web::{web, HttpResponse};

use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthContext;
use crate::routes::auth::AppState;

use ep_core::errors::{AuthError, DomainError};
use ep_core::repositories::{OtpSessionRepository, UserRepository};
use ep_core::services::notify::CodeDelivery;
use ep_shared::types::response::ApiResponse;

/// Handler for GET /api/v1/auth/me
///
/// Requires a bearer access token; the JWT middleware has already
/// verified it and injected the [`AuthContext`].
pub async fn me<U, O, D>(
    state: web::Data<AppState<U, O, D>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpSessionRepository + 'static,
    D: CodeDelivery + 'static,
{
    match state.auth_service.profile(auth.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(profile)),
        // A token whose account was deleted no longer authenticates anyone.
        Err(DomainError::Auth(AuthError::UserNotFound)) => HttpResponse::Unauthorized().json(
            ApiResponse::<()>::error("user_not_found", "This account no longer exists"),
        ),
        Err(error) => domain_error_response(&error),
    }
}
