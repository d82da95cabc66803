use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthSuccessResponse, VerifyOtpRequest};
use crate::handlers::error::domain_error_response;
use crate::routes::auth::AppState;

use ep_core::repositories::{OtpSessionRepository, UserRepository};
use ep_core::services::notify::CodeDelivery;
use ep_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/auth/verify-otp
///
/// Exchanges a pending session token plus the delivered code for a
/// signed access token. The session is consumed on success; wrong codes
/// leave it open until it expires.
pub async fn verify_otp<U, O, D>(
    state: web::Data<AppState<U, O, D>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpSessionRepository + 'static,
    D: CodeDelivery + 'static,
{
    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "validation_error",
            "Invalid session token or code format",
        ));
    }

    match state
        .auth_service
        .verify_otp(&request.session_token, &request.code)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(ApiResponse::success(AuthSuccessResponse {
            otp_required: false,
            user: auth.user,
            token: auth.token,
        })),
        Err(error) => domain_error_response(&error),
    }
}
