use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::dto::auth::{AuthSuccessResponse, LoginRequest, OtpChallengeResponse};
use crate::handlers::error::domain_error_response;

use ep_core::domain::value_objects::LoginOutcome;
use ep_core::repositories::{OtpSessionRepository, UserRepository};
use ep_core::services::auth::AuthService;
use ep_core::services::notify::CodeDelivery;
use ep_core::services::token::TokenService;
use ep_shared::types::response::ApiResponse;

/// Application state holding the shared services
pub struct AppState<U, O, D>
where
    U: UserRepository,
    O: OtpSessionRepository,
    D: CodeDelivery,
{
    pub auth_service: Arc<AuthService<U, O, D>>,
    pub token_service: Arc<TokenService>,
}

/// Handler for POST /api/v1/auth/login
///
/// Checks the credentials and, with OTP enabled, opens a challenge:
/// the response carries an opaque session token and the code goes out
/// to the user's contact on file. With OTP disabled the response is the
/// authenticated profile and access token directly.
pub async fn login<U, O, D>(
    state: web::Data<AppState<U, O, D>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpSessionRepository + 'static,
    D: CodeDelivery + 'static,
{
    let outcome = state
        .auth_service
        .login(request.identifier.as_deref(), request.password.as_deref())
        .await;

    match outcome {
        Ok(LoginOutcome::OtpChallenge {
            session_token,
            message,
        }) => HttpResponse::Ok().json(ApiResponse::success(OtpChallengeResponse {
            otp_required: true,
            session_token,
            message,
        })),
        Ok(LoginOutcome::Authenticated(auth)) => {
            HttpResponse::Ok().json(ApiResponse::success(AuthSuccessResponse {
                otp_required: false,
                user: auth.user,
                token: auth.token,
            }))
        }
        Err(error) => domain_error_response(&error),
    }
}
