use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{OtpChallengeResponse, ResendOtpRequest};
use crate::handlers::error::domain_error_response;
use crate::routes::auth::AppState;

use ep_core::domain::value_objects::LoginOutcome;
use ep_core::errors::DomainResult;
use ep_core::repositories::{OtpSessionRepository, UserRepository};
use ep_core::services::notify::CodeDelivery;
use ep_shared::types::response::ApiResponse;

fn challenge_response(outcome: DomainResult<LoginOutcome>) -> HttpResponse {
    match outcome {
        Ok(LoginOutcome::OtpChallenge {
            session_token,
            message,
        }) => HttpResponse::Ok().json(ApiResponse::success(OtpChallengeResponse {
            otp_required: true,
            session_token,
            message,
        })),
        // Resend never authenticates directly
        Ok(LoginOutcome::Authenticated(_)) => HttpResponse::InternalServerError().json(
            ApiResponse::<()>::error("internal_error", "An internal error occurred"),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/auth/resend-otp
///
/// Issues a fresh code for an open challenge over the contact the
/// original challenge targeted. The new session token replaces the old
/// one on the client; the old session stays valid until it expires.
pub async fn resend_otp<U, O, D>(
    state: web::Data<AppState<U, O, D>>,
    request: web::Json<ResendOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpSessionRepository + 'static,
    D: CodeDelivery + 'static,
{
    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "validation_error",
            "Invalid session token format",
        ));
    }

    challenge_response(state.auth_service.resend_otp(&request.session_token).await)
}

/// Handler for POST /api/v1/auth/resend-otp-email
///
/// Same as resend, but forces the email channel for users whose SMS is
/// not arriving. Fails hard when the account has no email or the mail
/// provider rejects the message.
pub async fn resend_otp_email<U, O, D>(
    state: web::Data<AppState<U, O, D>>,
    request: web::Json<ResendOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpSessionRepository + 'static,
    D: CodeDelivery + 'static,
{
    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "validation_error",
            "Invalid session token format",
        ));
    }

    challenge_response(
        state
            .auth_service
            .resend_otp_email(&request.session_token)
            .await,
    )
}
