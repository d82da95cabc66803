//! Domain error to HTTP response mapping
//!
//! Every auth failure on the credential and code paths maps to the same
//! 400 family with stable machine-readable codes; messages stay generic
//! so responses do not reveal which accounts or sessions exist.

use actix_web::HttpResponse;

use ep_core::errors::{AuthError, DomainError, TokenError};
use ep_shared::types::response::ApiResponse;

/// Convert a domain error into an HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    log::warn!("Domain error: {}", error);

    match error {
        DomainError::Auth(auth_error) => auth_error_response(auth_error),
        DomainError::Token(token_error) => token_error_response(token_error),
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("validation_error", message)),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ApiResponse::<()>::error("not_found", &format!("{} not found", resource)),
        ),
        DomainError::Unauthorized => HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error("unauthorized", "Authentication required")),
        DomainError::Internal { .. } => HttpResponse::InternalServerError().json(
            ApiResponse::<()>::error("internal_error", "An internal error occurred"),
        ),
    }
}

fn auth_error_response(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::MissingInput => HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "missing_credentials",
            "Identifier and password are required",
        )),
        AuthError::InvalidCredentials => HttpResponse::BadRequest().json(
            ApiResponse::<()>::error("invalid_credentials", "Invalid identifier or password"),
        ),
        AuthError::RateLimited { seconds } => {
            HttpResponse::TooManyRequests().json(ApiResponse::<()>::error(
                "rate_limited",
                &format!("Too many codes requested. Try again in {} seconds", seconds),
            ))
        }
        AuthError::SessionNotFound => HttpResponse::BadRequest().json(
            ApiResponse::<()>::error("session_not_found", "Unknown verification session"),
        ),
        AuthError::AlreadyUsed => HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "session_used",
            "This verification session has already been used",
        )),
        AuthError::Expired => HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "code_expired",
            "The verification code has expired. Request a new one",
        )),
        AuthError::InvalidCode => HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "invalid_code",
            "The verification code is incorrect",
        )),
        AuthError::UserNotFound => HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "user_not_found",
            "The account tied to this session no longer exists",
        )),
        AuthError::NoEmailOnFile => HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "no_email_on_file",
            "No email address is registered for this account",
        )),
        AuthError::DeliveryFailed => HttpResponse::InternalServerError().json(
            ApiResponse::<()>::error("delivery_failed", "The verification code could not be sent"),
        ),
    }
}

fn token_error_response(error: &TokenError) -> HttpResponse {
    let (code, message) = match error {
        TokenError::Expired => ("token_expired", "The access token has expired"),
        TokenError::NotYetValid => ("token_not_yet_valid", "The access token is not yet valid"),
        TokenError::Invalid => ("token_invalid", "The access token is invalid"),
        TokenError::GenerationFailed => {
            return HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                "internal_error",
                "An internal error occurred",
            ))
        }
    };
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error(code, message))
}
