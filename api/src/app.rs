//! Application factory
//!
//! Builds the Actix application with middleware, routes and shared state.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    login::login, me::me, resend_otp::resend_otp, resend_otp::resend_otp_email,
    verify_otp::verify_otp, AppState,
};

use ep_core::repositories::{OtpSessionRepository, UserRepository};
use ep_core::services::notify::CodeDelivery;
use ep_shared::config::environment::Environment;
use ep_shared::config::server::CorsConfig;

/// Create and configure the application with all dependencies
pub fn create_app<U, O, D>(
    app_state: web::Data<AppState<U, O, D>>,
    environment: Environment,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    O: OtpSessionRepository + 'static,
    D: CodeDelivery + 'static,
{
    let cors = create_cors(environment, cors_config);
    let token_service = Arc::clone(&app_state.token_service);

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<U, O, D>))
                    .route("/verify-otp", web::post().to(verify_otp::<U, O, D>))
                    .route("/resend-otp", web::post().to(resend_otp::<U, O, D>))
                    .route("/resend-otp-email", web::post().to(resend_otp_email::<U, O, D>))
                    .route(
                        "/me",
                        web::get()
                            .to(me::<U, O, D>)
                            .wrap(JwtAuth::new(token_service)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "edu-portal-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
