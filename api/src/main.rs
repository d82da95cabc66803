//! EduPortal API server entry point

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use ep_api::app::create_app;
use ep_api::routes::auth::AppState;
use ep_core::services::auth::{AuthService, AuthServiceConfig};
use ep_core::services::token::{TokenService, TokenServiceConfig};
use ep_infra::database::{DatabasePool, MySqlOtpSessionRepository, MySqlUserRepository};
use ep_infra::notify::DeliveryDispatcher;
use ep_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting EduPortal API server");

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();

    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let session_repository = Arc::new(MySqlOtpSessionRepository::new(pool.get_pool().clone()));

    let dispatcher = Arc::new(
        DeliveryDispatcher::from_config(config.sms.clone(), config.mail.clone())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );

    let token_service = Arc::new(TokenService::new(
        TokenServiceConfig::new(config.jwt.secret.clone())
            .with_expiry_days(config.jwt.expiry_days),
    ));

    let auth_config = AuthServiceConfig {
        otp_enabled: config.otp.enabled,
        code_length: config.otp.code_length,
        code_expiry_minutes: config.otp.expiry_minutes,
        rate_limit: config.rate_limit.clone(),
    };

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        session_repository,
        dispatcher,
        Arc::clone(&token_service),
        auth_config,
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        token_service,
    });

    let environment = config.environment;
    let cors_config = config.cors.clone();
    let workers = config.server.workers;

    info!("Server listening on {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), environment, &cors_config)
    });

    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
