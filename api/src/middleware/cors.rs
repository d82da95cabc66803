//! CORS middleware configuration
//!
//! Development is permissive; production only admits the origins named
//! in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ep_shared::config::environment::Environment;
use ep_shared::config::server::CorsConfig;

/// Create a CORS middleware instance for the current environment
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    match environment {
        Environment::Production => create_production_cors(config),
        _ => create_development_cors(config),
    }
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(config.max_age)
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
