//! JWT authentication middleware
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! with the core token service, and injects an [`AuthContext`] into the
//! request extensions for handlers to extract.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use ep_core::domain::entities::token::Claims;
use ep_core::domain::entities::user::UserRole;
use ep_core::services::token::TokenService;

/// Authenticated user context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the token subject
    pub user_id: Uuid,
    /// Role carried by the token
    pub role: UserRole,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    fn from_claims(claims: &Claims) -> Result<Self, String> {
        let user_id = claims
            .user_id()
            .map_err(|_| "invalid subject claim".to_string())?;
        let role = claims
            .user_role()
            .ok_or_else(|| "invalid role claim".to_string())?;
        Ok(Self {
            user_id,
            role,
            jti: claims.jti.clone(),
        })
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Err(ErrorUnauthorized("Missing or invalid Authorization header"))
                }
            };

            let claims = token_service
                .verify(&token)
                .map_err(|e| ErrorUnauthorized(format!("Token verification failed: {}", e)))?;

            let context = AuthContext::from_claims(&claims)
                .map_err(|e| ErrorUnauthorized(format!("Invalid token: {}", e)))?;

            req.extensions_mut().insert(context);

            service.call(req).await
        })
    }
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
