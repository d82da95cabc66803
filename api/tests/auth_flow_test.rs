//! End-to-end HTTP tests for the authentication flow
//!
//! Runs the real application factory against in-memory repositories and a
//! recording delivery stub, exercising the full login -> verify -> me flow
//! over HTTP.

use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use serde_json::{json, Value};

use ep_api::app::create_app;
use ep_api::routes::auth::AppState;
use ep_core::domain::entities::user::{User, UserRole};
use ep_core::repositories::{MockOtpSessionRepository, MockUserRepository};
use ep_core::services::auth::{AuthService, AuthServiceConfig};
use ep_core::services::notify::{CodeDelivery, DeliveryChannel, DeliveryReceipt};
use ep_core::services::token::{TokenService, TokenServiceConfig};
use ep_shared::config::environment::Environment;
use ep_shared::config::server::CorsConfig;

const PASSWORD: &str = "hunter2hunter2";

/// Delivery stub that records codes so tests can submit them
#[derive(Default)]
struct RecordingDelivery {
    codes: Mutex<Vec<String>>,
}

impl RecordingDelivery {
    fn last_code(&self) -> Option<String> {
        self.codes.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CodeDelivery for RecordingDelivery {
    async fn deliver(
        &self,
        _contact: &str,
        code: &str,
        _expiry_minutes: i64,
    ) -> Result<DeliveryReceipt, String> {
        self.codes.lock().unwrap().push(code.to_string());
        Ok(DeliveryReceipt::new(DeliveryChannel::Sms))
    }

    async fn deliver_email(
        &self,
        _email: &str,
        code: &str,
        _expiry_minutes: i64,
    ) -> Result<DeliveryReceipt, String> {
        self.codes.lock().unwrap().push(code.to_string());
        Ok(DeliveryReceipt::new(DeliveryChannel::Email))
    }
}

struct Fixture {
    state: web::Data<AppState<MockUserRepository, MockOtpSessionRepository, RecordingDelivery>>,
    users: Arc<MockUserRepository>,
    delivery: Arc<RecordingDelivery>,
    user_id: uuid::Uuid,
}

fn fixture() -> Fixture {
    let hash = bcrypt::hash(PASSWORD, 4).unwrap();
    let user = User::new("Marie Curie", UserRole::Teacher, hash)
        .with_login_id("marie.curie")
        .with_email("marie.curie@example.edu")
        .with_phone("+15559876543");
    let user_id = user.id;

    let users = Arc::new(MockUserRepository::with_user(user));
    let sessions = Arc::new(MockOtpSessionRepository::new());
    let delivery = Arc::new(RecordingDelivery::default());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new("test-secret")));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        sessions,
        Arc::clone(&delivery),
        Arc::clone(&token_service),
        AuthServiceConfig::default(),
    ));

    Fixture {
        state: web::Data::new(AppState {
            auth_service,
            token_service,
        }),
        users,
        delivery,
        user_id,
    }
}

macro_rules! init_app {
    ($fixture:expr) => {
        test::init_service(create_app(
            $fixture.state.clone(),
            Environment::Development,
            &CorsConfig::default(),
        ))
        .await
    };
}

#[actix_web::test]
async fn test_health_check() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_full_login_flow_over_http() {
    let fx = fixture();
    let app = init_app!(fx);

    // Step 1: password login opens a challenge
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "marie.curie", "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["otp_required"], true);
    let session_token = body["data"]["session_token"].as_str().unwrap().to_string();

    // Step 2: exchange the delivered code for an access token
    let code = fx.delivery.last_code().unwrap();
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "session_token": session_token, "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["otp_required"], false);
    assert_eq!(body["data"]["user"]["role"], "teacher");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // Step 3: the token opens the protected profile route
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Marie Curie");
    assert!(body["data"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "marie.curie", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[actix_web::test]
async fn test_missing_credentials_are_rejected() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "marie.curie" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "missing_credentials");
}

#[actix_web::test]
async fn test_wrong_code_then_correct_code() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "marie.curie", "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let session_token = body["data"]["session_token"].as_str().unwrap().to_string();

    let code = fx.delivery.last_code().unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "session_token": session_token, "code": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_code");

    // The same session still accepts the right code
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "session_token": session_token, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_resend_returns_new_session_token() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "marie.curie", "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let first_token = body["data"]["session_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/resend-otp")
        .set_json(json!({ "session_token": first_token }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    let second_token = body["data"]["session_token"].as_str().unwrap();
    assert_ne!(first_token, second_token);
}

#[actix_web::test]
async fn test_rate_limit_returns_429() {
    let fx = fixture();
    let app = init_app!(fx);

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "identifier": "marie.curie", "password": PASSWORD }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "marie.curie", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "rate_limited");
}

#[actix_web::test]
async fn test_me_requires_bearer_token() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_with_deleted_account_is_401() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "marie.curie", "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let session_token = body["data"]["session_token"].as_str().unwrap().to_string();

    let code = fx.delivery.last_code().unwrap();
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "session_token": session_token, "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // The token is still valid, but the account behind it is gone.
    fx.users.remove(fx.user_id);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "user_not_found");
}

#[actix_web::test]
async fn test_unknown_route_is_404() {
    let fx = fixture();
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
