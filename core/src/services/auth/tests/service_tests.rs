//! Behavioral tests for the login, verification and resend flows

use chrono::{Duration, Utc};

use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::LoginOutcome;
use crate::errors::{AuthError, DomainError};
use crate::services::auth::AuthServiceConfig;
use crate::services::notify::DeliveryChannel;

use super::mocks::{harness, harness_with, test_user, TEST_PASSWORD};

fn assert_auth_err(result: Result<impl std::fmt::Debug, DomainError>, expected: AuthError) {
    match result {
        Err(DomainError::Auth(e)) => assert_eq!(e, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

/// Drive a login to the OTP challenge and return the session token
async fn open_challenge(
    h: &super::mocks::TestHarness,
    identifier: &str,
) -> String {
    match h
        .service
        .login(Some(identifier), Some(TEST_PASSWORD))
        .await
        .unwrap()
    {
        LoginOutcome::OtpChallenge { session_token, .. } => session_token,
        other => panic!("expected an OTP challenge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_requires_both_credentials() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));

    assert_auth_err(h.service.login(None, Some("pw")).await, AuthError::MissingInput);
    assert_auth_err(h.service.login(Some("ada"), None).await, AuthError::MissingInput);
    assert_auth_err(h.service.login(Some(""), Some("pw")).await, AuthError::MissingInput);
    assert_auth_err(h.service.login(Some("ada"), Some("")).await, AuthError::MissingInput);
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));

    assert_auth_err(
        h.service.login(Some("nobody"), Some(TEST_PASSWORD)).await,
        AuthError::InvalidCredentials,
    );
    assert_auth_err(
        h.service.login(Some("ada.lovelace.login"), Some("wrong")).await,
        AuthError::InvalidCredentials,
    );
    // Neither attempt may leave a session behind
    assert!(h.sessions.is_empty());
}

#[tokio::test]
async fn test_otp_disabled_authenticates_immediately() {
    let config = AuthServiceConfig {
        otp_enabled: false,
        ..AuthServiceConfig::default()
    };
    let user = test_user("Grace Hopper", UserRole::Admin);
    let h = harness_with(config, user.clone());

    match h
        .service
        .login(Some("grace.hopper.login"), Some(TEST_PASSWORD))
        .await
        .unwrap()
    {
        LoginOutcome::Authenticated(response) => {
            assert_eq!(response.user.id, user.id);
            assert_eq!(response.user.role, UserRole::Admin);
            assert!(!response.token.is_empty());
            let profile = h.service.authenticated_user(&response.token).await.unwrap();
            assert_eq!(profile.id, user.id);
        }
        other => panic!("expected immediate authentication, got {:?}", other),
    }
    assert!(h.sessions.is_empty());
    assert_eq!(h.delivery.delivery_count(), 0);
}

#[tokio::test]
async fn test_full_challenge_flow_issues_usable_token() {
    let user = test_user("Ada Lovelace", UserRole::Teacher);
    let h = harness(user.clone());

    let session_token = open_challenge(&h, "ada.lovelace.login").await;

    // Code goes to the preferred contact (phone) over the best channel
    assert_eq!(h.delivery.last_contact().as_deref(), Some("+15551234567"));
    assert_eq!(h.delivery.last_channel(), Some(DeliveryChannel::Sms));

    // Only the hash is persisted
    let code = h.delivery.last_code().unwrap();
    let stored = h.sessions.get(&session_token).unwrap();
    assert_ne!(stored.code_hash, code);
    assert!(!stored.used);

    let response = h.service.verify_otp(&session_token, &code).await.unwrap();
    assert_eq!(response.user.id, user.id);

    let profile = h.service.authenticated_user(&response.token).await.unwrap();
    assert_eq!(profile.role, UserRole::Teacher);

    assert!(h.sessions.get(&session_token).unwrap().used);
}

#[tokio::test]
async fn test_verify_unknown_session_token() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    assert_auth_err(
        h.service.verify_otp("no-such-token", "123456").await,
        AuthError::SessionNotFound,
    );
}

#[tokio::test]
async fn test_session_is_single_use() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let session_token = open_challenge(&h, "ada.lovelace.login").await;
    let code = h.delivery.last_code().unwrap();

    h.service.verify_otp(&session_token, &code).await.unwrap();
    assert_auth_err(
        h.service.verify_otp(&session_token, &code).await,
        AuthError::AlreadyUsed,
    );
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let session_token = open_challenge(&h, "ada.lovelace.login").await;
    let code = h.delivery.last_code().unwrap();

    let mut session = h.sessions.get(&session_token).unwrap();
    session.expires_at = Utc::now() - Duration::seconds(1);
    h.sessions.put(session);

    assert_auth_err(
        h.service.verify_otp(&session_token, &code).await,
        AuthError::Expired,
    );
}

#[tokio::test]
async fn test_wrong_code_leaves_session_open() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let session_token = open_challenge(&h, "ada.lovelace.login").await;
    let code = h.delivery.last_code().unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    assert_auth_err(
        h.service.verify_otp(&session_token, wrong).await,
        AuthError::InvalidCode,
    );
    assert!(!h.sessions.get(&session_token).unwrap().used);

    // A wrong guess does not burn the session
    assert!(h.service.verify_otp(&session_token, &code).await.is_ok());
}

#[tokio::test]
async fn test_user_deleted_mid_challenge() {
    let user = test_user("Ada Lovelace", UserRole::Teacher);
    let h = harness(user.clone());
    let session_token = open_challenge(&h, "ada.lovelace.login").await;
    let code = h.delivery.last_code().unwrap();

    h.users.remove(user.id);

    assert_auth_err(
        h.service.verify_otp(&session_token, &code).await,
        AuthError::UserNotFound,
    );
}

#[tokio::test]
async fn test_delivery_failure_still_opens_challenge() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    h.delivery.fail_general();

    // The session exists even though nothing went out; the client can
    // switch to the email resend flow.
    let session_token = open_challenge(&h, "ada.lovelace.login").await;
    assert!(h.sessions.get(&session_token).is_some());
    assert_eq!(h.delivery.delivery_count(), 0);
}

#[tokio::test]
async fn test_user_without_contact_cannot_start_challenge() {
    let hash = bcrypt::hash(TEST_PASSWORD, 4).unwrap();
    let user = User::new("No Contact", UserRole::Student, hash).with_login_id("no.contact");
    let h = harness(user);

    let result = h.service.login(Some("no.contact"), Some(TEST_PASSWORD)).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_resend_issues_fresh_session_and_keeps_old_one() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let first_token = open_challenge(&h, "ada.lovelace.login").await;
    let first_code = h.delivery.last_code().unwrap();

    let second_token = match h.service.resend_otp(&first_token).await.unwrap() {
        LoginOutcome::OtpChallenge { session_token, .. } => session_token,
        other => panic!("expected an OTP challenge, got {:?}", other),
    };

    assert_ne!(first_token, second_token);
    assert_eq!(h.sessions.len(), 2);
    assert_eq!(h.delivery.delivery_count(), 2);
    // Resend reuses the contact the original challenge targeted
    assert_eq!(h.delivery.last_contact().as_deref(), Some("+15551234567"));

    // The first session is untouched and still consumable
    assert!(h.service.verify_otp(&first_token, &first_code).await.is_ok());
}

#[tokio::test]
async fn test_resend_rejects_unknown_and_used_sessions() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));

    assert_auth_err(
        h.service.resend_otp("no-such-token").await,
        AuthError::SessionNotFound,
    );

    let session_token = open_challenge(&h, "ada.lovelace.login").await;
    let code = h.delivery.last_code().unwrap();
    h.service.verify_otp(&session_token, &code).await.unwrap();

    assert_auth_err(
        h.service.resend_otp(&session_token).await,
        AuthError::AlreadyUsed,
    );
}

#[tokio::test]
async fn test_resend_works_after_expiry() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let session_token = open_challenge(&h, "ada.lovelace.login").await;

    let mut session = h.sessions.get(&session_token).unwrap();
    session.expires_at = Utc::now() - Duration::seconds(1);
    h.sessions.put(session);

    assert!(h.service.resend_otp(&session_token).await.is_ok());
}

#[tokio::test]
async fn test_email_resend_forces_email_channel() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let session_token = open_challenge(&h, "ada.lovelace.login").await;

    let new_token = match h.service.resend_otp_email(&session_token).await.unwrap() {
        LoginOutcome::OtpChallenge { session_token, .. } => session_token,
        other => panic!("expected an OTP challenge, got {:?}", other),
    };

    assert_eq!(h.delivery.last_channel(), Some(DeliveryChannel::Email));
    assert_eq!(
        h.delivery.last_contact().as_deref(),
        Some("ada.lovelace@example.edu")
    );

    let code = h.delivery.last_code().unwrap();
    assert!(h.service.verify_otp(&new_token, &code).await.is_ok());
}

#[tokio::test]
async fn test_email_resend_without_email_on_file() {
    let hash = bcrypt::hash(TEST_PASSWORD, 4).unwrap();
    let user = User::new("Phone Only", UserRole::Student, hash)
        .with_login_id("phone.only")
        .with_phone("+15557654321");
    let h = harness(user);

    let session_token = open_challenge(&h, "phone.only").await;
    assert_auth_err(
        h.service.resend_otp_email(&session_token).await,
        AuthError::NoEmailOnFile,
    );
}

#[tokio::test]
async fn test_email_resend_surfaces_delivery_failure() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let session_token = open_challenge(&h, "ada.lovelace.login").await;

    h.delivery.fail_email();
    assert_auth_err(
        h.service.resend_otp_email(&session_token).await,
        AuthError::DeliveryFailed,
    );
}

#[tokio::test]
async fn test_authenticated_user_rejects_garbage_token() {
    let h = harness(test_user("Ada Lovelace", UserRole::Teacher));
    let result = h.service.authenticated_user("not-a-token").await;
    assert!(matches!(result, Err(DomainError::Token(_))));
}

#[tokio::test]
async fn test_authenticated_user_for_deleted_account() {
    let config = AuthServiceConfig {
        otp_enabled: false,
        ..AuthServiceConfig::default()
    };
    let user = test_user("Ada Lovelace", UserRole::Teacher);
    let h = harness_with(config, user.clone());

    let token = match h
        .service
        .login(Some("ada.lovelace.login"), Some(TEST_PASSWORD))
        .await
        .unwrap()
    {
        LoginOutcome::Authenticated(response) => response.token,
        other => panic!("expected immediate authentication, got {:?}", other),
    };

    h.users.remove(user.id);
    assert_auth_err(
        h.service.authenticated_user(&token).await,
        AuthError::UserNotFound,
    );
}
