//! Main authentication service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use ep_shared::utils::contact::mask_contact;

use crate::domain::entities::otp_session::OtpSession;
use crate::domain::entities::user::{User, UserProfile};
use crate::domain::value_objects::{AuthResponse, LoginOutcome};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{OtpSessionRepository, UserRepository};
use crate::services::notify::CodeDelivery;
use crate::services::otp::{generate_code, generate_session_token, hash_code, verify_code};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service for the password + OTP login flow
pub struct AuthService<U, O, D>
where
    U: UserRepository,
    O: OtpSessionRepository,
    D: CodeDelivery,
{
    /// User repository for account lookups
    user_repository: Arc<U>,
    /// OTP session store, also the source of truth for rate limiting
    session_repository: Arc<O>,
    /// Outbound code delivery (SMS, email, log fallback)
    delivery: Arc<D>,
    /// Token service for JWT issuance and verification
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, O, D> AuthService<U, O, D>
where
    U: UserRepository,
    O: OtpSessionRepository,
    D: CodeDelivery,
{
    pub fn new(
        user_repository: Arc<U>,
        session_repository: Arc<O>,
        delivery: Arc<D>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            delivery,
            token_service,
            config,
        }
    }

    /// Authenticate credentials and, when OTP is enabled, open a challenge
    ///
    /// This method:
    /// 1. Rejects requests missing either credential
    /// 2. Looks up the user and checks the password hash
    /// 3. With OTP disabled, issues an access token immediately
    /// 4. With OTP enabled, rate-limits, persists an OTP session and
    ///    delivers the code to the user's preferred contact
    ///
    /// Unknown identifiers and wrong passwords both surface as
    /// [`AuthError::InvalidCredentials`] so the response does not reveal
    /// which accounts exist.
    pub async fn login(
        &self,
        identifier: Option<&str>,
        password: Option<&str>,
    ) -> DomainResult<LoginOutcome> {
        // Step 1: Both credentials are required
        let (identifier, password) = match (identifier, password) {
            (Some(i), Some(p)) if !i.is_empty() && !p.is_empty() => (i, p),
            _ => return Err(DomainError::Auth(AuthError::MissingInput)),
        };

        // Step 2: Look up the user and verify the password
        let user = self
            .user_repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        if !bcrypt::verify(password, &user.password_hash).unwrap_or(false) {
            warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        // Step 3: With OTP disabled, the password alone authenticates
        if !self.config.otp_enabled {
            let token = self.token_service.issue(&user)?;
            info!(user_id = %user.id, "Login succeeded with OTP disabled");
            return Ok(LoginOutcome::Authenticated(AuthResponse::new(
                user.to_profile(),
                token,
            )));
        }

        // Step 4: Open an OTP challenge against the preferred contact
        let contact = user
            .preferred_contact()
            .ok_or_else(|| DomainError::Validation {
                message: "Account has no contact for verification codes".to_string(),
            })?
            .to_string();

        let (session_token, code_sent) = self.open_challenge(&user, &contact).await?;

        info!(
            user_id = %user.id,
            contact = %mask_contact(&contact),
            code_sent,
            "OTP challenge opened"
        );

        Ok(LoginOutcome::OtpChallenge {
            session_token,
            message: format!("Verification code sent to {}", mask_contact(&contact)),
        })
    }

    /// Verify a submitted code and exchange the session for an access token
    ///
    /// The session is consumed exactly once: a conditional store update
    /// decides the winner when two requests race on the same token.
    pub async fn verify_otp(&self, session_token: &str, code: &str) -> DomainResult<AuthResponse> {
        let session = self
            .session_repository
            .find_by_token(session_token)
            .await?
            .ok_or(DomainError::Auth(AuthError::SessionNotFound))?;

        if session.used {
            return Err(DomainError::Auth(AuthError::AlreadyUsed));
        }
        if session.is_expired() {
            return Err(DomainError::Auth(AuthError::Expired));
        }
        if !verify_code(code, &session.code_hash) {
            // Wrong guesses leave the session open until it expires
            warn!(
                contact = %mask_contact(&session.contact),
                "OTP verification failed: code mismatch"
            );
            return Err(DomainError::Auth(AuthError::InvalidCode));
        }

        // Conditional update: only one concurrent verifier may consume
        if !self.session_repository.mark_used(session_token).await? {
            return Err(DomainError::Auth(AuthError::AlreadyUsed));
        }

        let user = self
            .user_repository
            .find_by_id(session.user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let token = self.token_service.issue(&user)?;

        info!(user_id = %user.id, "OTP verification succeeded");

        Ok(AuthResponse::new(user.to_profile(), token))
    }

    /// Issue a fresh code for an open challenge, over the original contact
    ///
    /// The previous session stays untouched; either code works until its
    /// own session expires or is consumed.
    pub async fn resend_otp(&self, session_token: &str) -> DomainResult<LoginOutcome> {
        let (user, session) = self.reload_challenge(session_token).await?;
        let contact = session.contact.clone();

        let (new_token, code_sent) = self.open_challenge(&user, &contact).await?;

        info!(
            user_id = %user.id,
            contact = %mask_contact(&contact),
            code_sent,
            "OTP code resent"
        );

        Ok(LoginOutcome::OtpChallenge {
            session_token: new_token,
            message: format!("Verification code sent to {}", mask_contact(&contact)),
        })
    }

    /// Issue a fresh code for an open challenge, forcing the email channel
    ///
    /// Unlike the general path, a delivery failure here is surfaced: the
    /// caller explicitly asked for email and needs to know it did not go out.
    pub async fn resend_otp_email(&self, session_token: &str) -> DomainResult<LoginOutcome> {
        let (user, _) = self.reload_challenge(session_token).await?;

        let email = user
            .email
            .clone()
            .ok_or(DomainError::Auth(AuthError::NoEmailOnFile))?;

        let (new_token, code) = self.create_session(&user, &email).await?;

        self.delivery
            .deliver_email(&email, &code, self.config.code_expiry_minutes)
            .await
            .map_err(|e| {
                warn!(
                    user_id = %user.id,
                    contact = %mask_contact(&email),
                    error = %e,
                    "Email code delivery failed"
                );
                DomainError::Auth(AuthError::DeliveryFailed)
            })?;

        info!(
            user_id = %user.id,
            contact = %mask_contact(&email),
            "OTP code sent over email"
        );

        Ok(LoginOutcome::OtpChallenge {
            session_token: new_token,
            message: format!("Verification code sent to {}", mask_contact(&email)),
        })
    }

    /// Resolve an access token to the profile of the user it was issued to
    pub async fn authenticated_user(&self, access_token: &str) -> DomainResult<UserProfile> {
        let claims = self.token_service.verify(access_token)?;
        let user_id = claims.user_id().map_err(|_| DomainError::Unauthorized)?;
        self.profile(user_id).await
    }

    /// Load the public profile for an already-authenticated user id
    pub async fn profile(&self, user_id: uuid::Uuid) -> DomainResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        Ok(user.to_profile())
    }

    /// Rate-limit, generate and persist a new OTP session
    ///
    /// Returns the opaque session token and the plaintext code. The count
    /// is taken before the insert, so the new session does not count
    /// against its own window.
    async fn create_session(&self, user: &User, contact: &str) -> DomainResult<(String, String)> {
        let window_start = self.config.window_start();

        let issued = self
            .session_repository
            .count_for_contact_since(contact, window_start)
            .await?;

        if issued >= self.config.rate_limit.max_per_contact as u64 {
            let retry_seconds = match self
                .session_repository
                .oldest_for_contact_since(contact, window_start)
                .await?
            {
                Some(oldest) => {
                    let reset = oldest + chrono::Duration::seconds(self.config.rate_limit.window_seconds());
                    (reset - Utc::now()).num_seconds().max(1)
                }
                None => self.config.rate_limit.window_seconds(),
            };

            warn!(
                contact = %mask_contact(contact),
                issued,
                retry_seconds,
                "OTP issuance rate limit hit"
            );
            return Err(DomainError::Auth(AuthError::RateLimited {
                seconds: retry_seconds,
            }));
        }

        let code = generate_code(self.config.code_length);
        let session_token = generate_session_token();
        let code_hash = hash_code(&code)?;

        let session = OtpSession::new(
            session_token.clone(),
            user.id,
            contact.to_string(),
            code_hash,
            self.config.code_expiry_minutes,
        );
        self.session_repository.insert(session).await?;

        Ok((session_token, code))
    }

    /// `create_session` plus best-channel delivery with the failure swallowed
    ///
    /// Delivery problems on this path are logged, not surfaced; the client
    /// can fall back to the email resend flow. Returns the new session
    /// token and whether the code actually went out.
    async fn open_challenge(&self, user: &User, contact: &str) -> DomainResult<(String, bool)> {
        let (session_token, code) = self.create_session(user, contact).await?;

        let code_sent = match self
            .delivery
            .deliver(contact, &code, self.config.code_expiry_minutes)
            .await
        {
            Ok(receipt) => {
                info!(
                    contact = %mask_contact(contact),
                    channel = receipt.channel.as_str(),
                    "Code delivered"
                );
                true
            }
            Err(e) => {
                warn!(
                    contact = %mask_contact(contact),
                    error = %e,
                    "Code delivery failed"
                );
                false
            }
        };

        Ok((session_token, code_sent))
    }

    /// Look an open challenge back up by its session token
    ///
    /// Used sessions are rejected; expired ones are accepted, resending is
    /// how the user recovers from an expired code.
    async fn reload_challenge(&self, session_token: &str) -> DomainResult<(User, OtpSession)> {
        let session = self
            .session_repository
            .find_by_token(session_token)
            .await?
            .ok_or(DomainError::Auth(AuthError::SessionNotFound))?;

        if session.used {
            return Err(DomainError::Auth(AuthError::AlreadyUsed));
        }

        let user = self
            .user_repository
            .find_by_id(session.user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        Ok((user, session))
    }
}
