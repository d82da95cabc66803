//! Stateless JWT issuance and verification

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::domain::entities::token::{Claims, JWT_AUDIENCE, JWT_ISSUER};
use crate::domain::entities::user::User;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Signs and verifies access tokens with HS256
///
/// No token state is persisted; validity is carried entirely by the
/// signature and the registered claims.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a signed access token for the given user
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let claims =
            Claims::new_access_token(user.id, user.role, &user.name, self.config.expiry_days);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    /// Verify a token's signature and registered claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::UserRole;

    fn test_user() -> User {
        User::new("Ada Lovelace", UserRole::Teacher, "hash".to_string())
    }

    fn service() -> TokenService {
        TokenService::new(TokenServiceConfig::new("test-secret"))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let user = test_user();

        let token = svc.issue(&user).unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.user_role().unwrap(), UserRole::Teacher);
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(&test_user()).unwrap();
        let other = TokenService::new(TokenServiceConfig::new("different-secret"));
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert_eq!(service().verify("not.a.jwt"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = TokenService::new(TokenServiceConfig::new("test-secret").with_expiry_days(-1));
        let token = svc.issue(&test_user()).unwrap();
        assert_eq!(svc.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let svc = service();
        let mut token = svc.issue(&test_user()).unwrap();
        token.push('x');
        assert_eq!(svc.verify(&token), Err(TokenError::Invalid));
    }
}
