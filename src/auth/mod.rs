pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::models::Role;

pub use password::{hash_password, verify_password, PasswordError, UNKNOWN_USER_HASH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Signs and verifies HS256 tokens with the configured shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("expiry", &self.expiry).finish()
    }
}

impl TokenIssuer {
    pub fn new(security: &SecurityConfig) -> Result<Self, JwtError> {
        if security.secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        let expiry = i64::try_from(security.jwt_expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| JwtError::TokenGeneration("token expiry out of range".to_string()))?;

        let secret = security.secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry,
        })
    }

    pub fn issue(&self, role: Role, email: Option<String>) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| JwtError::TokenGeneration("token expiry out of range".to_string()))?;
        let claims = Claims {
            role,
            email,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Checks signature and expiry, then returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AppConfig::development().security).unwrap()
    }

    #[test]
    fn issued_token_round_trips_role_and_email() {
        let issuer = issuer();
        let token = issuer.issue(Role::Client, Some("a@b.c".to_string())).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.role, Role::Client);
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let mut security = AppConfig::development().security;
        security.secret = "another".to_string();
        let foreign = TokenIssuer::new(&security).unwrap().issue(Role::Moderator, None).unwrap();
        assert!(matches!(issuer().verify(&foreign), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let claims = Claims {
            role: Role::Client,
            email: None,
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
            iat: (Utc::now() - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(AppConfig::development().security.secret.as_bytes()),
        )
        .unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn huge_expiry_is_an_error_not_a_panic() {
        let mut security = AppConfig::development().security;
        security.jwt_expiry_hours = 9_000_000_000_000_000;
        assert!(matches!(TokenIssuer::new(&security), Err(JwtError::TokenGeneration(_))));

        security.jwt_expiry_hours = u64::MAX;
        assert!(TokenIssuer::new(&security).is_err());
    }

    #[test]
    fn expiry_far_beyond_the_calendar_fails_to_issue() {
        let mut security = AppConfig::development().security;
        security.jwt_expiry_hours = 2_000_000_000_000;
        let issuer = TokenIssuer::new(&security).unwrap();
        assert!(matches!(issuer.issue(Role::Client, None), Err(JwtError::TokenGeneration(_))));
    }

    #[test]
    fn empty_secret_is_refused() {
        let mut security = AppConfig::development().security;
        security.secret.clear();
        assert!(matches!(TokenIssuer::new(&security), Err(JwtError::InvalidSecret)));
    }
}
