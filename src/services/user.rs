use std::sync::Arc;

use tracing::{info, warn};

use super::error::{ServiceError, ServiceResult};
use crate::auth::{hash_password, verify_password, TokenIssuer, UNKNOWN_USER_HASH};
use crate::database::{RepositoryError, UserRepository};
use crate::models::{NewUser, Role, User, Vocabulary};

/// Registration, password login and token issuance.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, email: &str, password: &str, raw_role: &str) -> ServiceResult<User> {
        let role = parse_role(raw_role)?;
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ServiceError::InvalidInput("invalid email".to_string()));
        }
        if password.is_empty() {
            return Err(ServiceError::InvalidInput("password must not be empty".to_string()));
        }

        let new_user = NewUser { email: email.to_string(), password_hash: hash_password(password)?, role };
        let user = match self.users.create(new_user).await {
            Ok(user) => user,
            Err(RepositoryError::UniqueViolation(_)) => {
                warn!(email, "duplicate registration");
                return Err(ServiceError::UserAlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, %role, "user registered");
        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> ServiceResult<User> {
        self.users.find_by_email(email.trim()).await?.ok_or(ServiceError::UserNotFound)
    }

    /// Unknown email and wrong password fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<String> {
        let user = match self.users.find_by_email(email.trim()).await? {
            Some(user) => user,
            None => {
                verify_password(password, UNKNOWN_USER_HASH);
                return Err(ServiceError::InvalidCredentials);
            }
        };
        if !verify_password(password, &user.password_hash) {
            warn!(user_id = %user.id, "password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(self.tokens.issue(user.role, Some(user.email))?)
    }

    /// Issues a token for a caller-chosen role with no credential check.
    pub fn dummy_login(&self, raw_role: &str) -> ServiceResult<String> {
        let role = parse_role(raw_role)?;
        Ok(self.tokens.issue(role, None)?)
    }
}

fn parse_role(raw: &str) -> ServiceResult<Role> {
    Role::parse(raw).ok_or_else(|| ServiceError::InvalidRole(raw.to_string()))
}
