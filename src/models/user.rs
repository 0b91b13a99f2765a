use serde::Serialize;
use uuid::Uuid;

use super::{vocabulary_serde, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Moderator,
}

impl Vocabulary for Role {
    const ALL: &'static [Self] = &[Role::Client, Role::Moderator];

    fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Moderator => "moderator",
        }
    }

    /// Exact match only; these values are never case-normalised.
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }
}

vocabulary_serde!(Role, "role");

/// A registered account. The password hash never leaves the process.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

/// Account data ready to be persisted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_match_exactly() {
        assert_eq!(Role::parse("client"), Some(Role::Client));
        assert_eq!(Role::parse("moderator"), Some(Role::Moderator));
        assert_eq!(Role::parse("Moderator"), None);
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn user_json_omits_password_hash() {
        let user = User {
            id: Uuid::nil(),
            email: "a@b.c".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: Role::Moderator,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "moderator");
        assert!(value.get("password_hash").is_none());
    }
}
