use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

/// Request bodies default missing fields to empty strings so the presence
/// checks in the handlers produce the contract's 400s.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// The only user shape that leaves the service. There is no password field
/// to scrub: the hash cannot pass through this type.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: Role,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::user;

    #[test]
    fn public_user_never_carries_a_password() {
        let mut stored = user("Alice", "alice@example.com", Role::Member);
        stored.password = "$argon2id$v=19$secret-hash".into();
        let json = serde_json::to_value(PublicUser::from(stored)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["name"], "Alice");
    }

    #[test]
    fn absent_avatar_is_omitted() {
        let json = serde_json::to_value(PublicUser::from(user(
            "A",
            "a@example.com",
            Role::Member,
        )))
        .unwrap();
        assert!(json.get("avatar").is_none());
    }
}
