use serde::{Deserialize, Serialize};

/// Stored user document. `password_hash` is an Argon2id PHC string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Registration payload. Every field is optional at the wire level so that a
/// missing field surfaces as a validation error instead of a parse failure.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Identity carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            full_name: user.full_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub username: String,
    pub email: String,
}

impl From<Identity> for Profile {
    fn from(identity: Identity) -> Self {
        Self {
            full_name: identity.full_name,
            username: identity.username,
            email: identity.email,
        }
    }
}
