//! User account and login models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Account role. Clients book work; providers offer it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Client,
    Provider,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => "client",
            UserType::Provider => "provider",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(UserType::Client),
            "provider" => Ok(UserType::Provider),
            _ => Err(format!("Unknown user type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            user_type: user.user_type,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            profile_image_url: user.profile_image_url,
            created_at: user.created_at,
        }
    }
}

/// A user ready to store. `password` must already be hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl NewUser {
    pub fn into_user(self, id: Id, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            user_type: self.user_type,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            profile_image_url: None,
            created_at,
        }
    }
}

/// Validated registration form; the password is still plain text here
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            password: password_hash,
            email: self.email,
            user_type: self.user_type,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
