//! User domain entity and related types.

use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{is_valid_user_type, USER_TYPE_PRO, USER_TYPE_REGULAR};
use crate::error::DomainError;
use crate::password::Password;

/// Identifier of an offer referenced from a user's favorites.
pub type OfferId = ObjectId;

/// User account types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Regular,
    Pro,
}

impl UserType {
    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Regular => USER_TYPE_REGULAR,
            UserType::Pro => USER_TYPE_PRO,
        }
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_user_type(s) {
            return Err(DomainError::validation(format!("Unknown user type: {}", s)));
        }

        Ok(if s == USER_TYPE_PRO {
            UserType::Pro
        } else {
            UserType::Regular
        })
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ObjectId,
    pub email: String,
    pub name: String,
    pub avatar_path: Option<String>,
    pub user_type: UserType,
    /// Salted password hash (PHC string)
    pub password_hash: String,
    /// Salt the hash was computed with
    pub salt: String,
    /// Favorite offers; duplicates are prevented by the store's set-add
    pub favorites: Vec<OfferId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh record from creation data and an already salted password.
    pub fn new(data: CreateUser, password: Password, salt: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            email: data.email,
            name: data.name,
            avatar_path: data.avatar_path,
            user_type: data.user_type,
            password_hash: password.into_string(),
            salt: salt.into(),
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored password as a value object.
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }

    /// Check a plain text password against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        self.password().verify(plain_text)
    }

    /// Check whether an offer is in the favorites
    pub fn has_favorite(&self, offer_id: &OfferId) -> bool {
        self.favorites.contains(offer_id)
    }

    /// Merge the present fields of an update into this record.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(avatar_path) = update.avatar_path {
            self.avatar_path = Some(avatar_path);
        }
        if let Some(user_type) = update.user_type {
            self.user_type = user_type;
        }
        self.updated_at = Utc::now();
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// User email address
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    /// User display name (1 to 15 characters)
    #[validate(length(min = 1, max = 15, message = "Name must be 1 to 15 characters"))]
    pub name: String,
    /// Plain text password (6 to 12 characters)
    #[validate(length(min = 6, max = 12, message = "Password must be 6 to 12 characters"))]
    pub password: String,
    /// Path to the avatar image
    #[validate(length(min = 1, message = "Avatar path cannot be empty"))]
    pub avatar_path: Option<String>,
    #[serde(default, rename = "type")]
    pub user_type: UserType,
}

/// Partial user update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New display name
    #[validate(length(min = 1, max = 15, message = "Name must be 1 to 15 characters"))]
    pub name: Option<String>,
    /// New avatar path
    #[validate(length(min = 1, message = "Avatar path cannot be empty"))]
    pub avatar_path: Option<String>,
    /// New account type
    #[serde(rename = "type")]
    pub user_type: Option<UserType>,
}

impl UpdateUser {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_path.is_none() && self.user_type.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Hex object id
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// Favorite offer ids (hex)
    pub favorites: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email.clone(),
            name: user.name.clone(),
            avatar_path: user.avatar_path.clone(),
            user_type: user.user_type,
            favorites: user.favorites.iter().map(|id| id.to_hex()).collect(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse::from(&user)
    }
}
