//! User document as persisted in the `users` collection.

use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};

use domain::{OfferId, User, UserType};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
    pub password: String,
    pub salt: String,
    #[serde(default)]
    pub favorites: Vec<OfferId>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Projection of a user document down to its favorites.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FavoritesDocument {
    #[serde(default)]
    pub favorites: Vec<OfferId>,
}

/// Convert stored document to domain entity
impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User {
            id: document.id,
            email: document.email,
            name: document.name,
            avatar_path: document.avatar_path,
            user_type: document.user_type,
            password_hash: document.password,
            salt: document.salt,
            favorites: document.favorites,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        UserDocument {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            avatar_path: user.avatar_path.clone(),
            user_type: user.user_type,
            password: user.password_hash.clone(),
            salt: user.salt.clone(),
            favorites: user.favorites.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
