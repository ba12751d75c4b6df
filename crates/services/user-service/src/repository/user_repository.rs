//! User repository backed by the document database.

use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, FindOneOptions, ReturnDocument},
    Collection,
};
use tracing::debug;

use super::entities::{FavoritesDocument, UserDocument};
use common::{AppError, AppResult};
use domain::{ObjectId, OfferId, UpdateUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// User store capability for dependency injection.
///
/// Lookups return `None` for absent records; favorites mutations on an
/// absent user are silent no-ops.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a fully built record
    async fn create(&self, user: User) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Merge present fields and return the updated record
    async fn update(&self, id: ObjectId, update: UpdateUser) -> AppResult<Option<User>>;

    /// Add an offer to the favorites set
    async fn add_favorite(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()>;

    /// Remove an offer from the favorites set
    async fn remove_favorite(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()>;

    /// Favorites of a user, `None` when the user does not exist
    async fn favorites(&self, id: ObjectId) -> AppResult<Option<Vec<OfferId>>>;
}

/// MongoDB implementation of UserRepository
pub struct UserStore {
    users: Collection<UserDocument>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(users: Collection<UserDocument>) -> Self {
        Self { users }
    }

    fn now() -> BsonDateTime {
        BsonDateTime::from_chrono(Utc::now())
    }

    fn set_fields(update: UpdateUser) -> Document {
        let mut set = doc! { "updatedAt": Self::now() };

        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(avatar_path) = update.avatar_path {
            set.insert("avatarPath", avatar_path);
        }
        if let Some(user_type) = update.user_type {
            set.insert("type", user_type.as_str());
        }

        set
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: User) -> AppResult<User> {
        let document = UserDocument::from(&user);

        match self.users.insert_one(&document, None).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(AppError::conflict("Email")),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        let result = self.users.find_one(doc! { "_id": id }, None).await?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = self
            .users
            .find_one(doc! { "email": email }, None)
            .await?;

        Ok(result.map(User::from))
    }

    async fn update(&self, id: ObjectId, update: UpdateUser) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let result = self
            .users
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": Self::set_fields(update) },
                options,
            )
            .await?;

        Ok(result.map(User::from))
    }

    async fn add_favorite(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()> {
        let result = self
            .users
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$addToSet": { "favorites": offer_id },
                    "$set": { "updatedAt": Self::now() },
                },
                None,
            )
            .await?;

        debug!(
            "addToSet favorite {} for user {}: matched {}",
            offer_id, id, result.matched_count
        );
        Ok(())
    }

    async fn remove_favorite(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()> {
        let result = self
            .users
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$pull": { "favorites": offer_id },
                    "$set": { "updatedAt": Self::now() },
                },
                None,
            )
            .await?;

        debug!(
            "pull favorite {} for user {}: matched {}",
            offer_id, id, result.matched_count
        );
        Ok(())
    }

    async fn favorites(&self, id: ObjectId) -> AppResult<Option<Vec<OfferId>>> {
        let options = FindOneOptions::builder()
            .projection(doc! { "favorites": 1 })
            .build();

        let result = self
            .users
            .clone_with_type::<FavoritesDocument>()
            .find_one(doc! { "_id": id }, options)
            .await?;

        Ok(result.map(|projected| projected.favorites))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::UserType;

    #[test]
    fn test_set_fields_only_includes_present_fields() {
        let set = UserStore::set_fields(UpdateUser {
            name: Some("Keks".to_string()),
            user_type: Some(UserType::Pro),
            ..Default::default()
        });

        assert_eq!(set.get_str("name").unwrap(), "Keks");
        assert_eq!(set.get_str("type").unwrap(), "pro");
        assert!(set.get("avatarPath").is_none());
        assert!(set.get_datetime("updatedAt").is_ok());
    }

    #[test]
    fn test_empty_update_still_touches_timestamp() {
        let set = UserStore::set_fields(UpdateUser::default());

        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updatedAt"));
    }
}
