//! User directory - user-related use cases over the user store.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use common::{AppError, AppResult};
use domain::{CreateUser, ObjectId, OfferId, Password, UpdateUser, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Absent users are reported as `None` (or an empty favorites list), never
/// as errors. Store failures propagate unchanged.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user, salting the password with `salt`
    async fn create(&self, data: CreateUser, salt: &str) -> AppResult<User>;

    /// Find user by exact email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Return the user with this email, creating it when missing
    async fn find_or_create(&self, data: CreateUser, salt: &str) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>>;

    /// Merge the provided fields; returns the updated record
    async fn update_by_id(&self, id: ObjectId, data: UpdateUser) -> AppResult<Option<User>>;

    /// Add an offer to the user's favorites (no-op when already present)
    async fn add_to_favorites(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()>;

    /// Remove an offer from the user's favorites (no-op when absent)
    async fn remove_from_favorites(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()>;

    /// Favorite offer ids; empty for unknown users
    async fn get_favorites(&self, id: ObjectId) -> AppResult<Vec<OfferId>>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserDirectory {
    repo: Arc<dyn UserRepository>,
}

impl UserDirectory {
    /// Create new directory instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserDirectory {
    async fn create(&self, data: CreateUser, salt: &str) -> AppResult<User> {
        data.validate()?;

        let password = Password::hash_with_salt(&data.password, salt)?;
        let user = self.repo.create(User::new(data, password, salt)).await?;
        info!("New user created: {}", user.email);

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn find_or_create(&self, data: CreateUser, salt: &str) -> AppResult<User> {
        if let Some(existing) = self.repo.find_by_email(&data.email).await? {
            return Ok(existing);
        }

        let email = data.email.clone();
        match self.create(data, salt).await {
            // A concurrent call created the same email between lookup and insert
            Err(AppError::Conflict(_)) => {
                debug!("Lost create race for {}, reading existing user", email);
                self.repo
                    .find_by_email(&email)
                    .await?
                    .ok_or_else(|| AppError::conflict("Email"))
            }
            result => result,
        }
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn update_by_id(&self, id: ObjectId, data: UpdateUser) -> AppResult<Option<User>> {
        data.validate()?;

        self.repo.update(id, data).await
    }

    async fn add_to_favorites(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()> {
        self.repo.add_favorite(id, offer_id).await
    }

    async fn remove_from_favorites(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()> {
        self.repo.remove_favorite(id, offer_id).await
    }

    async fn get_favorites(&self, id: ObjectId) -> AppResult<Vec<OfferId>> {
        Ok(self.repo.favorites(id).await?.unwrap_or_default())
    }
}
