//! In-process user store with the same semantics as the database store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::UserRepository;
use common::{AppError, AppResult};
use domain::{ObjectId, OfferId, UpdateUser, User};

/// HashMap-backed UserRepository. Emails are unique, favorites are a set.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// True when no user has been stored
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::conflict("Email"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;

        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn update(&self, id: ObjectId, update: UpdateUser) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(&id).map(|user| {
            user.apply_update(update);
            user.clone()
        }))
    }

    async fn add_favorite(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            if !user.has_favorite(&offer_id) {
                user.favorites.push(offer_id);
            }
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn remove_favorite(&self, id: ObjectId, offer_id: OfferId) -> AppResult<()> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.favorites.retain(|favorite| *favorite != offer_id);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn favorites(&self, id: ObjectId) -> AppResult<Option<Vec<OfferId>>> {
        let users = self.users.read().await;

        Ok(users.get(&id).map(|user| user.favorites.clone()))
    }
}
