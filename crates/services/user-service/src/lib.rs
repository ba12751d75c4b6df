//! User Service Library
//!
//! User directory over a document database: account creation with salted
//! passwords, lookups by id or email, profile updates and per-user favorite
//! offers. Used by the `user-service` admin binary or embedded by other
//! application layers.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::AppResult;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserDirectory;

/// Connect to the database and build a directory on top of it.
pub async fn connect(config: &UserServiceConfig) -> AppResult<(Database, UserDirectory)> {
    let db = Database::connect(&config.database, &config.service.service_name).await?;

    let user_repo = Arc::new(UserStore::new(db.users()));
    let directory = UserDirectory::new(user_repo);

    Ok((db, directory))
}
