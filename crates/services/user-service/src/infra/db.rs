//! Document database connection and initialization.

use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Collection, Database as MongoDatabase, IndexModel,
};

use common::{AppResult, DatabaseConfig};
use domain::USERS_COLLECTION;

use crate::repository::entities::UserDocument;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    database: MongoDatabase,
}

impl Database {
    /// Connect and make sure the user indexes exist.
    pub async fn connect(config: &DatabaseConfig, app_name: &str) -> AppResult<Self> {
        let db = Self::open(config, app_name).await?;

        db.ensure_indexes().await?;
        tracing::info!("Database connected and indexes ensured");

        Ok(db)
    }

    async fn open(config: &DatabaseConfig, app_name: &str) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some(app_name.to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);

        Ok(Self { database })
    }

    /// Typed handle on the users collection.
    pub fn users(&self) -> Collection<UserDocument> {
        self.database.collection(USERS_COLLECTION)
    }

    /// Create the unique email index.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users().create_index(email_index, None).await?;
        Ok(())
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
