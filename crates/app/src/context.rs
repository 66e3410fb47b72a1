//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::Db,
    domain::{
        keywords::{KeywordsService, PgKeywordsService},
        listings::{DeletePolicy, ListingsService, PgListingsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),
}

/// Connection settings for [`AppContext::connect`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub delete_policy: DeletePolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub db: Db,
    pub listings: Arc<dyn ListingsService>,
    pub keywords: Arc<dyn KeywordsService>,
}

impl AppContext {
    /// Connect to the database and build the services over it.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn connect(settings: &AppSettings) -> Result<Self, AppInitError> {
        let db = Db::connect(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            db.migrate().await.map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(db, settings.delete_policy))
    }

    #[must_use]
    pub fn from_db(db: Db, delete_policy: DeletePolicy) -> Self {
        Self {
            listings: Arc::new(PgListingsService::new(db.clone()).with_delete_policy(delete_policy)),
            keywords: Arc::new(PgKeywordsService::new(db.clone())),
            db,
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").field("db", &self.db).finish_non_exhaustive()
    }
}
