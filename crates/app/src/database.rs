//! Database connection management

use sqlx::{
    PgPool, Postgres, Transaction,
    migrate::{MigrateError, Migrator},
    postgres::PgPoolOptions,
    query,
};
use tracing::info;

pub use sqlx::Error as DbError;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// SQL used to pin a read transaction to a single snapshot.
pub const SET_READ_SNAPSHOT_SQL: &str =
    "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// Explicitly constructed persistence client shared by the services.
///
/// Cloning is cheap; every clone hands out connections from the same pool.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of at most `max_connections` connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the first connection cannot be established.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!(max_connections, "connected to database");

        Ok(Self::new(pool))
    }

    /// Apply any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        MIGRATOR.run(&self.pool).await?;

        info!("database migrations applied");

        Ok(())
    }

    /// Begin a transaction. Dropping it without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a read-only transaction whose statements all see one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting its mode fails.
    pub async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_READ_SNAPSHOT_SQL).execute(&mut *tx).await?;

        Ok(tx)
    }

    /// Wait for checked-out connections to be returned and close the pool.
    pub async fn close(&self) {
        self.pool.close().await;

        info!("database pool closed");
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
