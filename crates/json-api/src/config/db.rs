//! Database Config

use clap::Args;
use navi_app::{context::AppSettings, domain::listings::DeletePolicy};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum number of pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10_u32)]
    pub database_max_connections: u32,

    /// Apply pending migrations on startup
    #[arg(
        long,
        env = "DATABASE_RUN_MIGRATIONS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub database_run_migrations: bool,

    /// What deleting a listing does to its row (soft, hard)
    #[arg(long, env = "LISTING_DELETE_POLICY", default_value = "soft")]
    pub listing_delete_policy: DeletePolicy,
}

impl DatabaseConfig {
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            run_migrations: self.database_run_migrations,
            delete_policy: self.listing_delete_policy,
        }
    }
}
