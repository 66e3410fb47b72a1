//! Apply embedded schema migrations

use clap::Args;
use navi_app::database::Db;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let db = Db::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    db.migrate()
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    db.close().await;

    println!("migrations applied");

    Ok(())
}
