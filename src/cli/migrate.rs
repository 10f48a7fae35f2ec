use crate::config::{AppSettings, connect_database, migrate_database};

/// Run database migrations
///
/// Connects with the configured settings only; providers and secrets are not
/// needed to migrate.
pub async fn run_migrations(settings: &AppSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");
    Ok(())
}
