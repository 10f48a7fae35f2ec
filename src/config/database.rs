use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::config::AppSettings;
use crate::errors::InternalError;
use crate::errors::internal::DatabaseError;

/// Connect to the database using the configured URL and pool size
///
/// Does NOT run migrations - call `migrate_database()` separately.
pub async fn connect_database(settings: &AppSettings) -> Result<DatabaseConnection, InternalError> {
    let mut options = ConnectOptions::new(settings.database_url().to_owned());
    options
        .max_connections(settings.pool_size())
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(|source| InternalError::Database(DatabaseError::Connect { source }))?;

    tracing::debug!(pool_size = settings.pool_size(), "Connected to database");

    Ok(db)
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|source| InternalError::Database(DatabaseError::Migrate { source }))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}

pub async fn begin_transaction(db: &DatabaseConnection) -> Result<DatabaseTransaction, InternalError> {
    db.begin().await.map_err(InternalError::transaction_begin)
}

pub async fn commit_transaction(txn: DatabaseTransaction) -> Result<(), InternalError> {
    txn.commit().await.map_err(InternalError::transaction_commit)
}
