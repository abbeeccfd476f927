use sea_orm::{
    ConnectOptions, Database, DatabaseConnection,
    sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous},
};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

/// Pragmas are applied by sqlx on every pooled connection as it opens.
pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options.max_connections(max_connections.max(1)).map_sqlx_sqlite_opts(|opts| {
        opts.journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("cache_size", "-64000")
    });

    Ok(Database::connect(options).await?)
}

pub async fn migrate(db: &DatabaseConnection) -> AppResult<()> {
    migration::Migrator::up(db, None).await?;
    tracing::debug!("schema up to date");
    Ok(())
}

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> AppResult<DatabaseConnection> {
    let db = connect(database_url, max_connections).await?;
    migrate(&db).await?;
    Ok(db)
}

/// Fresh in-memory database with the full schema. A single pooled connection
/// keeps every query on the same in-memory file.
#[cfg(test)]
pub async fn memory() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:", 1).await.expect("in-memory database")
}
