use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

/// A private in-memory SQLite database.
///
/// Each SQLite `:memory:` connection is its own database, so the pool is
/// pinned to exactly one connection. `LIKE` is switched to case-sensitive
/// matching so substring search behaves as it does on PostgreSQL.
pub async fn memory_database() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("failed to open in-memory sqlite");
    db.execute_unprepared("PRAGMA case_sensitive_like = ON")
        .await
        .expect("failed to enable case-sensitive LIKE");
    db
}
