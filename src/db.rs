use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Used when [app_env::DB_URL][crate::app_env::DB_URL] isn't set
pub const DEFAULT_DB_URL: &str = "sqlite://todo.db";
/// A private database that lives only as long as the pool does
pub const IN_MEMORY_DB_URL: &str = "sqlite::memory:";

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// Builds a connection pool for the SQLite database at [db_url], creating the database file
/// if it doesn't exist yet. In-memory databases are pinned to a single connection that never
/// expires, otherwise their contents would vanish along with a recycled connection.
pub async fn connect_sqlx(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);

    let pool_options = if is_in_memory(db_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(20)
    };

    pool_options
        .acquire_timeout(Duration::from_secs(2))
        .connect_with(connect_options)
        .await
}

/// Brings the schema up to date using the SQL files under `migrations/`
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!().run(pool).await
}
