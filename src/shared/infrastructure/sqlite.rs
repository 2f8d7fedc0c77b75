// SQLite connection pool construction.
//
// Purpose
// - Build the single pool the process shares. Handlers never open connections themselves;
//   stores acquire one pooled connection per operation and return it on drop.
//
// Notes
// - An in-memory database lives only as long as its connection, so in-memory URLs are
//   pinned to one connection that is never reaped.
// - Foreign keys are switched on for every connection.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?
    };

    info!(database_url, "connected to sqlite");
    Ok(pool)
}

pub fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
