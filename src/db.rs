use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub type Database = Sqlite;

#[tracing::instrument]
pub async fn connect(db_uri: &str, max_connections: u32) -> Result<Pool<Database>, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(db_uri)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Single-connection in-memory database. Every connection to `:memory:` gets
/// its own database, so the pool must never open a second one or recycle the
/// first.
pub async fn connect_in_memory() -> Result<Pool<Database>, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}
