use anyhow::{Context, Result};
use sqlx::MySqlPool;

/// Opens the pool owned by `main` for the lifetime of the server.
pub async fn init_db(database_url: &str) -> Result<MySqlPool> {
    MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")
}
