use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Connection, SqliteConnection, SqlitePool,
};

use crate::{config::ImportConfig, error::ImportError};

fn connect_options(config: &ImportConfig) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true)
        .foreign_keys(config.enforce_foreign_keys)
}

/// Open the single writer connection used by one pipeline stage.
pub async fn connect(config: &ImportConfig) -> Result<SqliteConnection, ImportError> {
    SqliteConnection::connect_with(&connect_options(config))
        .await
        .map_err(|e| {
            ImportError::storage(
                format!("open {}", config.database_path.display()),
                e,
            )
        })
}

/// Pool for readers of the imported data.
pub async fn connect_pool(config: &ImportConfig) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options(config))
        .await?;
    Ok(pool)
}
