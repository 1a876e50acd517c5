use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::{AppConfig, SchemaUpgrade};
use crate::schema;

/// Shared handle the embedding application threads through its calls.
///
/// Connections are pooled: every store operation borrows one for the
/// duration of a statement and returns it on every exit path, error
/// included. Nothing holds a connection across calls.
#[derive(Clone)]
pub struct Store {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl Store {
    /// Connect per the environment configuration and bring the schema up
    /// to the target revision.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        // SQLite ships with foreign keys off; cascade delete depends on
        // them being enabled on every connection.
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("connect to database")?;

        schema::migrate(&db, config.upgrade).await?;
        Ok(Self { db, config })
    }

    /// In-memory database, migrated to the target revision. Used by tests.
    ///
    /// A `:memory:` database exists per connection, so the pool is capped
    /// at a single connection.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("parse in-memory URL")?
            .foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("connect to in-memory database")?;

        schema::migrate(&db, SchemaUpgrade::Additive).await?;
        Ok(Self {
            db,
            config: Arc::new(AppConfig {
                database_url: "sqlite::memory:".into(),
                upgrade: SchemaUpgrade::Additive,
            }),
        })
    }
}
