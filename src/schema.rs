//! Versioned schema migrations.
//!
//! The database carries its revision in SQLite's `user_version` pragma.
//! Steps are additive: each creates only what its revision introduced,
//! and pending steps are applied in order. The drop-and-recreate path is
//! retained as an explicit opt-in (`SchemaUpgrade::Recreate`) and is
//! logged as a data-loss event.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::SchemaUpgrade;
use crate::error::{Result, StoreError};

/// Schema revision this build targets.
pub const TARGET_REVISION: i64 = 3;

struct Migration {
    version: i64,
    ddl: &'static str,
}

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    full_name TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

const CREATE_MOVIES: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    movie_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    genre TEXT NOT NULL,
    year INTEGER NOT NULL,
    review TEXT,
    user_id INTEGER NOT NULL,
    FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
)
"#;

// Revision 2 never shipped; the sequence is sparse.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        ddl: CREATE_USERS,
    },
    Migration {
        version: 3,
        ddl: CREATE_MOVIES,
    },
];

pub async fn current_revision(db: &SqlitePool) -> Result<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(db)
        .await?;
    Ok(version)
}

async fn set_revision(db: &SqlitePool, version: i64) -> Result<()> {
    // PRAGMA does not accept bind parameters.
    sqlx::query(&format!("PRAGMA user_version = {version}"))
        .execute(db)
        .await?;
    Ok(())
}

/// Bring the database to `TARGET_REVISION`. Downgrades are refused.
pub async fn migrate(db: &SqlitePool, mode: SchemaUpgrade) -> Result<()> {
    let current = current_revision(db).await?;
    if current > TARGET_REVISION {
        return Err(StoreError::SchemaDowngrade {
            from: current,
            to: TARGET_REVISION,
        });
    }
    if current == TARGET_REVISION {
        return Ok(());
    }

    match mode {
        SchemaUpgrade::Recreate if current > 0 => recreate(db, current).await,
        _ => apply_pending(db, current).await,
    }
}

async fn apply_pending(db: &SqlitePool, current: i64) -> Result<()> {
    for step in MIGRATIONS.iter().filter(|m| m.version > current) {
        sqlx::query(step.ddl).execute(db).await?;
        set_revision(db, step.version).await?;
        info!(revision = step.version, "applied schema migration");
    }
    Ok(())
}

/// Legacy upgrade path: drop everything and recreate at the target
/// revision. Every row in every table is discarded.
async fn recreate(db: &SqlitePool, current: i64) -> Result<()> {
    warn!(
        from = current,
        to = TARGET_REVISION,
        "destructive schema upgrade: dropping all tables, existing data is discarded"
    );
    sqlx::query("DROP TABLE IF EXISTS movies").execute(db).await?;
    sqlx::query("DROP TABLE IF EXISTS users").execute(db).await?;
    apply_pending(db, 0).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    async fn raw_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("parse in-memory URL")
            .foreign_keys(true);
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("connect in-memory pool")
    }

    async fn table_exists(db: &SqlitePool, name: &str) -> bool {
        let found: Option<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(name)
                .fetch_optional(db)
                .await
                .expect("query sqlite_master");
        found.is_some()
    }

    /// Seed a revision-1 database: users table only, one row.
    async fn seed_revision_1(db: &SqlitePool) {
        sqlx::query(CREATE_USERS).execute(db).await.expect("create users");
        set_revision(db, 1).await.expect("stamp revision 1");
        sqlx::query(
            "INSERT INTO users (username, email, password, full_name, created_at)
             VALUES ('alice', 'a@x.com', 'digest', 'Alice A', '2024-01-01 00:00:00')",
        )
        .execute(db)
        .await
        .expect("seed user");
    }

    #[tokio::test]
    async fn fresh_database_lands_at_target_revision() {
        init_tracing();
        let db = raw_pool().await;
        migrate(&db, SchemaUpgrade::Additive).await.expect("migrate");

        assert_eq!(current_revision(&db).await.expect("revision"), TARGET_REVISION);
        assert!(table_exists(&db, "users").await);
        assert!(table_exists(&db, "movies").await);
    }

    #[tokio::test]
    async fn additive_upgrade_keeps_existing_rows() {
        let db = raw_pool().await;
        seed_revision_1(&db).await;

        migrate(&db, SchemaUpgrade::Additive).await.expect("migrate");

        assert_eq!(current_revision(&db).await.expect("revision"), TARGET_REVISION);
        assert!(table_exists(&db, "movies").await);
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&db)
            .await
            .expect("count users");
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn recreate_upgrade_discards_rows() {
        init_tracing();
        let db = raw_pool().await;
        seed_revision_1(&db).await;

        migrate(&db, SchemaUpgrade::Recreate).await.expect("migrate");

        assert_eq!(current_revision(&db).await.expect("revision"), TARGET_REVISION);
        assert!(table_exists(&db, "movies").await);
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&db)
            .await
            .expect("count users");
        assert_eq!(users, 0, "recreate drops existing rows; this loss is expected");
    }

    #[tokio::test]
    async fn recreate_on_fresh_database_is_a_plain_create() {
        let db = raw_pool().await;
        migrate(&db, SchemaUpgrade::Recreate).await.expect("migrate");
        assert_eq!(current_revision(&db).await.expect("revision"), TARGET_REVISION);
        assert!(table_exists(&db, "users").await);
    }

    #[tokio::test]
    async fn migrate_is_idempotent_at_target() {
        let db = raw_pool().await;
        migrate(&db, SchemaUpgrade::Additive).await.expect("first");
        migrate(&db, SchemaUpgrade::Additive).await.expect("second");
        assert_eq!(current_revision(&db).await.expect("revision"), TARGET_REVISION);
    }

    #[tokio::test]
    async fn downgrade_is_refused() {
        let db = raw_pool().await;
        set_revision(&db, TARGET_REVISION + 1).await.expect("stamp future revision");

        let err = migrate(&db, SchemaUpgrade::Additive).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::SchemaDowngrade { from, to } if from == TARGET_REVISION + 1 && to == TARGET_REVISION
        ));
    }
}
