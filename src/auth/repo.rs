use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::auth::repo_types::User;
use crate::error::{Result, StoreError};

/// Map a UNIQUE-constraint failure to the field-specific duplicate error.
/// Covers the race between the pre-insert existence checks and the insert.
fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        let msg = db_err.message();
        if msg.contains("users.username") {
            return StoreError::DuplicateUsername;
        }
        if msg.contains("users.email") {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(e)
}

impl User {
    /// Insert a new user row. `username` and `email` must already be
    /// trimmed and lower-cased; `digest` is the password hash.
    pub async fn insert(
        db: &SqlitePool,
        username: &str,
        email: &str,
        digest: &str,
        full_name: &str,
        created_at: OffsetDateTime,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password, full_name, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, email, password, full_name, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(digest)
        .bind(full_name)
        .bind(created_at)
        .fetch_one(db)
        .await
        .map_err(map_insert_error)?;
        Ok(user)
    }

    /// Find the user whose username or email matches `login` and whose
    /// stored digest matches `digest`.
    pub async fn find_by_credentials(
        db: &SqlitePool,
        login: &str,
        digest: &str,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, full_name, created_at
            FROM users
            WHERE (username = ? OR email = ?) AND password = ?
            "#,
        )
        .bind(login)
        .bind(login)
        .bind(digest)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Number of rows matching `login` + `digest`. Uniqueness makes more
    /// than one structurally impossible; the caller still counts.
    pub async fn count_by_credentials(db: &SqlitePool, login: &str, digest: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE (username = ? OR email = ?) AND password = ?
            "#,
        )
        .bind(login)
        .bind(login)
        .bind(digest)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn username_taken(db: &SqlitePool, username: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(db)
            .await?;
        Ok(row.is_some())
    }

    pub async fn email_taken(db: &SqlitePool, email: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(row.is_some())
    }

    pub async fn full_name_of(db: &SqlitePool, username: &str) -> Result<Option<String>> {
        let full_name: Option<String> =
            sqlx::query_scalar("SELECT full_name FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(db)
                .await?;
        Ok(full_name)
    }

    /// Remove a user row. The schema cascades the delete to the user's
    /// movie records. `false` when no such user exists.
    pub async fn delete(db: &SqlitePool, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
