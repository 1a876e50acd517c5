use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64, // unique user ID
    pub username: String, // lower-cased, unique
    pub email: String, // lower-cased, unique
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String, // SHA-256 hex digest, not exposed in JSON
    pub full_name: String,
    pub created_at: OffsetDateTime, // creation timestamp, immutable
}
