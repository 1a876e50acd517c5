use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Movie record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    pub genre: String,
    pub year: i64,
    pub review: Option<String>,
    pub user_id: i64, // owning user
}
