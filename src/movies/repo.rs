use sqlx::SqlitePool;

use crate::error::Result;
use crate::movies::repo_types::Movie;

impl Movie {
    /// Insert a record for `user_id`. Strings must already be trimmed.
    pub async fn insert(
        db: &SqlitePool,
        user_id: i64,
        title: &str,
        genre: &str,
        year: i64,
        review: &str,
    ) -> Result<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title, genre, year, review, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING movie_id, title, genre, year, review, user_id
            "#,
        )
        .bind(title)
        .bind(genre)
        .bind(year)
        .bind(review)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(movie)
    }

    /// All records owned by `user_id`, primary-key ascending.
    pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> Result<Vec<Movie>> {
        let rows = sqlx::query_as::<_, Movie>(
            r#"
            SELECT movie_id, title, genre, year, review, user_id
            FROM movies
            WHERE user_id = ?
            ORDER BY movie_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Owner-scoped title match. `pattern` is a ready LIKE pattern with
    /// `\` as the escape character.
    pub async fn search_by_title(
        db: &SqlitePool,
        user_id: i64,
        pattern: &str,
    ) -> Result<Vec<Movie>> {
        let rows = sqlx::query_as::<_, Movie>(
            r#"
            SELECT movie_id, title, genre, year, review, user_id
            FROM movies
            WHERE user_id = ? AND title LIKE ? ESCAPE '\'
            ORDER BY movie_id ASC
            "#,
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Replace the mutable fields of a record the caller owns. `false`
    /// when no row matches the id/owner pair.
    pub async fn update_owned(
        db: &SqlitePool,
        user_id: i64,
        movie_id: i64,
        title: &str,
        genre: &str,
        year: i64,
        review: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = ?, genre = ?, year = ?, review = ?
            WHERE movie_id = ? AND user_id = ?
            "#,
        )
        .bind(title)
        .bind(genre)
        .bind(year)
        .bind(review)
        .bind(movie_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a record the caller owns. `false` when no row matches.
    pub async fn delete_owned(db: &SqlitePool, user_id: i64, movie_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE movie_id = ? AND user_id = ?")
            .bind(movie_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
