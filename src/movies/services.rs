use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::movies::dto::{MovieUpdate, NewMovie};
use crate::movies::repo_types::Movie;

fn validate_fields(title: &str, genre: &str, year: i64) -> Result<()> {
    if title.is_empty() {
        return Err(StoreError::validation("title", "is required"));
    }
    if genre.is_empty() {
        return Err(StoreError::validation("genre", "is required"));
    }
    if !(1888..=2100).contains(&year) {
        return Err(StoreError::validation(
            "year",
            "must be between 1888 and 2100",
        ));
    }
    Ok(())
}

/// Build a LIKE pattern that matches `keyword` as a literal substring:
/// `%` and `_` in the keyword lose their wildcard meaning. The empty
/// keyword matches every title.
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Create a record owned by `owner_user_id`.
#[instrument(skip(db, movie))]
pub async fn create(db: &SqlitePool, owner_user_id: i64, movie: NewMovie) -> Result<Movie> {
    let title = movie.title.trim();
    let genre = movie.genre.trim();
    let review = movie.review.trim();
    validate_fields(title, genre, movie.year)?;

    let movie = Movie::insert(db, owner_user_id, title, genre, movie.year, review).await?;
    info!(movie_id = movie.movie_id, user_id = owner_user_id, "movie created");
    Ok(movie)
}

/// Every record owned by `owner_user_id`, in insertion order, fully
/// materialized.
pub async fn list_by_owner(db: &SqlitePool, owner_user_id: i64) -> Result<Vec<Movie>> {
    Movie::list_by_user(db, owner_user_id).await
}

/// Owner-scoped, case-insensitive substring search on the title only.
#[instrument(skip(db))]
pub async fn search(db: &SqlitePool, owner_user_id: i64, keyword: &str) -> Result<Vec<Movie>> {
    Movie::search_by_title(db, owner_user_id, &like_pattern(keyword)).await
}

/// Replace the mutable fields of a record. The caller must own it:
/// a nonexistent id and someone else's record are the same `Ok(false)`.
#[instrument(skip(db, update))]
pub async fn update(
    db: &SqlitePool,
    owner_user_id: i64,
    movie_id: i64,
    update: MovieUpdate,
) -> Result<bool> {
    let title = update.title.trim();
    let genre = update.genre.trim();
    let review = update.review.trim();
    validate_fields(title, genre, update.year)?;

    let updated =
        Movie::update_owned(db, owner_user_id, movie_id, title, genre, update.year, review).await?;
    if updated {
        info!(movie_id, user_id = owner_user_id, "movie updated");
    } else {
        warn!(movie_id, user_id = owner_user_id, "update matched no owned record");
    }
    Ok(updated)
}

/// Delete a record the caller owns. Same ownership rule as `update`.
#[instrument(skip(db))]
pub async fn delete(db: &SqlitePool, owner_user_id: i64, movie_id: i64) -> Result<bool> {
    let deleted = Movie::delete_owned(db, owner_user_id, movie_id).await?;
    if deleted {
        info!(movie_id, user_id = owner_user_id, "movie deleted");
    } else {
        warn!(movie_id, user_id = owner_user_id, "delete matched no owned record");
    }
    Ok(deleted)
}
