use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::auth::dto::RegisterRequest;
use crate::auth::password::hash_password;
use crate::auth::repo_types::User;
use crate::error::{Result, StoreError};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{3,20}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Create an account. Username and email are trimmed and lower-cased
/// before the uniqueness checks, so duplicates differing only in case or
/// padding are rejected. Only the password digest is stored.
#[instrument(skip(db, req))]
pub async fn register(db: &SqlitePool, mut req: RegisterRequest) -> Result<User> {
    req.username = req.username.trim().to_lowercase();
    req.email = req.email.trim().to_lowercase();
    let full_name = req.full_name.trim().to_string();

    if !is_valid_username(&req.username) {
        warn!(username = %req.username, "invalid username");
        return Err(StoreError::validation(
            "username",
            "must be 3-20 letters, digits or underscores",
        ));
    }
    if !is_valid_email(&req.email) {
        warn!(email = %req.email, "invalid email");
        return Err(StoreError::validation("email", "not a valid email address"));
    }
    if full_name.len() < 3 {
        return Err(StoreError::validation(
            "full_name",
            "must be at least 3 characters",
        ));
    }
    if req.password.len() < 6 {
        return Err(StoreError::validation(
            "password",
            "must be at least 6 characters",
        ));
    }

    // Field-specific answers up front; the UNIQUE constraints still back
    // them up if another writer gets in between.
    if User::username_taken(db, &req.username).await? {
        warn!(username = %req.username, "username already taken");
        return Err(StoreError::DuplicateUsername);
    }
    if User::email_taken(db, &req.email).await? {
        warn!(email = %req.email, "email already registered");
        return Err(StoreError::DuplicateEmail);
    }

    let digest = hash_password(&req.password);
    let user = User::insert(
        db,
        &req.username,
        &req.email,
        &digest,
        &full_name,
        OffsetDateTime::now_utc(),
    )
    .await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Count-based credential check: valid iff exactly one row matches the
/// login (username or email) and password digest.
#[instrument(skip(db, password))]
pub async fn verify_credentials(db: &SqlitePool, login: &str, password: &str) -> Result<bool> {
    let login = login.trim().to_lowercase();
    let digest = hash_password(password);
    let matches = User::count_by_credentials(db, &login, &digest).await?;
    Ok(matches == 1)
}

/// Resolve the user id for a login/password pair, or `None` when the
/// credentials match no account.
#[instrument(skip(db, password))]
pub async fn resolve_user_id(db: &SqlitePool, login: &str, password: &str) -> Result<Option<i64>> {
    let login = login.trim().to_lowercase();
    let digest = hash_password(password);
    let user = User::find_by_credentials(db, &login, &digest).await?;
    match &user {
        Some(u) => info!(user_id = u.id, "credentials resolved"),
        None => warn!(%login, "credential check failed"),
    }
    Ok(user.map(|u| u.id))
}

/// Case-insensitive, trimmed existence check for pre-registration
/// field-specific messages.
pub async fn username_exists(db: &SqlitePool, username: &str) -> Result<bool> {
    User::username_taken(db, &username.trim().to_lowercase()).await
}

pub async fn email_exists(db: &SqlitePool, email: &str) -> Result<bool> {
    User::email_taken(db, &email.trim().to_lowercase()).await
}

/// Display-name lookup.
pub async fn full_name_of(db: &SqlitePool, username: &str) -> Result<Option<String>> {
    User::full_name_of(db, &username.trim().to_lowercase()).await
}

/// Remove an account and, via the schema's cascade, every movie record
/// it owns.
#[instrument(skip(db))]
pub async fn delete_user(db: &SqlitePool, user_id: i64) -> Result<bool> {
    let deleted = User::delete(db, user_id).await?;
    if deleted {
        info!(user_id, "user deleted");
    } else {
        warn!(user_id, "delete of unknown user");
    }
    Ok(deleted)
}
