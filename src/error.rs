use thiserror::Error;

/// Failure taxonomy for every store operation.
///
/// None of these are fatal: callers branch on the variant and decide how
/// to present it. A mutating call on a row that does not exist (or is
/// not owned by the caller) is reported as `Ok(false)`, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("username already taken")]
    DuplicateUsername,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("no authenticated user")]
    NotAuthenticated,

    #[error("refusing schema downgrade from revision {from} to {to}")]
    SchemaDowngrade { from: i64, to: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias used across the store modules.
pub type Result<T> = std::result::Result<T, StoreError>;
