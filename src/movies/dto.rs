use serde::Deserialize;

/// Input for creating a record. `review` may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    pub year: i64,
    #[serde(default)]
    pub review: String,
}

/// Replacement values for an update. The record id and its owner are
/// immutable and are not part of the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieUpdate {
    pub title: String,
    pub genre: String,
    pub year: i64,
    #[serde(default)]
    pub review: String,
}
