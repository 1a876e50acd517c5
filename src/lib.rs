//! Embeddable storage core for a personal movie-review application.
//!
//! Two stores over one SQLite database: `auth` owns accounts (one-way
//! password hashing, uniqueness, credential resolution) and `movies`
//! owns per-user records (create, list, search, update, delete — every
//! call scoped by an explicit owner id). `session` carries the current
//! user between the two; `schema` versions the database. There is no
//! network surface: the embedding UI calls the services directly.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod movies;
pub mod schema;
pub mod session;

pub use config::{AppConfig, SchemaUpgrade};
pub use db::Store;
pub use error::{Result, StoreError};
pub use session::Session;
