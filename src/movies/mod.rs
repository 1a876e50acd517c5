mod dto;
mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{MovieUpdate, NewMovie};
pub use repo_types::Movie;
