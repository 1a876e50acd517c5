//! Current-user tracking for an app run.
//!
//! The embedding application owns a `Session` value and passes the id it
//! yields into every record-store call. The stores never read session
//! state themselves, and nothing here is global or persistent.

use crate::error::{Result, StoreError};

/// The authenticated user for the duration of an app run, or none.
#[derive(Debug, Default, Clone)]
pub struct Session {
    user_id: Option<i64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_in(&mut self, user_id: i64) {
        self.user_id = Some(user_id);
    }

    pub fn log_out(&mut self) {
        self.user_id = None;
    }

    pub fn current_user(&self) -> Option<i64> {
        self.user_id
    }

    /// The id to scope store calls with. `NotAuthenticated` lets the
    /// caller short-circuit before touching storage.
    pub fn require_user(&self) -> Result<i64> {
        self.user_id.ok_or(StoreError::NotAuthenticated)
    }
}
