//! The user record as it flows from the validator to the store.

use serde::Serialize;

/// Primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Youngest accepted age, inclusive.
pub const MIN_AGE: i32 = 0;

/// Oldest accepted age, inclusive.
pub const MAX_AGE: i32 = 120;

/// A validated, normalized user ready to be inserted.
///
/// Produced by [`validate_row`](crate::validation::validate_row); `id` and
/// `created_at` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl std::fmt::Display for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}
