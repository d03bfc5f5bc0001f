//! User entity model.

use roster_core::user::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Inserts go through [`roster_core::user::NewUser`]; there is no update DTO
/// because imported users are never modified.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}
