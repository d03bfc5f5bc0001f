//! Persistence seam for the import loop.

use std::sync::Mutex;

use crate::user::NewUser;

/// Why an insert was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint on `field` rejected the record.
    #[error("Duplicate value for {field}")]
    Duplicate { field: &'static str },

    /// Anything else the store reported, already rendered for the caller.
    #[error("{0}")]
    Other(String),
}

/// Insert-only access to persisted users.
///
/// Implementations must enforce email uniqueness atomically per insert; the
/// import loop relies on that rather than checking beforehand.
pub trait UserStore: Send + Sync {
    /// Persist `user`, assigning its id and creation timestamp.
    fn insert(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Process-local store with the same email uniqueness rule as the database.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<NewUser>>,
}

impl MemoryUserStore {
    /// Records accepted so far, in insertion order.
    pub fn users(&self) -> Vec<NewUser> {
        self.users
            .lock()
            .map(|users| users.clone())
            .unwrap_or_default()
    }
}

impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &NewUser) -> Result<(), StoreError> {
        let mut users = self
            .users
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }
        users.push(user.clone());
        Ok(())
    }
}
