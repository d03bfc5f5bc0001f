//! PostgreSQL-backed [`UserStore`].

use roster_core::store::{StoreError, UserStore};
use roster_core::user::NewUser;

use crate::repositories::user_repo::EMAIL_UNIQUE_CONSTRAINT;
use crate::repositories::UserRepo;
use crate::DbPool;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Inserts imported users through [`UserRepo`].
///
/// Email uniqueness is enforced by the `uq_users_email` constraint, so two
/// concurrent imports cannot both store the same address.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn insert(&self, user: &NewUser) -> Result<(), StoreError> {
        let created = UserRepo::create(&self.pool, user)
            .await
            .map_err(classify_insert_error)?;
        tracing::debug!(id = created.id, user = %created, "User imported");
        Ok(())
    }
}

/// Map an insert failure onto the store error the import loop understands.
pub fn classify_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
        {
            return StoreError::Duplicate { field: "email" };
        }
    }
    StoreError::Other(err.to_string())
}
