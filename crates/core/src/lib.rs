//! Roster core: pure logic for the CSV user import.
//!
//! Nothing in this crate talks to a database or an HTTP stack. Persistence
//! is reached through the [`store::UserStore`] trait so the import loop can
//! be exercised against an in-memory store.

pub mod error;
pub mod import;
pub mod rows;
pub mod store;
pub mod user;
pub mod validation;
