pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/upload-csv                                 CSV bulk import (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/users", users::router())
}
