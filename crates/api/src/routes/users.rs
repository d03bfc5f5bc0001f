use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/api/v1/users`.
///
/// ```text
/// POST   /upload-csv        import users from a CSV file
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/upload-csv", post(upload::upload_csv))
}
