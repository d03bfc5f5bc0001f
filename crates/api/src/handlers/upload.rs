//! Handler for the CSV user import.
//!
//! Pulls the `file` field out of a multipart body and hands it to
//! [`import_users`]. Row-level problems come back inside the 200 summary;
//! only a missing, mis-named or undecodable upload is a 400.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use roster_core::import::{import_users, ImportSummary, Upload};
use roster_db::PgUserStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field that carries the CSV file.
pub const FILE_FIELD: &str = "file";

/// A file part read fully into memory.
#[derive(Debug)]
struct ReceivedFile {
    filename: String,
    contents: Vec<u8>,
}

/// POST /api/v1/users/upload-csv
///
/// Import users from the uploaded CSV and report per-row outcomes.
pub async fn upload_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ImportSummary>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let file = read_file_field(&mut multipart).await?;

    let upload = file.as_ref().map(|f| Upload {
        filename: &f.filename,
        contents: &f.contents,
    });

    let store = PgUserStore::new(state.pool.clone());
    let summary = import_users(&store, upload).await?;

    Ok(Json(summary))
}

/// Find the first `file` part that carries a filename.
///
/// Parts without a filename are plain form values, not uploads, and are
/// skipped along with every other field.
async fn read_file_field(multipart: &mut Multipart) -> AppResult<Option<ReceivedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let contents = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        tracing::debug!(%filename, size = contents.len(), "Received CSV upload");

        return Ok(Some(ReceivedFile {
            filename,
            contents: contents.to_vec(),
        }));
    }

    Ok(None)
}
