/// Failures in the upload itself.
///
/// Any of these aborts the whole import; nothing is persisted once one is
/// returned. Row-level problems never surface here, they are recorded in
/// the [`ImportSummary`](crate::import::ImportSummary) instead.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("File must be a CSV")]
    NotCsv { filename: String },

    #[error("Error processing CSV file: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Error processing CSV file: {0}")]
    Parse(#[from] csv::Error),
}
