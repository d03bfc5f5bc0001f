//! Import processor: the row-by-row validate-then-insert loop.
//!
//! Rows are handled strictly in file order and one at a time, so when the
//! same email appears twice in an upload it is always the later row that
//! the store rejects. A bad row is recorded in the [`ImportSummary`] and the
//! loop moves on; only problems with the upload as a whole produce an
//! [`ImportError`].

use serde::Serialize;

use crate::error::ImportError;
use crate::rows::decode_rows;
use crate::store::{StoreError, UserStore};
use crate::validation::{validate_row, FieldErrors, RowValidation};

/// Required filename suffix (case-sensitive).
pub const CSV_EXTENSION: &str = ".csv";

/// Message attached to `email` when the store reports a duplicate.
pub const MSG_DUPLICATE_EMAIL: &str = "Email address already exists";

/// Error key for store failures that are not tied to a field.
pub const GENERAL_ERROR_KEY: &str = "general";

/// An uploaded file as handed over by the HTTP layer.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub filename: &'a str,
    pub contents: &'a [u8],
}

/// Errors for one rejected row. `row` is 1-based, header excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: usize,
    pub errors: FieldErrors,
}

/// Terminal state of a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted,
    Invalid(FieldErrors),
    Duplicate,
    Failed(String),
}

impl RowOutcome {
    /// Classify a store result for a row that passed validation.
    fn from_insert(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(StoreError::Duplicate { .. }) => Self::Duplicate,
            Err(StoreError::Other(message)) => Self::Failed(message),
        }
    }

    /// The error map reported for this row, `None` if it was accepted.
    fn into_errors(self) -> Option<FieldErrors> {
        match self {
            Self::Accepted => None,
            Self::Invalid(errors) => Some(errors),
            Self::Duplicate => Some(FieldErrors::single("email", MSG_DUPLICATE_EMAIL)),
            Self::Failed(message) => Some(FieldErrors::single(GENERAL_ERROR_KEY, message)),
        }
    }
}

/// Result of one import, serialized verbatim as the HTTP response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub successful_records: usize,
    pub rejected_records: usize,
    /// One entry per rejected row, ascending by `row`.
    pub validation_errors: Vec<RowError>,
}

impl ImportSummary {
    /// Fold one row's outcome into the summary.
    pub fn with_outcome(mut self, row: usize, outcome: RowOutcome) -> Self {
        match outcome.into_errors() {
            None => self.successful_records += 1,
            Some(errors) => {
                self.rejected_records += 1;
                self.validation_errors.push(RowError { row, errors });
            }
        }
        self
    }

    pub fn total_records(&self) -> usize {
        self.successful_records + self.rejected_records
    }
}

/// Reject uploads that are missing or not named `*.csv`.
///
/// Content is not inspected; the filename alone decides.
pub fn check_upload(upload: Option<Upload<'_>>) -> Result<Upload<'_>, ImportError> {
    let upload = upload.ok_or(ImportError::MissingFile)?;
    if !upload.filename.ends_with(CSV_EXTENSION) {
        return Err(ImportError::NotCsv {
            filename: upload.filename.to_string(),
        });
    }
    Ok(upload)
}

/// Import every row of `upload` into `store`.
///
/// Rows persisted before a later failure stay persisted; there is no
/// rollback.
pub async fn import_users<S: UserStore>(
    store: &S,
    upload: Option<Upload<'_>>,
) -> Result<ImportSummary, ImportError> {
    let upload = check_upload(upload)?;
    let rows = decode_rows(upload.contents)?;

    tracing::debug!(filename = upload.filename, rows = rows.len(), "Decoded CSV upload");

    let mut summary = ImportSummary::default();
    for (index, raw) in rows.iter().enumerate() {
        let row = index + 1;
        let outcome = match validate_row(raw) {
            RowValidation::Invalid(errors) => RowOutcome::Invalid(errors),
            RowValidation::Valid(user) => RowOutcome::from_insert(store.insert(&user).await),
        };

        match &outcome {
            RowOutcome::Accepted => {}
            RowOutcome::Invalid(errors) => {
                tracing::debug!(row, ?errors, "Row failed validation");
            }
            RowOutcome::Duplicate => {
                tracing::debug!(row, "Row rejected as duplicate email");
            }
            RowOutcome::Failed(message) => {
                tracing::warn!(row, error = %message, "Row insert failed");
            }
        }

        summary = summary.with_outcome(row, outcome);
    }

    tracing::info!(
        filename = upload.filename,
        successful = summary.successful_records,
        rejected = summary.rejected_records,
        "CSV import finished"
    );

    Ok(summary)
}
