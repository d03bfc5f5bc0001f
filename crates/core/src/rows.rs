//! CSV decoding: upload bytes into ordered rows of raw string fields.
//!
//! The first line is the header; each following record is zipped against it
//! into a [`RawRow`]. Ragged records are accepted: missing trailing cells
//! simply leave the key absent and surplus cells are dropped, so shape
//! problems surface as per-row validation errors rather than failing the
//! whole upload.

use std::collections::HashMap;

use crate::error::ImportError;

/// One data record keyed by header name.
pub type RawRow = HashMap<String, String>;

const UTF8_BOM: &str = "\u{feff}";

/// Decode `bytes` as UTF-8 CSV with a header row.
///
/// Row order is preserved. Undecodable text or a structural CSV error is a
/// boundary failure for the whole upload.
pub fn decode_rows(bytes: &[u8]) -> Result<Vec<RawRow>, ImportError> {
    let text = std::str::from_utf8(bytes)?;
    // Spreadsheet exports often prepend a BOM, which would otherwise end up
    // glued to the first header name.
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
