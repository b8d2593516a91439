//! Conversion between wire JSON and [`MovieRecord`].
//!
//! The same representation is used for the catalog response and for the
//! favorites kept in the key-value store, so a stored favorite is readable
//! by [`decode`] exactly like a catalog entry.

use serde_json::json;

use crate::error::DecodeError;
use crate::models::{MovieRecord, PopularPage};

/// Decode a popular-movies response body into its records.
pub fn decode_page(bytes: &[u8]) -> Result<Vec<MovieRecord>, DecodeError> {
    let page: PopularPage = serde_json::from_slice(bytes)?;
    Ok(page.results)
}

/// Decode a single encoded record.
pub fn decode(bytes: &[u8]) -> Result<MovieRecord, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encode a record using the wire keys.
pub fn encode(record: &MovieRecord) -> String {
    json!(record).to_string()
}
