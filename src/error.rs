use std::path::PathBuf;

use thiserror::Error;

/// Error type for catalog API operations.
///
/// - `MissingToken`: the bearer token variable is unset or empty
/// - `InvalidHeader`: the token can not be sent as a header value
/// - `RequestFailed`: malformed URL or network/transport errors (wraps `reqwest::Error`)
/// - `Authentication`: HTTP 401
/// - `NotFound`: HTTP 404
/// - `Api`: any other non-2xx status code
/// - `Decode`: the response body is not a list of movies
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Bearer token not found in environment variable {var}")]
    MissingToken { var: String },

    #[error("Invalid token header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A payload that is not well-formed JSON or lacks a required movie field.
#[derive(Debug, Error)]
#[error("Deserialization error: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Error type for key-value store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode store contents: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
