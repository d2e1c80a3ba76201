//! Failure kinds
//!
//! Record-level rejections drop one record and let the batch continue.
//! Ingest errors abort the batch that raised them.

use thiserror::Error;

/// Why a single candidate record was left out of the output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetRejection {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid expected output: {0:?}")]
    InvalidExpectedOutput(String),

    #[error("record does not match the test asset schema: {0}")]
    SchemaMismatch(String),
}

/// Batch-level failure of a source adapter.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid URL '{0}': scheme and host are required")]
    InvalidUrl(String),

    #[error("unknown test asset file format: {0}")]
    UnknownFormat(String),

    #[error("expected a .zip archive URL, got '{0}'")]
    NotAnArchive(String),

    #[error("request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },
}
