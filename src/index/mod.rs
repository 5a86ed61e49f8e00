//! Replay index module
//!
//! The index is the persisted, deduplicated collection of replay records.
//! It lives on disk as a record-collection document: a JSON array of flat
//! string-to-string objects, one per replay, field order preserved.

mod record;
mod store;

pub use record::{Record, FIELD_ID};
pub use store::{AddOutcome, ReplayIndex};

use thiserror::Error;

/// Errors that can occur reading or writing the index document
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed index document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Index has no attached path; use save_to with an explicit destination")]
    NoPath,
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
