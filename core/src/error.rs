//! Error types for the todo service and its repositories.
//!
//! # Design
//! A position past the end of the list is not an error: the service returns
//! `Ok(None)` for it. `InvalidArgument` is reserved for caller mistakes
//! (absent parameter, empty content, non-positive position). Storage failures
//! pass through unchanged inside `Repository`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `TodoItemService` operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// The caller passed an argument the operation can never accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors raised by `TodoRepository` implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but does not hold a JSON array of items.
    #[error("malformed todo store {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("todo repository lock poisoned")]
    Poisoned,

    /// `save` was handed an item whose storage key the repository never issued.
    #[error("no stored todo item with id {0}")]
    UnknownItem(u64),

    /// Two stored items share one storage key, so an update could not tell
    /// them apart.
    #[error("todo store {} holds id {id} more than once", path.display())]
    DuplicateId { path: PathBuf, id: u64 },

    #[error("no todo ids left to assign")]
    IdsExhausted,
}
