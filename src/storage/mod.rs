//! Storage module: the keyed title -> JSON document store
//!
//! One [`PageDocument`] is persisted per title; the reconciliation tool reads
//! the same stores shard-by-shard through [`DocumentStore::get_raw`].

mod document;
mod sqlite;

pub use document::PageDocument;
pub use sqlite::DocumentStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
