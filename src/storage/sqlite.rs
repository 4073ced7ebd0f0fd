//! SQLite-backed keyed document store
//!
//! This module provides the title -> JSON document store used by the crawler
//! and consulted shard-by-shard by the reconciliation tool.

use crate::storage::document::PageDocument;
use crate::storage::{StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Keyed store over a single SQLite database file
///
/// The schema is a single table mapping the title to the UTF-8 JSON body of
/// its [`PageDocument`]. Writes overwrite any existing document for the same
/// title.
pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Opens (or creates) a store at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(DocumentStore)` - Successfully opened/created store
    /// * `Err(StorageError)` - Failed to open the database
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                title TEXT PRIMARY KEY,
                body  TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                title TEXT PRIMARY KEY,
                body  TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Persists a document keyed by its title, overwriting any previous value
    pub fn put(&mut self, document: &PageDocument) -> StorageResult<()> {
        let body = serde_json::to_string(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO documents (title, body) VALUES (?1, ?2)",
            params![document.title, body],
        )?;
        Ok(())
    }

    /// Looks up the raw JSON body stored for a title
    ///
    /// Returns `Ok(None)` when the title is not present; this is the expected
    /// shard-miss case in the reconciliation tool.
    pub fn get_raw(&self, title: &str) -> StorageResult<Option<String>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE title = ?1",
                params![title],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    /// Looks up and deserializes the document stored for a title
    pub fn get(&self, title: &str) -> StorageResult<Option<PageDocument>> {
        match self.get_raw(title)? {
            Some(body) => {
                let doc = serde_json::from_str(&body)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Counts stored documents
    pub fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Closes the store, surfacing any flush failure
    ///
    /// Dropping the store also closes it, but the crawler closes explicitly
    /// so a failure is reported rather than swallowed.
    pub fn close(self) -> StorageResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| StorageError::Sqlite(e))?;
        Ok(())
    }
}
