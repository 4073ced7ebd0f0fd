//! Wikiharvest: an encyclopedia revision crawler
//!
//! This crate crawls a MediaWiki revision API starting from a generated range
//! of titles, follows internal links one level deep, extracts structured
//! content from each page's wikitext, and persists one JSON document per
//! title into a keyed store.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod reconcile;
pub mod storage;

use thiserror::Error;

/// Main error type for wikiharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {title}: {source}")]
    Http {
        title: String,
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Bad response for {title}: HTTP {status} after {attempts} attempts")]
    RetriesExhausted {
        title: String,
        status: u16,
        attempts: u32,
    },

    #[error("Malformed API response for {title}: {message}")]
    BadApiResponse { title: String, message: String },

    #[error("Extraction error for {title}: {message}")]
    Extract { title: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for wikiharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::ExtractedContent;
pub use storage::{DocumentStore, PageDocument};
