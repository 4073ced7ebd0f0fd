//! Configuration module for wikiharvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wikiharvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Title template: {}", config.application.template);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApplicationConfig, Config, FetchConfig, StoreConfig, DEFAULT_ENDPOINT};

// Re-export parser functions
pub use parser::load_config;
pub use validation::validate;
