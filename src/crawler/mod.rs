//! Crawler module for revision fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - Seed title generation from the configured template and range
//! - Revision API fetching with bounded retry
//! - The two-level traversal over discovered links
//! - Visited-set bookkeeping

mod controller;
mod fetcher;
pub(crate) mod seeds;

pub use controller::{crawl, Controller};
pub use fetcher::{build_http_client, request_id, RevisionFetcher};
pub use seeds::seed_titles;
