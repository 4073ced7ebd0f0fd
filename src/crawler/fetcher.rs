//! Revision API client
//!
//! This module handles all HTTP traffic for the crawler:
//! - Building the HTTP client
//! - Querying the revision API for a title's latest wikitext
//! - Bounded retry on bad HTTP responses
//! - Per-attempt request identifier generation

use crate::config::{ApplicationConfig, FetchConfig};
use crate::{HarvestError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// Revision API client with a bounded retry policy
///
/// Transport-level failures are never retried and propagate immediately;
/// non-success HTTP statuses are retried up to `max_retries` attempts with a
/// fixed delay between them.
pub struct RevisionFetcher {
    client: Client,
    endpoint: String,
    max_retries: u32,
    retry_delay: Duration,
}

/// Top level of the revision API response (formatversion=2)
#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<ApiQuery>,
}

#[derive(Debug, Deserialize)]
struct ApiQuery {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    revisions: Vec<ApiRevision>,
}

#[derive(Debug, Deserialize)]
struct ApiRevision {
    slots: ApiSlots,
}

#[derive(Debug, Deserialize)]
struct ApiSlots {
    main: ApiSlot,
}

#[derive(Debug, Deserialize)]
struct ApiSlot {
    #[serde(default)]
    content: String,
}

/// Builds the HTTP client used for all revision requests
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .build()
}

/// Generates a pseudo-random request identifier for one attempt
///
/// 32 uppercase hex characters, fresh per attempt.
pub fn request_id() -> String {
    Uuid::new_v4().simple().to_string().to_ascii_uppercase()
}

impl RevisionFetcher {
    /// Creates a fetcher for the configured endpoint and retry policy
    pub fn new(application: &ApplicationConfig, fetch: &FetchConfig) -> Result<Self> {
        let client = build_http_client()?;
        Ok(Self {
            client,
            endpoint: application.endpoint.clone(),
            max_retries: fetch.max_retries,
            retry_delay: Duration::from_millis(fetch.retry_delay_ms),
        })
    }

    /// Fetches the latest revision wikitext for a title
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The wikitext with whitespace runs collapsed, or an
    ///   empty string when the page is missing or has no revision content
    /// * `Err(HarvestError)` - Transport failure, exhausted retries, or a
    ///   malformed API response
    pub async fn fetch_revision(&self, title: &str) -> Result<String> {
        let mut last_status = 0u16;

        for attempt in 1..=self.max_retries {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("action", "query"),
                    ("prop", "revisions"),
                    ("rvprop", "content"),
                    ("rvslots", "main"),
                    ("rvlimit", "1"),
                    ("redirects", "1"),
                    ("format", "json"),
                    ("formatversion", "2"),
                    ("titles", title),
                ])
                .header(reqwest::header::USER_AGENT, request_id())
                .send()
                .await
                .map_err(|source| HarvestError::Http {
                    title: title.to_string(),
                    source,
                })?;

            let status = response.status();
            if status.is_success() {
                let body: ApiResponse =
                    response
                        .json()
                        .await
                        .map_err(|e| HarvestError::BadApiResponse {
                            title: title.to_string(),
                            message: e.to_string(),
                        })?;
                return Ok(Self::revision_content(body));
            }

            last_status = status.as_u16();
            tracing::warn!(
                "Bad response for {}: HTTP {} (attempt {}/{})",
                title,
                last_status,
                attempt,
                self.max_retries
            );

            if attempt < self.max_retries {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(HarvestError::RetriesExhausted {
            title: title.to_string(),
            status: last_status,
            attempts: self.max_retries,
        })
    }

    /// Pulls the latest revision's content out of an API response
    ///
    /// A missing page, an empty page list, or a revision with no content all
    /// reduce to the empty string: the caller treats those as "skip".
    fn revision_content(body: ApiResponse) -> String {
        let page = match body.query.and_then(|q| q.pages.into_iter().next()) {
            Some(p) => p,
            None => return String::new(),
        };

        if page.missing {
            return String::new();
        }

        match page.revisions.into_iter().next_back() {
            Some(revision) => crate::extract::collapse_whitespace(&revision.slots.main.content),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }

    #[test]
    fn test_request_id_shape() {
        let id = request_id();
        assert_eq!(id.len(), 32);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_request_id_fresh_per_attempt() {
        assert_ne!(request_id(), request_id());
    }

    #[test]
    fn test_revision_content_missing_page() {
        let body = ApiResponse {
            query: Some(ApiQuery {
                pages: vec![ApiPage {
                    missing: true,
                    revisions: vec![],
                }],
            }),
        };
        assert_eq!(RevisionFetcher::revision_content(body), "");
    }

    #[test]
    fn test_revision_content_no_revisions() {
        let body = ApiResponse {
            query: Some(ApiQuery {
                pages: vec![ApiPage {
                    missing: false,
                    revisions: vec![],
                }],
            }),
        };
        assert_eq!(RevisionFetcher::revision_content(body), "");
    }

    #[test]
    fn test_revision_content_collapses_whitespace() {
        let body = ApiResponse {
            query: Some(ApiQuery {
                pages: vec![ApiPage {
                    missing: false,
                    revisions: vec![ApiRevision {
                        slots: ApiSlots {
                            main: ApiSlot {
                                content: "some\n\n  spaced   text".to_string(),
                            },
                        },
                    }],
                }],
            }),
        };
        assert_eq!(
            RevisionFetcher::revision_content(body),
            "some spaced text"
        );
    }

    #[test]
    fn test_revision_content_empty_query() {
        let body = ApiResponse { query: None };
        assert_eq!(RevisionFetcher::revision_content(body), "");
    }
}
