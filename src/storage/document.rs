//! The persisted page record format
//!
//! One document is written per title; the value stored is the UTF-8 JSON
//! serialization of [`PageDocument`], keyed by the title string.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured content persisted for one encyclopedia page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Page title; also the store key
    pub title: String,

    /// Raw wikitext as returned by the revision API (whitespace collapsed)
    pub wiki: String,

    /// Sanitized HTML rendering of the wikitext
    pub html: String,

    /// Plaintext rendering of the same HTML
    pub text: String,

    /// Infobox field name -> value; empty when the page has no infobox
    pub info: BTreeMap<String, String>,

    /// Ordered, deduplicated titles this page links to
    pub link: Vec<String>,
}

impl PageDocument {
    /// Builds a document from a title, its raw wikitext, and extracted content
    pub fn new(title: &str, wiki: &str, content: crate::extract::ExtractedContent) -> Self {
        Self {
            title: title.to_string(),
            wiki: wiki.to_string(),
            html: content.html,
            text: content.text,
            info: content.info,
            link: content.link,
        }
    }
}
