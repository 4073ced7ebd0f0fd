//! Content extraction pipeline
//!
//! Turns the raw wikitext of one page into its structured form: sanitized
//! HTML, plaintext, infobox key-values, and the ordered set of same-site
//! link targets.

mod infobox;
mod wikitext;

pub use infobox::parse_infobox;
pub use wikitext::render;

use scraper::{Html, Selector};
use std::collections::{BTreeMap, HashSet};

/// Structured content extracted from one page's wikitext
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    /// Wikitext rendered to HTML, style elements stripped, whitespace collapsed
    pub html: String,

    /// Plaintext rendering of the same HTML, whitespace collapsed
    pub text: String,

    /// Infobox fields; empty when the page has no infobox
    pub info: BTreeMap<String, String>,

    /// Deduplicated, ordered same-site link targets
    pub link: Vec<String>,
}

/// Extracts structured content from raw wikitext
///
/// # Arguments
///
/// * `wiki` - The raw wikitext of one page
///
/// # Returns
///
/// * `Ok(ExtractedContent)` - Successfully extracted content
/// * `Err(String)` - Failed to parse the rendered HTML
pub fn extract(wiki: &str) -> Result<ExtractedContent, String> {
    // The infobox is read from the wikitext itself; rendering drops templates
    let info = parse_infobox(wiki);

    let rendered = render(wiki);
    let sanitized = strip_style_elements(&rendered);

    let document = Html::parse_document(&sanitized);

    let text = document.root_element().text().collect::<String>();
    let link = extract_links(&document)?;

    Ok(ExtractedContent {
        html: collapse_whitespace(&sanitized),
        text: collapse_whitespace(&text),
        info,
        link,
    })
}

/// Collapses every run of whitespace into a single space
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes `<style>...</style>` elements from an HTML string
fn strip_style_elements(html: &str) -> String {
    // to_ascii_lowercase preserves byte offsets, so indices found in the
    // lowered copy are valid in the original
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    while let Some(pos) = lower[cursor..].find("<style") {
        let start = cursor + pos;
        out.push_str(&html[cursor..start]);
        match lower[start..].find("</style>") {
            Some(end) => cursor = start + end + "</style>".len(),
            None => {
                // Unterminated style element swallows the rest
                cursor = html.len();
            }
        }
    }
    out.push_str(&html[cursor..]);
    out
}

/// Extracts same-site link targets from anchors in the rendered HTML
///
/// An anchor qualifies when its href is a relative path (`./` prefix) and
/// contains no fragment marker; the target is the href with the prefix
/// stripped. Targets are deduplicated, first occurrence wins.
fn extract_links(document: &Html) -> Result<Vec<String>, String> {
    let selector =
        Selector::parse("a[href]").map_err(|e| format!("invalid selector: {:?}", e))?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };
        if href.contains('#') {
            continue;
        }
        if let Some(target) = href.strip_prefix("./") {
            if !target.is_empty() && seen.insert(target.to_string()) {
                links.push(target.to_string());
            }
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_from_wikitext() {
        let content = extract("See [[Feline]] and [[Dog|dogs]].").unwrap();
        assert_eq!(content.link, vec!["Feline", "Dog"]);
    }

    #[test]
    fn test_links_deduplicated_in_order() {
        let content = extract("[[B]] [[A]] [[B]] [[C]] [[A]]").unwrap();
        assert_eq!(content.link, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_fragment_links_excluded() {
        let content = extract("[[Cat#Anatomy]] and [[Cat]]").unwrap();
        assert_eq!(content.link, vec!["Cat"]);
    }

    #[test]
    fn test_external_links_excluded() {
        let content = extract("[https://example.com ext] and [[Cat]]").unwrap();
        assert_eq!(content.link, vec!["Cat"]);
    }

    #[test]
    fn test_style_elements_stripped() {
        let content = extract("<style>body { color: red; }</style>Visible text").unwrap();
        assert!(!content.html.contains("color"));
        assert!(content.html.contains("Visible text"));
        assert!(!content.text.contains("color"));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let content = extract("Several    spaces\n\nand   newlines").unwrap();
        assert_eq!(content.text, "Several spaces and newlines");
    }

    #[test]
    fn test_text_has_no_markup() {
        let content = extract("'''Bold''' [[linked words]] plain").unwrap();
        assert_eq!(content.text, "Bold linked words plain");
    }

    #[test]
    fn test_infobox_extracted() {
        let content = extract("{{Infobox cat\n| genus = Felis\n}}The cat.").unwrap();
        assert_eq!(content.info.get("genus").map(String::as_str), Some("Felis"));
        // Template text never reaches the rendered output
        assert!(!content.html.contains("genus"));
    }

    #[test]
    fn test_no_infobox_empty_map() {
        let content = extract("Plain page.").unwrap();
        assert!(content.info.is_empty());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }
}
