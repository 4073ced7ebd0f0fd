//! Infobox template parsing
//!
//! Pulls the key-value rows out of the first `{{Infobox ...}}` template in a
//! page's wikitext. Pages without an infobox yield an empty map.

use crate::extract::wikitext::{strip_inline_markup, strip_templates};
use std::collections::BTreeMap;

/// Parses the first infobox template into a field -> value map
pub fn parse_infobox(wikitext: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    let body = match infobox_body(wikitext) {
        Some(b) => b,
        None => return fields,
    };

    for row in split_rows(body) {
        if let Some((key, value)) = row.split_once('=') {
            let key = key.trim();
            let value = strip_inline_markup(&strip_templates(value)).trim().to_string();
            if !key.is_empty() && !value.is_empty() {
                fields.insert(key.to_string(), value);
            }
        }
    }

    fields
}

/// Locates the first infobox template and returns its inner body
/// (everything between `{{Infobox` and the matching `}}`)
fn infobox_body(wikitext: &str) -> Option<&str> {
    let start = infobox_start(wikitext)?;
    let inner_start = start + 2;

    let mut depth = 1usize;
    let mut iter = wikitext[inner_start..].char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        let abs = inner_start + i;
        if c == '{' && wikitext[abs + 1..].starts_with('{') {
            depth += 1;
            iter.next();
        } else if c == '}' && wikitext[abs + 1..].starts_with('}') {
            depth -= 1;
            if depth == 0 {
                return Some(&wikitext[inner_start..abs]);
            }
            iter.next();
        }
    }

    // Unterminated infobox; take the rest of the text
    Some(&wikitext[inner_start..])
}

/// Finds the byte offset of the first `{{Infobox` opener, case-insensitively
fn infobox_start(wikitext: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(pos) = wikitext[search..].find("{{") {
        let abs = search + pos;
        let after = &wikitext[abs + 2..];
        let matches = after
            .get(0..7)
            .map_or(false, |s| s.eq_ignore_ascii_case("infobox"));
        if matches {
            return Some(abs);
        }
        search = abs + 2;
    }
    None
}

/// Splits the infobox body on top-level `|` separators, respecting nested
/// templates and links
fn split_rows(body: &str) -> Vec<&str> {
    let mut rows = Vec::new();
    let mut brace_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut row_start = 0usize;

    for (i, c) in body.char_indices() {
        match c {
            '{' => brace_depth += 1,
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '|' if brace_depth == 0 && bracket_depth == 0 => {
                rows.push(&body[row_start..i]);
                row_start = i + 1;
            }
            _ => {}
        }
    }
    rows.push(&body[row_start..]);

    // The first segment is the template name, not a field row
    if rows.is_empty() {
        rows
    } else {
        rows.split_off(1)
    }
}
