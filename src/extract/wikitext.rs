//! Minimal wikitext -> HTML rendering
//!
//! This renderer covers the constructs the extraction pipeline depends on:
//! internal links become same-site relative anchors (`<a href="./Target">`),
//! headings and bold/italic markup become their HTML equivalents, and
//! templates are dropped from the rendered output (the infobox is read
//! separately, before rendering). Raw HTML embedded in the wikitext passes
//! through untouched.

/// Renders wikitext to HTML
pub fn render(wikitext: &str) -> String {
    let stripped = strip_templates(wikitext);
    let mut html = String::with_capacity(stripped.len());

    for line in stripped.lines() {
        if let Some(heading) = render_heading(line) {
            html.push_str(&heading);
        } else {
            html.push_str(&render_inline(line));
        }
        html.push('\n');
    }

    html
}

/// Removes `{{...}}` template invocations, respecting nesting
pub(crate) fn strip_templates(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut depth = 0usize;
    let mut iter = input.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if c == '{' && input[i + 1..].starts_with('{') {
            depth += 1;
            iter.next();
        } else if c == '}' && depth > 0 && input[i + 1..].starts_with('}') {
            depth -= 1;
            iter.next();
        } else if depth == 0 {
            out.push(c);
        }
    }

    out
}

/// Renders `== Heading ==` lines; returns None for ordinary lines
fn render_heading(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if !trimmed.starts_with("==") || !trimmed.ends_with("==") || trimmed.len() < 5 {
        return None;
    }

    let level = trimmed.chars().take_while(|&c| c == '=').count().min(6);
    let inner = trimmed
        .trim_start_matches('=')
        .trim_end_matches('=')
        .trim();
    if inner.is_empty() {
        return None;
    }

    Some(format!(
        "<h{level}>{}</h{level}>",
        render_inline(inner),
        level = level
    ))
}

/// Renders inline markup: internal links, external links, bold, italic
fn render_inline(text: &str) -> String {
    let linked = render_links(text);
    render_quotes(&linked)
}

/// Converts `[[Target|label]]` / `[[Target]]` into relative anchors and
/// `[url label]` external links into absolute anchors
fn render_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("[[") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("]]") {
            Some(close) => {
                let body = &after[..close];
                let (target, label) = match body.split_once('|') {
                    Some((t, l)) => (t.trim(), l.trim()),
                    None => (body.trim(), body.trim()),
                };
                if target.is_empty() {
                    out.push_str(body);
                } else {
                    out.push_str(&format!("<a href=\"./{}\">{}</a>", target, label));
                }
                rest = &after[close + 2..];
            }
            None => {
                // Unbalanced link; emit as-is
                out.push_str("[[");
                rest = after;
            }
        }
    }
    out.push_str(rest);

    render_external_links(&out)
}

/// Converts `[https://... label]` external link syntax
fn render_external_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let is_external = after.starts_with("http://") || after.starts_with("https://");
        if !is_external {
            out.push_str(&rest[..open + 1]);
            rest = after;
            continue;
        }

        out.push_str(&rest[..open]);
        match after.find(']') {
            Some(close) => {
                let body = &after[..close];
                let (url, label) = match body.split_once(' ') {
                    Some((u, l)) => (u, l.trim()),
                    None => (body, body),
                };
                out.push_str(&format!("<a href=\"{}\">{}</a>", url, label));
                rest = &after[close + 1..];
            }
            None => {
                out.push('[');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Converts `'''bold'''` and `''italic''` quote markup
fn render_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut bold_open = false;
    let mut italic_open = false;

    while let Some(pos) = rest.find("''") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos..];
        if after.starts_with("'''") {
            out.push_str(if bold_open { "</b>" } else { "<b>" });
            bold_open = !bold_open;
            rest = &after[3..];
        } else {
            out.push_str(if italic_open { "</i>" } else { "<i>" });
            italic_open = !italic_open;
            rest = &after[2..];
        }
    }
    out.push_str(rest);

    // Close any markup left dangling by malformed input
    if italic_open {
        out.push_str("</i>");
    }
    if bold_open {
        out.push_str("</b>");
    }
    out
}

/// Reduces inline wiki markup to its plain text (for infobox values)
pub(crate) fn strip_inline_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    // Replace links with their labels
    while let Some(open) = rest.find("[[") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("]]") {
            Some(close) => {
                let body = &after[..close];
                let label = match body.split_once('|') {
                    Some((_, l)) => l.trim(),
                    None => body.trim(),
                };
                out.push_str(label);
                rest = &after[close + 2..];
            }
            None => {
                out.push_str("[[");
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out.replace("'''", "").replace("''", "")
}
