//! Light markup helpers
//!
//! Converts the inline markers carried by annotated text into HTML and
//! provides the escaping rules every renderer shares.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\*([^*\s](?:[^*]*?[^*\s])?)\*\*\*").expect("valid regex"));
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\s](?:[^*]*?[^*\s])?)\*\*").expect("valid regex"));
static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\s](?:[^*]*?[^*\s])?)\*").expect("valid regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Convert asterisk emphasis to `<strong>`/`<em>`.
///
/// Markers must hug their content, so `5 * 3 * 2` is left alone.
pub fn inline(text: &str) -> String {
    let result = BOLD_ITALIC_RE.replace_all(text, "<strong><em>$1</em></strong>");
    let result = BOLD_RE.replace_all(&result, "<strong>$1</strong>");
    let result = ITALIC_RE.replace_all(&result, "<em>$1</em>");
    // Bold around italic only matches once the inner markers are gone
    BOLD_RE.replace_all(&result, "<strong>$1</strong>").into_owned()
}

/// Strip emphasis markers and tags, leaving the visible text
pub fn plain_text(text: &str) -> String {
    let without_tags = TAG_RE.replace_all(text, "");
    without_tags.replace('*', "").trim().to_string()
}

/// Escape text content so it can never open markup
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an attribute value for a double-quoted attribute
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Undo [`escape_text`] (used on URLs lifted out of escaped text)
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Build an anchor that opens in a new tab.
///
/// `label` is inserted as-is (it may already contain inline markup);
/// `url` is raw and gets attribute-escaped.
pub fn anchor(url: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        escape_attr(url),
        label
    )
}
