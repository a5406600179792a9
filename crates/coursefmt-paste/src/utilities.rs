//! Utility functions and constants for element-tree processing.

use crate::node::Node;

/// Block-level elements that end a line of annotated text
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "main", "nav", "p", "pre", "section", "table", "td", "th",
    "tr", "caption",
];

/// Containers whose whitespace-only text children are never meaningful
pub const STRUCTURAL_CONTAINERS: &[&str] = &[
    "ul", "ol", "table", "thead", "tbody", "tfoot", "tr", "dl",
];

/// Elements removed together with their content
pub const DISCARDED_ELEMENTS: &[&str] = &[
    "script", "style", "head", "title", "meta", "link", "template", "noscript",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag opens a list
pub fn is_list(tag: &str) -> bool {
    matches!(tag.to_lowercase().as_str(), "ul" | "ol")
}

pub fn is_structural_container(tag: &str) -> bool {
    STRUCTURAL_CONTAINERS.contains(&tag.to_lowercase().as_str())
}

/// Whether an element renders bold, by tag name or inline font-weight.
///
/// Block elements count too: `<p style="font-weight:bold">` is a bold line.
pub fn is_bold(node: &Node) -> bool {
    if !node.is_element() {
        return false;
    }
    let weight = node.style("font-weight");
    match node.tag_name().as_str() {
        // Google Docs wraps whole payloads in <b style="font-weight:normal">
        "b" | "strong" => !weight.as_deref().is_some_and(is_light_weight),
        _ => weight.as_deref().is_some_and(is_heavy_weight),
    }
}

/// Whether an element renders italic, by tag name or inline font-style
pub fn is_italic(node: &Node) -> bool {
    if !node.is_element() {
        return false;
    }
    let style = node.style("font-style");
    match node.tag_name().as_str() {
        "i" | "em" => style.as_deref() != Some("normal"),
        _ => matches!(style.as_deref(), Some("italic") | Some("oblique")),
    }
}

fn is_heavy_weight(weight: &str) -> bool {
    match weight {
        "bold" | "bolder" => true,
        other => other.parse::<u32>().map(|w| w >= 600).unwrap_or(false),
    }
}

fn is_light_weight(weight: &str) -> bool {
    match weight {
        "normal" | "lighter" => true,
        other => other.parse::<u32>().map(|w| w <= 500).unwrap_or(false),
    }
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Collapse runs of ASCII whitespace to a single space.
///
/// Non-breaking spaces are left alone; post-processing maps them later.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Wrap every non-blank line of `content` in `open`/`close`.
///
/// Surrounding whitespace stays outside the markers, so a marker is never
/// left open across a line break and `<b> </b>` yields no markers at all.
/// A trailing URL (from a bold link) and a leading `- ` bullet also stay
/// outside.
pub fn wrap_lines(content: &str, open: &str, close: &str) -> String {
    content
        .split('\n')
        .map(|segment| {
            let core = segment.trim();
            if core.is_empty() {
                return segment.to_string();
            }
            let mut lead_len = segment.len() - segment.trim_start().len();
            if let Some(item) = core.strip_prefix("- ") {
                lead_len += core.len() - item.trim_start().len();
            }
            let core = &segment[lead_len..lead_len + segment[lead_len..].trim_end().len()];
            let lead = &segment[..lead_len];
            let trail = &segment[lead_len + core.len()..];
            let (text, url) = split_trailing_url(core);
            if text.is_empty() {
                return segment.to_string();
            }
            format!("{lead}{open}{text}{close}{url}{trail}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split `"Label https://x"` into `("Label", " https://x")`
fn split_trailing_url(core: &str) -> (&str, &str) {
    let start = core
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let last = &core[start..];
    if last.starts_with("http://") || last.starts_with("https://") {
        let text = core[..start].trim_end();
        (text, &core[text.len()..])
    } else {
        (core, "")
    }
}
