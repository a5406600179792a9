//! Built-in rules for writing pasted elements as annotated text.

use once_cell::sync::Lazy;
use regex::Regex;

use coursefmt_core::PasteOptions;

use super::{Filter, Rule};
use crate::node::Node;
use crate::service::WalkContext;
use crate::utilities::{clean_attribute, is_block, is_bold, is_italic, wrap_lines, DISCARDED_ELEMENTS};

static WORD_LIST_LEVEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)mso-list:\s*l\d+\s+level(\d+)").expect("valid regex"));

/// Create all built-in rules, in the order they are consulted
pub fn annotated_rules() -> Vec<Rule> {
    vec![
        line_break_rule(),
        word_list_paragraph_rule(),
        list_rule(),
        list_item_rule(),
        anchor_rule(),
        block_rule(),
        emphasis_rule(),
    ]
}

/// Elements dropped together with their content
pub fn default_remove_filters() -> Vec<Filter> {
    vec![
        Filter::tags(DISCARDED_ELEMENTS),
        // Word's bullet glyph and its padding live in an mso-list:Ignore span
        Filter::predicate(|_, node| node.style_contains("mso-list:ignore")),
    ]
}

/// Indentation plus bullet for an item at `depth` (1-based)
fn bullet_prefix(depth: usize, options: &PasteOptions) -> String {
    let indent = " ".repeat(options.indent_width * depth.saturating_sub(1));
    format!("{indent}{}", options.bullet)
}

/// Wrap `content` in the markers `node` itself adds.
///
/// A style an ancestor already applied is not repeated, so only the
/// outermost bold (or italic) element writes markers.
fn emphasize(node: &Node, content: &str, ctx: &WalkContext, options: &PasteOptions) -> String {
    let mut out = content.to_string();
    if is_italic(node) && !ctx.in_italic {
        let (open, close) = options.markers.italic();
        out = wrap_lines(&out, open, close);
    }
    if is_bold(node) && !ctx.in_bold {
        let (open, close) = options.markers.bold();
        out = wrap_lines(&out, open, close);
    }
    out
}

fn word_list_level(node: &Node) -> Option<usize> {
    let style = node.attr("style")?;
    WORD_LIST_LEVEL_RE
        .captures(style)
        .and_then(|caps| caps[1].parse().ok())
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, _, _| "\n".to_string())
}

fn word_list_paragraph_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node| tag == "p" && word_list_level(node).is_some()),
        |node, content, ctx, options| {
            let content = content.trim();
            if content.is_empty() {
                return String::new();
            }
            let depth = word_list_level(node).unwrap_or(1).max(1);
            let text = emphasize(node, content, ctx, options);
            format!("{}{}\n", bullet_prefix(depth, options), text)
        },
    )
}

fn list_rule() -> Rule {
    Rule::new(Filter::tags(&["ul", "ol"]), |_, content, _, _| {
        let body = content.trim_matches('\n');
        if body.trim().is_empty() {
            return String::new();
        }
        // Lists always start on a fresh line, nested or not
        format!("\n{body}\n")
    })
}

fn list_item_rule() -> Rule {
    Rule::for_tag("li", |node, content, ctx, options| {
        let depth = ctx.list_depth.max(1);
        let sub_indent = " ".repeat(options.indent_width * depth);
        let sub_prefix = format!("{sub_indent}{}", options.bullet);

        let mut main = String::new();
        let mut subs: Vec<String> = Vec::new();
        let mut seen_first = false;

        for raw in content.lines() {
            let line = raw.trim_end();
            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                continue;
            }

            if line.starts_with(&sub_indent) && trimmed.starts_with(options.bullet.as_str()) {
                // Already written by a nested list: keep its indentation
                subs.push(line.to_string());
            } else if !seen_first {
                main = strip_manual_bullet(trimmed).unwrap_or(trimmed).to_string();
            } else if let Some(text) = strip_manual_bullet(trimmed) {
                if !text.is_empty() {
                    subs.push(format!("{sub_prefix}{}", emphasize(node, text, ctx, options)));
                }
            } else {
                let target = subs.last_mut().unwrap_or(&mut main);
                if !target.is_empty() {
                    target.push(' ');
                }
                target.push_str(trimmed);
            }
            seen_first = true;
        }

        let mut out = String::new();
        if !main.is_empty() {
            out.push_str(&bullet_prefix(depth, options));
            out.push_str(&emphasize(node, &main, ctx, options));
            out.push('\n');
        }
        for sub in subs {
            out.push_str(&sub);
            out.push('\n');
        }
        out
    })
}

/// `"- text"` typed by hand inside a single list item
fn strip_manual_bullet(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-')?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn anchor_rule() -> Rule {
    Rule::for_tag("a", |node, content, _, _| {
        let href = clean_attribute(node.attr("href"));
        let lower = href.to_lowercase();
        if href.is_empty() || href.starts_with('#') || lower.starts_with("javascript:") {
            return content.to_string();
        }

        let label = content.trim();
        if label.is_empty() || label == href {
            href
        } else {
            format!("{label} {href}")
        }
    })
}

fn block_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, _| is_block(tag)),
        |node, content, ctx, options| {
            // Only ASCII whitespace: leading non-breaking spaces are indentation
            let trimmed = content.trim_matches(|c: char| c.is_ascii_whitespace());
            if trimmed.is_empty() {
                String::new()
            } else {
                format!("{}\n", emphasize(node, trimmed, ctx, options))
            }
        },
    )
}

fn emphasis_rule() -> Rule {
    Rule::new(
        Filter::predicate(|_, node| is_bold(node) || is_italic(node)),
        emphasize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_prefix() {
        let options = PasteOptions::default();
        assert_eq!(bullet_prefix(1, &options), "- ");
        assert_eq!(bullet_prefix(3, &options), "    - ");
    }

    #[test]
    fn test_word_list_level() {
        let p = Node::element_with_attrs(
            "p",
            vec![("style", "margin-left:.5in;mso-list:l0 level2 lfo1")],
        );
        assert_eq!(word_list_level(&p), Some(2));
        assert_eq!(word_list_level(&Node::element("p")), None);
    }

    #[test]
    fn test_strip_manual_bullet() {
        assert_eq!(strip_manual_bullet("- sub"), Some("sub"));
        assert_eq!(strip_manual_bullet("-5 points"), None);
        assert_eq!(strip_manual_bullet("plain"), None);
    }
}
