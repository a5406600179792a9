//! Light markdown-to-markup conversion for unclassified text.

use once_cell::sync::Lazy;
use regex::Regex;

use coursefmt_core::markup;
use coursefmt_core::AnnotatedLine;

use crate::links::autolink;
use crate::lists::ListBuilder;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid regex"));

/// Inline conversion for one line: emphasis, then bare URLs
pub fn inline(text: &str) -> String {
    autolink(&markup::inline(text))
}

/// A paragraph holding one converted line
pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", inline(text))
}

/// Render lines as headings, nested lists and paragraphs.
///
/// `#` headings map to `h2`..`h6`, bullet lines feed one indent-aware list
/// per run, and every other non-blank line becomes its own paragraph.
pub fn render_blocks(lines: &[AnnotatedLine]) -> String {
    let mut out = String::new();
    let mut list = ListBuilder::new();

    for line in lines {
        if line.is_bullet_marker {
            list = list.item(line.indent, &inline(&line.text));
            continue;
        }
        if list.is_open() {
            out.push_str(&std::mem::take(&mut list).finish());
        }
        if line.is_blank() {
            continue;
        }
        match HEADING_RE.captures(&line.text) {
            Some(caps) => {
                let level = (caps[1].len() + 1).min(6);
                out.push_str(&format!("<h{level}>{}</h{level}>", inline(&caps[2])));
            }
            None => out.push_str(&paragraph(&line.text)),
        }
    }

    out.push_str(&list.finish());
    out
}
