//! Text normalization ahead of classification.

use once_cell::sync::Lazy;
use regex::Regex;

use coursefmt_core::markup::escape_text;
use coursefmt_core::AnnotatedLine;

static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

/// Zero-width and soft formatting characters that never render
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200b}'..='\u{200f}' | '\u{2060}' | '\u{feff}' | '\u{ad}')
}

/// Clean raw text while keeping its line structure.
///
/// Invisible characters are removed, non-breaking spaces become spaces,
/// line endings are unified, line ends trimmed and each run of blank lines
/// is reduced to a single blank line. Leading indentation is kept.
pub fn normalize_text(raw: &str) -> String {
    let cleaned: String = raw
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| !is_invisible(*c))
        .map(|c| match c {
            '\u{a0}' | '\u{202f}' | '\u{2007}' => ' ',
            other => other,
        })
        .collect();

    let mut out: Vec<&str> = Vec::new();
    for line in cleaned.split('\n').map(str::trim_end) {
        if line.is_empty() && out.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }

    out.join("\n").trim_matches('\n').to_string()
}

/// Normalize text and annotate every line.
///
/// Blank lines survive (one per run) so classifiers that treat them as
/// paragraph separators can see them; see [`compact`].
pub fn normalize_lines(raw: &str) -> Vec<AnnotatedLine> {
    let text = normalize_text(raw);
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .map(|line| {
            let mut parsed = AnnotatedLine::parse(line);
            parsed.text = escape_text(&SPACE_RUN_RE.replace_all(&parsed.text, " "));
            parsed
        })
        .collect()
}

/// Drop blank lines, for classifiers that ignore paragraph breaks
pub fn compact(lines: &[AnnotatedLine]) -> Vec<AnnotatedLine> {
    lines.iter().filter(|l| !l.is_blank()).cloned().collect()
}
