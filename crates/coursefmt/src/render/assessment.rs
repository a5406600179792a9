//! Assessment overview body.

use coursefmt_core::AnnotatedLine;

use crate::blocks;
use crate::classify::assessment::{bold_module_token, classify, LineKind};

pub fn render_assessment(lines: &[AnnotatedLine]) -> String {
    let mut out = String::new();
    for section in classify(lines) {
        out.push_str(&format!("<h3>{}</h3>", section.heading));
        for entry in &section.lines {
            let html = match entry.kind {
                LineKind::ModuleLine => format!("<p>{}</p>", bold_module_token(&entry.text)),
                LineKind::PointsLine => format!("<p><em>{}</em></p>", blocks::inline(&entry.text)),
                LineKind::RubricLine | LineKind::Description => blocks::paragraph(&entry.text),
            };
            out.push_str(&html);
        }
    }
    out
}
