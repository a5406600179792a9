//! Module overview body.

use coursefmt_core::markup::{self, escape_text};
use coursefmt_core::{AnnotatedLine, TemplateContext};

use super::video_block;
use crate::blocks::render_blocks;

/// Checklist and objective entries that only echo the form's hint text
fn is_filler(entry: &str) -> bool {
    let entry = entry.trim();
    entry.is_empty() || entry.eq_ignore_ascii_case("module description")
}

fn list_items(entries: &[String]) -> String {
    entries
        .iter()
        .filter(|e| !is_filler(e))
        .map(|e| format!("<li>{}</li>", markup::inline(&escape_text(e.trim()))))
        .collect()
}

pub fn render_overview(lines: &[AnnotatedLine], ctx: &TemplateContext) -> String {
    let mut body = String::new();

    let overview = render_blocks(lines);
    if !overview.is_empty() {
        body.push_str("<h3>Module Overview</h3>");
        body.push_str(&overview);
    }

    let video_title = escape_text(ctx.video_title());
    body.push_str(&format!("<h3>{video_title}</h3>"));
    body.push_str(&video_block(None, &video_title));

    let objectives = list_items(&ctx.objectives);
    if !objectives.is_empty() {
        body.push_str(&format!("<h3>Learning Objectives</h3><ol>{objectives}</ol>"));
    }

    let checklist = list_items(&ctx.checklist);
    if !checklist.is_empty() {
        body.push_str(&format!("<h3>Module Checklist</h3><ul>{checklist}</ul>"));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_lines;

    #[test]
    fn test_objectives_and_checklist() {
        let ctx = TemplateContext {
            objectives: vec!["Explain **risk**".into(), "Module Description".into()],
            checklist: vec!["module description".into()],
            video_title: Some("Welcome to Module 2".into()),
            ..Default::default()
        };
        let html = render_overview(&normalize_lines("This week we study risk."), &ctx);
        assert!(html.starts_with("<h3>Module Overview</h3><p>This week we study risk.</p>"));
        assert!(html.contains("<h3>Welcome to Module 2</h3>"));
        assert!(html.contains("<ol><li>Explain <strong>risk</strong></li></ol>"));
        assert!(!html.contains("Module Checklist"));
    }

    #[test]
    fn test_video_placeholder_default_title() {
        let html = render_overview(&[], &TemplateContext::default());
        assert!(html.contains("Video: Video Title"));
        assert!(!html.contains("Learning Objectives"));
    }
}
