//! Course welcome body.

use coursefmt_core::markup::{escape_attr, escape_text};
use coursefmt_core::{AnnotatedLine, TemplateContext};

use super::{course_url, video_block};
use crate::blocks::render_blocks;

/// Number of module links on every welcome page
pub const MODULE_COUNT: usize = 8;

const PLACEHOLDER_MODULE_TITLE: &str = "Module Title";

pub fn render_welcome(lines: &[AnnotatedLine], ctx: &TemplateContext) -> String {
    let mut body = String::new();

    let video_title = escape_text(ctx.video_title());
    body.push_str(&video_block(None, &video_title));
    body.push_str(&render_blocks(lines));

    body.push_str("<h3>Course Modules</h3><ul>");
    for n in 1..=MODULE_COUNT {
        let title = ctx
            .module_titles
            .get(n - 1)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(PLACEHOLDER_MODULE_TITLE);
        let href = course_url(ctx, &format!("pages/module-{n}-overview"));
        body.push_str(&format!(
            "<li><a href=\"{}\">Module {n}: {}</a></li>",
            escape_attr(&href),
            escape_text(title)
        ));
    }
    body.push_str("</ul>");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_links() {
        let ctx = TemplateContext::from_json(
            r#"{"courseId": 77, "moduleTitles": ["Foundations", "", "Ethics & Law"]}"#,
        )
        .unwrap();
        let html = render_welcome(&[], &ctx);
        assert_eq!(html.matches("<li>").count(), MODULE_COUNT);
        assert!(html.contains("<a href=\"/courses/77/pages/module-1-overview\">Module 1: Foundations</a>"));
        assert!(html.contains("Module 2: Module Title"));
        assert!(html.contains("Module 3: Ethics &amp; Law"));
        assert!(html.contains("Module 8: Module Title"));
    }
}
