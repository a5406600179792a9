//! Faculty bio body.

use coursefmt_core::markup::{escape_attr, escape_text};
use coursefmt_core::{AnnotatedLine, TemplateContext};

use super::course_url;
use crate::blocks::render_blocks;

pub fn render_bio(lines: &[AnnotatedLine], ctx: &TemplateContext) -> String {
    let name = ctx.faculty_name();
    let image = course_url(
        ctx,
        &format!("files/{}/download", ctx.faculty_image_number().unwrap_or("IMAGE_NUMBER")),
    );

    format!(
        "<h3>{}</h3><p><img src=\"{}\" alt=\"{}\" style=\"float: right; max-width: 200px; margin: 0 0 10px 15px;\"></p>{}",
        escape_text(name),
        escape_attr(&image),
        escape_attr(name),
        render_blocks(lines)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_lines;

    #[test]
    fn test_bio_image_url() {
        let ctx = TemplateContext::from_json(
            r#"{"facultyName": "Dr. Ada Lovelace", "courseId": "123", "facultyImageNumber": 456, "baseUrl": "https://wfu.instructure.com"}"#,
        )
        .unwrap();
        let html = render_bio(&normalize_lines("Ada teaches analytics."), &ctx);
        assert!(html.starts_with("<h3>Dr. Ada Lovelace</h3>"));
        assert!(html.contains("src=\"https://wfu.instructure.com/courses/123/files/456/download\""));
        assert!(html.ends_with("<p>Ada teaches analytics.</p>"));
    }

    #[test]
    fn test_bio_placeholders() {
        let html = render_bio(&[], &TemplateContext::default());
        assert!(html.contains("<h3>Faculty Name</h3>"));
        assert!(html.contains("/courses/COURSE_ID/files/IMAGE_NUMBER/download"));
    }
}
