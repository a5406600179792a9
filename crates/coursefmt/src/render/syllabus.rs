//! Syllabus body with the instructor block.

use once_cell::sync::Lazy;
use regex::Regex;

use coursefmt_core::markup::{escape_attr, escape_text};
use coursefmt_core::{AnnotatedLine, TemplateContext};

use crate::blocks::render_blocks;

/// Title appended to every instructor line
pub const INSTRUCTOR_SUFFIX: &str = "Adjunct Professor of Practice";

static SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)adjunct\s+professor\s+of\s+practice").expect("valid regex"));

static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[,;]\s*(?:[,;]\s*)*").expect("valid regex"));

/// Credentials without the title the suffix already supplies
pub fn clean_credentials(raw: &str) -> Option<String> {
    let stripped = SUFFIX_RE.replace_all(raw, "");
    let joined = SEPARATOR_RUN_RE.replace_all(&stripped, ", ");
    let cleaned = joined.trim().trim_matches(|c: char| c == ',' || c == ';').trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

pub fn render_syllabus(lines: &[AnnotatedLine], ctx: &TemplateContext) -> String {
    let name = escape_text(ctx.instructor_name());
    let credentials = ctx
        .instructor_credentials()
        .and_then(clean_credentials)
        .map(|c| format!("{}, ", escape_text(&c)))
        .unwrap_or_default();
    let email = ctx.instructor_email();

    format!(
        concat!(
            "<h3>Instructor Information</h3>",
            "<p><strong>{name}</strong>, {credentials}{suffix}</p>",
            "<p>Email: <a href=\"mailto:{href}\">{email}</a></p>",
            "<p>Syllabus: <strong>{file}</strong></p>",
            "{body}"
        ),
        name = name,
        credentials = credentials,
        suffix = INSTRUCTOR_SUFFIX,
        href = escape_attr(email),
        email = escape_text(email),
        file = escape_text(ctx.syllabus_file_name()),
        body = render_blocks(lines),
    )
}
