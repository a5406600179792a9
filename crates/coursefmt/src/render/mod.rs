//! Page shells and per-kind body renderers.
//!
//! Every page shares the same outer structure:
//!
//! ```text
//! div.WFU-SPS.WFU-Container-Global
//! ├── div.grid-row > div.col-xs-12 > div.WFU-SubpageHero…   banner
//! ├── div.grid-row > div.col-xs-12 > header block            course, title
//! ├── div.grid-row > div.col-xs-12.WFU-SubpageContent        body
//! └── footer.WFU-footer                                      copyright
//! ```
//!
//! The class names are consumed by the institutional stylesheet and must
//! not change.

mod assessment;
mod bio;
mod labeled;
mod materials;
mod overview;
mod syllabus;
mod welcome;

use once_cell::sync::Lazy;
use regex::Regex;

use coursefmt_core::markup::{self, escape_attr, escape_text, unescape};
use coursefmt_core::{AnnotatedLine, DocumentKind, TemplateContext};

use crate::links::VideoEmbed;

pub use assessment::render_assessment;
pub use bio::render_bio;
pub use labeled::{render_assignment, render_discussion};
pub use materials::render_materials;
pub use overview::render_overview;
pub use syllabus::render_syllabus;
pub use welcome::render_welcome;

/// Fixed copyright notice closing every page
pub const COPYRIGHT: &str = "Copyright © Wake Forest University. All rights reserved.";

static MODULE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmodule\s+(\d+)").expect("valid regex"));

/// Banner class suffix source for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// `WFU-SubpageHeroModule{N}`
    Module(u32),
    /// `WFU-SubpageHeroGeneral`
    General,
}

impl Banner {
    /// Banner for a kind: module pages take the number from the context,
    /// then from `Module N` in the title, then default to 1
    pub fn for_kind(kind: DocumentKind, ctx: &TemplateContext) -> Self {
        match kind {
            DocumentKind::ModuleOverview | DocumentKind::LearningMaterials => {
                Banner::Module(module_number(ctx))
            }
            _ => Banner::General,
        }
    }

    pub fn class(self) -> String {
        match self {
            Banner::Module(n) => format!("WFU-SubpageHeroModule{n}"),
            Banner::General => "WFU-SubpageHeroGeneral".to_string(),
        }
    }
}

fn module_number(ctx: &TemplateContext) -> u32 {
    ctx.module_number
        .filter(|n| *n > 0)
        .or_else(|| {
            MODULE_NUMBER_RE
                .captures(ctx.title())
                .and_then(|caps| caps[1].parse().ok())
                .filter(|n| *n > 0)
        })
        .unwrap_or(1)
}

/// Wrap a rendered body in the banner, header and footer
pub fn shell(banner: Banner, ctx: &TemplateContext, body: &str) -> String {
    format!(
        concat!(
            "<div class=\"WFU-SPS WFU-Container-Global\">\n",
            "<div class=\"grid-row\">\n<div class=\"col-xs-12\">\n",
            "<div class=\"{banner}\"></div>\n",
            "</div>\n</div>\n",
            "<div class=\"grid-row\">\n<div class=\"col-xs-12\">\n",
            "<p class=\"WFU-SubpageHeader\">{course}</p>\n",
            "<h2 class=\"WFU-SubpageSubheader\">{title}</h2>\n",
            "</div>\n</div>\n",
            "<div class=\"grid-row\">\n<div class=\"col-xs-12 WFU-SubpageContent\">\n",
            "{body}",
            "</div>\n</div>\n",
            "<footer class=\"WFU-footer\">\n<p>{copyright}</p>\n</footer>\n",
            "</div>"
        ),
        banner = banner.class(),
        course = escape_text(ctx.course_name()),
        title = escape_text(ctx.title()),
        body = if body.is_empty() { String::new() } else { format!("{body}\n") },
        copyright = COPYRIGHT,
    )
}

/// Responsive video block: an iframe, or a placeholder line when there is
/// nothing to embed. `title` is text already escaped for HTML.
pub fn video_block(embed: Option<&VideoEmbed>, title: &str) -> String {
    let inner = match embed {
        Some(embed) => format!(
            "<iframe class=\"embed-responsive-item\" src=\"{}\" title=\"{}\" width=\"560\" height=\"315\" frameborder=\"0\" allowfullscreen=\"\"></iframe>",
            escape_attr(&embed.embed_url()),
            escape_attr(&unescape(&markup::plain_text(title))),
        ),
        None if title.is_empty() => String::new(),
        None => format!("<p class=\"WFU-VideoPlaceholder\">Video: {title}</p>"),
    };
    format!("<div class=\"embed-responsive embed-responsive-16by9\">{inner}</div>")
}

/// Render the body for a kind (no shell)
pub fn render_body(kind: DocumentKind, lines: &[AnnotatedLine], ctx: &TemplateContext) -> String {
    match kind {
        DocumentKind::ModuleOverview => render_overview(lines, ctx),
        DocumentKind::Discussion => render_discussion(lines),
        DocumentKind::Assignment => render_assignment(lines),
        DocumentKind::LearningMaterials => render_materials(lines),
        DocumentKind::AssessmentOverview => render_assessment(lines),
        DocumentKind::FacultyBio => render_bio(lines, ctx),
        DocumentKind::CourseWelcome => render_welcome(lines, ctx),
        DocumentKind::Syllabus => render_syllabus(lines, ctx),
    }
}

/// Render a full page for a kind
pub fn render_page(kind: DocumentKind, lines: &[AnnotatedLine], ctx: &TemplateContext) -> String {
    shell(Banner::for_kind(kind, ctx), ctx, &render_body(kind, lines, ctx))
}

/// Build a course URL, with `COURSE_ID` standing in for a missing id
pub(crate) fn course_url(ctx: &TemplateContext, path: &str) -> String {
    format!(
        "{}/courses/{}/{}",
        ctx.base_url(),
        ctx.course_id().unwrap_or("COURSE_ID"),
        path
    )
}
