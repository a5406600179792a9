//! Formatter - the entry point from raw content to a finished page.

use tracing::{debug, instrument, warn};

use coursefmt_core::{DocumentKind, TemplateContext};
use coursefmt_paste::PasteSerializer;

use crate::blocks::render_blocks;
use crate::normalize::normalize_lines;
use crate::render::{render_page, shell, Banner};
use crate::sanitize::{sanitize, Policy};

/// Content handed to the formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentInput {
    /// A rich-text clipboard payload
    Html(String),
    /// Annotated plain text
    Text(String),
}

impl ContentInput {
    fn into_annotated(self, serializer: &PasteSerializer) -> String {
        match self {
            ContentInput::Html(html) => serializer.serialize_html(&html),
            ContentInput::Text(text) => text,
        }
    }
}

/// Options for the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Run the allow-list sanitizer over the assembled page
    pub sanitize: bool,

    /// Keep video iframes through sanitization
    pub allow_embeds: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            sanitize: true,
            allow_embeds: true,
        }
    }
}

impl FormatOptions {
    fn policy(&self) -> Policy {
        if self.allow_embeds {
            Policy::with_embeds()
        } else {
            Policy::strict()
        }
    }
}

/// Formats course content into institutional pages
#[derive(Default)]
pub struct Formatter {
    options: FormatOptions,
    serializer: PasteSerializer,
}

impl Formatter {
    /// Create a formatter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            options,
            serializer: PasteSerializer::new(),
        }
    }

    /// Format content for a document-kind tag.
    ///
    /// Unrecognized tags fall back to plain block conversion without the
    /// page shell. Empty input yields the shell around an empty body.
    /// Never fails.
    #[instrument(skip_all, fields(tag = %tag))]
    pub fn format(&self, input: ContentInput, tag: &str, ctx: &TemplateContext) -> String {
        let text = input.into_annotated(&self.serializer);
        let html = match DocumentKind::from_tag(tag) {
            Some(kind) => self.page(kind, &text, ctx),
            None => {
                warn!(%tag, "unknown document kind, rendering bare blocks");
                render_blocks(&normalize_lines(&text))
            }
        };
        self.finish(html)
    }

    /// Format annotated text for a known kind
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn render(&self, kind: DocumentKind, text: &str, ctx: &TemplateContext) -> String {
        self.finish(self.page(kind, text, ctx))
    }

    fn page(&self, kind: DocumentKind, text: &str, ctx: &TemplateContext) -> String {
        let lines = normalize_lines(text);
        debug!(%kind, lines = lines.len(), "normalized input");

        if lines.is_empty() {
            return shell(Banner::for_kind(kind, ctx), ctx, "");
        }
        render_page(kind, &lines, ctx)
    }

    fn finish(&self, html: String) -> String {
        if self.options.sanitize {
            sanitize(&html, &self.options.policy())
        } else {
            html
        }
    }
}

/// Format content with the default options
pub fn format_content(input: ContentInput, tag: &str, ctx: &TemplateContext) -> String {
    Formatter::new().format(input, tag, ctx)
}
