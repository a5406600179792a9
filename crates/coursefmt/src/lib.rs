//! # coursefmt
//!
//! Turn instructor-authored course text into institutional HTML pages.
//!
//! Text (typed, or pasted rich text serialized by `coursefmt-paste`) is
//! normalized into annotated lines, split into sections by a per-kind
//! classifier, rendered into the page shell for its document kind and
//! finally passed through an allow-list sanitizer.
//!
//! ```text
//! ContentInput ─▶ normalize ─▶ classify ─▶ render ─▶ shell ─▶ sanitize
//! ```
//!
//! ## Example
//!
//! ```rust
//! use coursefmt::{format_content, ContentInput, TemplateContext};
//!
//! let ctx = TemplateContext {
//!     course_name: Some("AI 701".to_string()),
//!     ..Default::default()
//! };
//! let html = format_content(
//!     ContentInput::Text("Discussions\nModule 1: Respond to the prompt.".to_string()),
//!     "assessment-overview",
//!     &ctx,
//! );
//! assert!(html.contains("<p class=\"WFU-SubpageHeader\">AI 701</p>"));
//! assert!(html.contains("<strong>Module 1</strong>: Respond to the prompt."));
//! assert!(html.contains("WFU-footer"));
//! ```

pub mod blocks;
pub mod classify;
pub mod links;
pub mod lists;
pub mod normalize;
pub mod render;
pub mod sanitize;
mod service;

pub use coursefmt_core::{AnnotatedLine, DocumentKind, Error, Result, Section, TemplateContext};
pub use lists::ListBuilder;
pub use normalize::{normalize_lines, normalize_text};
pub use render::{render_page, COPYRIGHT};
pub use sanitize::{sanitize, Policy};
pub use service::{format_content, ContentInput, FormatOptions, Formatter};
