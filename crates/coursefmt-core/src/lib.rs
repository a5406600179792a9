//! coursefmt-core - shared data model for the course content pipeline
//!
//! This crate holds the types every stage agrees on. It is used by
//! `coursefmt-paste` (clipboard element trees to annotated text) and by
//! `coursefmt` (annotated text to institutional HTML).
//!
//! # Architecture
//!
//! ```text
//! Clipboard HTML ──serialize──▶ ┌────────────────┐
//!                               │                │
//!                               │ Annotated text │ ──▶ Sections ──▶ HTML shell
//! Plain text ──────────────────▶│                │
//!                               └────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use coursefmt_core::{markup, AnnotatedLine};
//!
//! let line = AnnotatedLine::parse("  - **Read** chapter 2");
//! assert_eq!(line.indent, 2);
//! assert!(line.is_bullet_marker);
//! assert_eq!(markup::inline(&line.text), "<strong>Read</strong> chapter 2");
//! ```

mod context;
mod kind;
pub mod markup;
mod model;
mod options;

pub use context::{TemplateContext, PLACEHOLDER_COURSE_NAME, PLACEHOLDER_TITLE};
pub use kind::DocumentKind;
pub use model::{AnnotatedLine, IndentFrame, Section};
pub use options::{PasteOptions, StyleMarkers};

/// Error type for the few fallible edges of the pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown document kind: {0}")]
    UnknownDocumentKind(String),

    #[error("Invalid template context: {0}")]
    InvalidContext(String),
}

pub type Result<T> = std::result::Result<T, Error>;
