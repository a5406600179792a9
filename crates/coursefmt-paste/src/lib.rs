//! # coursefmt-paste
//!
//! Convert pasted rich-text element trees to annotated plain text.
//!
//! Clipboard payloads from word processors and web pages arrive as HTML.
//! This crate walks the element tree and writes the canonical annotated
//! text the formatter consumes: emphasis as textual markers, links as
//! `label url` pairs and list nesting as leading-space indentation.
//!
//! ## Design
//!
//! The serializer accepts a generic [`Node`] tree rather than a parser's
//! own DOM type, so any parser can feed it:
//!
//! - **One walk, many outputs**: the [`StyleMarkers`] strategy picks asterisk
//!   or markup emphasis without a second serializer
//! - **Ordered rules**: custom rules are consulted first, by name, then the
//!   built-in ones
//! - **Optional parser**: the `html` feature adds [`parse_html`] on top of
//!   `scraper`
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use coursefmt_paste::{Node, PasteSerializer};
//!
//! let mut p = Node::element("p");
//! p.add_child(Node::text("Due "));
//! p.add_child(Node::element("strong").with_child(Node::text("Friday")));
//!
//! let text = PasteSerializer::new().serialize(&p);
//! assert_eq!(text, "Due **Friday**");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use coursefmt_paste::{PasteSerializer, StyleMarkers};
//!
//! let serializer = PasteSerializer::with_markers(StyleMarkers::Markup);
//! let text = serializer.serialize_html("<ul><li><b>Read</b> chapter 2</li></ul>");
//! assert_eq!(text, "- <strong>Read</strong> chapter 2");
//! ```

#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod service;
mod utilities;

pub use coursefmt_core::{PasteOptions, StyleMarkers};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use rules::{Filter, Rule, Rules};
pub use service::{PasteSerializer, WalkContext};
pub use utilities::{collapse_whitespace, is_block, is_bold, is_italic};

/// Serialize an HTML clipboard payload with the default options
#[cfg(feature = "html")]
pub fn paste_to_text(html: &str) -> String {
    PasteSerializer::new().serialize_html(html)
}
