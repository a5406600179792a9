//! Indent-aware list building.
//!
//! Bullet lines carry a raw leading-space count, not a depth. The builder
//! keeps a stack of [`IndentFrame`]s and derives nesting by comparing each
//! new indent against the top of the stack:
//!
//! ```text
//! indent  0 0 2 2 0
//! depth   1 1 2 2 1
//! ```
//!
//! Nested lists open inside the currently open item, so the output is
//! always well-formed once [`ListBuilder::finish`] has run.

use tracing::trace;

use coursefmt_core::IndentFrame;

/// Builder for one run of bullet lines
#[derive(Debug, Clone, Default)]
pub struct ListBuilder {
    frames: Vec<IndentFrame>,
    html: String,
    depths: Vec<usize>,
}

impl ListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a list is currently open
    pub fn is_open(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Depth of every item added so far, in order
    pub fn depths(&self) -> &[usize] {
        &self.depths
    }

    /// Indent of the outermost open list
    pub fn root_indent(&self) -> Option<usize> {
        self.frames.first().map(|f| f.open_indent)
    }

    /// Add an item whose depth follows from its indentation
    pub fn item(mut self, indent: usize, content: &str) -> Self {
        self.place(indent);
        self.open_item(content);
        self
    }

    /// Add an item that may nest deeper but never closes an open level
    pub fn pinned(mut self, indent: usize, content: &str) -> Self {
        let current = self.frames.last().map_or(indent, |f| f.open_indent);
        self.place(indent.max(current));
        self.open_item(content);
        self
    }

    /// Close every open level and return the markup
    pub fn finish(mut self) -> String {
        while !self.frames.is_empty() {
            self.close_level();
        }
        self.html
    }

    fn place(&mut self, indent: usize) {
        let Some(top) = self.frames.last().map(|f| f.open_indent) else {
            self.html.push_str("<ul>");
            self.frames.push(IndentFrame::new(indent));
            return;
        };

        if indent > top {
            // Nested list goes inside the open item
            self.html.push_str("<ul>");
            self.frames.push(IndentFrame::new(indent));
            return;
        }

        while self.frames.len() > 1 && self.frames.last().is_some_and(|f| f.open_indent > indent) {
            self.close_level();
        }
        if let Some(frame) = self.frames.last_mut() {
            if frame.open_indent > indent {
                frame.open_indent = indent;
            }
        }
        self.close_item();
    }

    fn open_item(&mut self, content: &str) {
        self.html.push_str("<li>");
        self.html.push_str(content);
        if let Some(frame) = self.frames.last_mut() {
            frame.item_open = true;
        }
        self.depths.push(self.frames.len());
        trace!(depth = self.frames.len(), "list item");
    }

    fn close_item(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            if frame.item_open {
                self.html.push_str("</li>");
                frame.item_open = false;
            }
        }
    }

    fn close_level(&mut self) {
        self.close_item();
        self.frames.pop();
        self.html.push_str("</ul>");
    }
}
