//! Configuration options for element-tree serialization

/// How inline bold/italic is written into annotated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleMarkers {
    /// Markdown-style asterisks: `**bold**`, `*italic*`
    #[default]
    Asterisk,
    /// HTML markup: `<strong>bold</strong>`, `<em>italic</em>`
    Markup,
}

impl StyleMarkers {
    /// Opening and closing bold markers
    pub fn bold(self) -> (&'static str, &'static str) {
        match self {
            StyleMarkers::Asterisk => ("**", "**"),
            StyleMarkers::Markup => ("<strong>", "</strong>"),
        }
    }

    /// Opening and closing italic markers
    pub fn italic(self) -> (&'static str, &'static str) {
        match self {
            StyleMarkers::Asterisk => ("*", "*"),
            StyleMarkers::Markup => ("<em>", "</em>"),
        }
    }
}

/// Options for the element-tree serializer
#[derive(Debug, Clone)]
pub struct PasteOptions {
    /// Inline style marker strategy
    pub markers: StyleMarkers,

    /// Prefix written before each list item (after indentation)
    pub bullet: String,

    /// Spaces added per nesting level
    pub indent_width: usize,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self {
            markers: StyleMarkers::Asterisk,
            bullet: "- ".to_string(),
            indent_width: 2,
        }
    }
}
