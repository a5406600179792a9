//! Annotated text and section model
//!
//! This module defines the intermediate structures shared by the
//! serializer, the classifiers and the renderers.

/// Bullet markers recognized at the start of a line.
///
/// `*` only counts when it is not the start of a `**bold**` marker.
const BULLET_MARKERS: &[char] = &['-', '*', '•', '◦', '▪', '·', '–'];

/// One line of annotated text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotatedLine {
    /// Count of leading space characters (a tab counts as two)
    pub indent: usize,

    /// Line content, trimmed, with any bullet marker removed
    pub text: String,

    /// Whether the line started with a bullet marker
    pub is_bullet_marker: bool,
}

impl AnnotatedLine {
    /// Create a line directly from its parts
    pub fn new(indent: usize, text: impl Into<String>, is_bullet_marker: bool) -> Self {
        Self {
            indent,
            text: text.into(),
            is_bullet_marker,
        }
    }

    /// Split a raw line into indentation, bullet marker and text
    pub fn parse(raw: &str) -> Self {
        let mut indent = 0;
        for c in raw.chars() {
            match c {
                ' ' => indent += 1,
                '\t' => indent += 2,
                _ => break,
            }
        }

        let trimmed = raw.trim();
        let (text, is_bullet_marker) = match strip_bullet(trimmed) {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };

        Self {
            indent,
            text: text.to_string(),
            is_bullet_marker,
        }
    }

    /// Check if this line carries no text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn strip_bullet(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let marker = chars.next()?;
    if !BULLET_MARKERS.contains(&marker) {
        return None;
    }
    let rest = chars.as_str();
    if marker == '*' && rest.starts_with('*') {
        return None;
    }
    // A marker must be followed by whitespace: "-5 points" is not a bullet
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

/// A contiguous, classified run of lines
#[derive(Debug, Clone, PartialEq)]
pub struct Section<K, E = AnnotatedLine> {
    /// Document-kind-specific category
    pub kind: K,
    /// Heading text as it appeared in the input (may be empty)
    pub heading: String,
    /// Entries in input order
    pub lines: Vec<E>,
}

impl<K, E> Section<K, E> {
    pub fn new(kind: K, heading: impl Into<String>) -> Self {
        Self {
            kind,
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One open list level while building nested lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentFrame {
    /// Leading-space count that opened this level
    pub open_indent: usize,
    /// Whether an `<li>` at this level is still waiting for its close tag
    pub item_open: bool,
}

impl IndentFrame {
    pub fn new(open_indent: usize) -> Self {
        Self {
            open_indent,
            item_open: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_line() {
        let line = AnnotatedLine::parse("Readings:");
        assert_eq!(line, AnnotatedLine::new(0, "Readings:", false));
    }

    #[test]
    fn test_parse_indented_bullet() {
        let line = AnnotatedLine::parse("    - Chapter 3");
        assert_eq!(line.indent, 4);
        assert!(line.is_bullet_marker);
        assert_eq!(line.text, "Chapter 3");
    }

    #[test]
    fn test_tab_counts_two_spaces() {
        let line = AnnotatedLine::parse("\t• Item");
        assert_eq!(line.indent, 2);
        assert!(line.is_bullet_marker);
    }

    #[test]
    fn test_bold_is_not_a_bullet() {
        let line = AnnotatedLine::parse("**Prompt**");
        assert!(!line.is_bullet_marker);
        assert_eq!(line.text, "**Prompt**");
    }

    #[test]
    fn test_negative_number_is_not_a_bullet() {
        let line = AnnotatedLine::parse("-5 points for late work");
        assert!(!line.is_bullet_marker);
    }

    #[test]
    fn test_section_collects_lines() {
        let mut section: Section<u8> = Section::new(1, "Discussions");
        assert!(section.is_empty());
        section.lines.push(AnnotatedLine::parse("Module 1"));
        assert_eq!(section.lines.len(), 1);
    }
}
