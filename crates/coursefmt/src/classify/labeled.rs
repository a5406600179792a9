//! Label-driven sections for discussions and assignments.
//!
//! A line that is a known label (optionally followed by `:` and inline
//! text) opens a section. Anything before the first label lands in a
//! synthetic leading section.

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use coursefmt_core::{markup, AnnotatedLine, Section};

use super::{heading_text, RuleTable};
use crate::normalize::compact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Overview,
    Prompt,
    Alignment,
    Objectives,
    Response,
    Instructions,
    Submission,
    Grading,
    Tip,
}

impl Label {
    /// Heading shown for a synthetic leading section
    pub fn default_heading(self) -> &'static str {
        match self {
            Label::Overview => "Overview",
            Label::Prompt => "Prompt",
            Label::Alignment => "Alignment to Objectives",
            Label::Objectives => "Objectives",
            Label::Response => "Response to Classmates",
            Label::Instructions => "Instructions",
            Label::Submission => "Submission",
            Label::Grading => "Grading Criteria",
            Label::Tip => "TIP",
        }
    }
}

pub type LabeledSection = Section<Label>;

/// `^LABEL` followed by nothing but punctuation, or by `:` and inline text
fn label_pattern(label: &str) -> String {
    format!(r"(?i)^(?:{label})\s*(?:[:\-–—]\s*(?P<rest>.*))?$")
}

fn discussion_table() -> RuleTable<Label> {
    RuleTable::new()
        .pattern("prompt", &label_pattern(r"(?:discussion\s+)?prompt"), Label::Prompt)
        .pattern(
            "alignment",
            &label_pattern(
                r"alignment(?:\s+to\s+(?:module\s+|course\s+)?objectives?)?|(?:this\s+(?:discussion|assignment)\s+)?aligns?\s+(?:to|with)\s+(?:module\s+|course\s+|the\s+following\s+)?(?:learning\s+)?objectives?",
            ),
            Label::Alignment,
        )
        .pattern(
            "objectives",
            &label_pattern(r"(?:module\s+|learning\s+|course\s+)?objectives?"),
            Label::Objectives,
        )
        .pattern(
            "response",
            &label_pattern(r"(?:responses?|replies|reply)\s+to\s+(?:your\s+)?(?:classmates|peers)|peer\s+responses?"),
            Label::Response,
        )
        .pattern("instructions", &label_pattern(r"instructions|directions"), Label::Instructions)
        .pattern(
            "grading",
            &label_pattern(r"grading(?:\s+criteria|\s+rubric)?|rubric|evaluation(?:\s+criteria)?|assessment\s+criteria"),
            Label::Grading,
        )
        .pattern("tip", &label_pattern(r"tip"), Label::Tip)
}

static DISCUSSION: Lazy<RuleTable<Label>> = Lazy::new(discussion_table);

static ASSIGNMENT: Lazy<RuleTable<Label>> = Lazy::new(|| {
    discussion_table().pattern(
        "submission",
        &label_pattern(r"submission(?:\s+(?:instructions|guidelines|requirements))?|deliverables?|what\s+to\s+submit"),
        Label::Submission,
    )
});

/// Which label vocabulary to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    Discussion,
    Assignment,
}

impl Vocabulary {
    fn table(self) -> &'static RuleTable<Label> {
        match self {
            Vocabulary::Discussion => &DISCUSSION,
            Vocabulary::Assignment => &ASSIGNMENT,
        }
    }

    fn leading(self) -> Label {
        match self {
            Vocabulary::Discussion => Label::Prompt,
            Vocabulary::Assignment => Label::Overview,
        }
    }
}

fn step(vocabulary: Vocabulary, mut sections: Vec<LabeledSection>, line: &AnnotatedLine) -> Vec<LabeledSection> {
    let table = vocabulary.table();

    if !line.is_bullet_marker {
        if let Some((name, label)) = table.classify(line) {
            let plain = markup::plain_text(&line.text);
            let rest = table
                .pattern_of(name)
                .and_then(|re| re.captures(&plain))
                .and_then(|caps| caps.name("rest"))
                .filter(|m| !m.as_str().trim().is_empty());
            let heading = match rest {
                Some(m) => heading_text(&plain[..m.start()]),
                None => heading_text(&plain),
            };
            trace!(rule = name, %heading, "section label");

            let mut section = Section::new(label, heading);
            if let Some(m) = rest {
                // Prefer the original text so inline emphasis survives
                let text = inline_rest(&line.text, &plain, m.start())
                    .unwrap_or_else(|| m.as_str().trim().to_string());
                section.lines.push(AnnotatedLine::new(line.indent, text, false));
            }
            sections.push(section);
            return sections;
        }
    }

    if sections.is_empty() {
        let leading = vocabulary.leading();
        sections.push(Section::new(leading, leading.default_heading()));
    }
    if let Some(section) = sections.last_mut() {
        section.lines.push(line.clone());
    }
    sections
}

/// The part of `text` from the plain-text offset `start` on, markers kept.
///
/// A marker run left open before `start` (as in `**Tip: text**`) is
/// dropped from the end of the result.
fn inline_rest(text: &str, plain: &str, start: usize) -> Option<String> {
    let stripped = text.replace('*', "");
    if stripped.trim() != plain {
        return None;
    }
    let target = stripped.len() - stripped.trim_start().len() + start;

    let mut seen = 0;
    let offset = text.char_indices().find_map(|(i, c)| {
        if seen == target {
            return Some(i);
        }
        if c != '*' {
            seen += c.len_utf8();
        }
        None
    })?;

    let runs: Vec<usize> = text[..offset]
        .split(|c: char| c != '*')
        .map(str::len)
        .filter(|len| *len > 0)
        .collect();
    let body = text[offset..].trim();
    let body = match runs.last() {
        Some(len) if runs.len() % 2 == 1 => {
            let close = "*".repeat(*len);
            body.strip_suffix(close.as_str()).unwrap_or(body).trim_end()
        }
        _ => body,
    };
    Some(body.to_string()).filter(|b| !b.is_empty())
}

/// Split lines into labeled sections
pub fn classify(lines: &[AnnotatedLine], vocabulary: Vocabulary) -> Vec<LabeledSection> {
    let sections = compact(lines)
        .iter()
        .fold(Vec::new(), |acc, line| step(vocabulary, acc, line));
    debug!(?vocabulary, sections = sections.len(), "classified labeled sections");
    sections
}

/// Rule names for a vocabulary, in evaluation order
pub fn rule_names(vocabulary: Vocabulary) -> Vec<&'static str> {
    vocabulary.table().names().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_lines;

    fn headings(sections: &[LabeledSection]) -> Vec<(Label, &str)> {
        sections.iter().map(|s| (s.kind, s.heading.as_str())).collect()
    }

    #[test]
    fn test_labels_start_sections() {
        let text = "Prompt:\nWhat is leadership?\nResponse to Classmates:\nReply to two peers.\n**Grading Criteria**\n- Depth";
        let sections = classify(&normalize_lines(text), Vocabulary::Discussion);
        assert_eq!(
            headings(&sections),
            vec![
                (Label::Prompt, "Prompt"),
                (Label::Response, "Response to Classmates"),
                (Label::Grading, "Grading Criteria"),
            ]
        );
        assert_eq!(sections[2].lines[0].text, "Depth");
        assert!(sections[2].lines[0].is_bullet_marker);
    }

    #[test]
    fn test_inline_text_after_label() {
        let sections = classify(&normalize_lines("Instructions: Post by Wednesday."), Vocabulary::Discussion);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Instructions");
        assert_eq!(sections[0].lines[0].text, "Post by Wednesday.");
    }

    #[test]
    fn test_dash_separated_label() {
        for input in ["Instructions – Post by Wednesday.", "Instructions - Post by Wednesday."] {
            let sections = classify(&normalize_lines(input), Vocabulary::Discussion);
            assert_eq!(headings(&sections), vec![(Label::Instructions, "Instructions")], "{input}");
            assert_eq!(sections[0].lines[0].text, "Post by Wednesday.");
        }
    }

    #[test]
    fn test_separator_before_colon_in_text() {
        let sections = classify(&normalize_lines("Prompt - see: the reading"), Vocabulary::Discussion);
        assert_eq!(sections[0].heading, "Prompt");
        assert_eq!(sections[0].lines[0].text, "see: the reading");
    }

    #[test]
    fn test_inline_text_keeps_emphasis() {
        let sections = classify(
            &normalize_lines("**Instructions:** Read *Dune* first"),
            Vocabulary::Discussion,
        );
        assert_eq!(sections[0].heading, "Instructions");
        assert_eq!(sections[0].lines[0].text, "Read *Dune* first");

        let sections = classify(&normalize_lines("**TIP: Be concise**"), Vocabulary::Discussion);
        assert_eq!(sections[0].heading, "TIP");
        assert_eq!(sections[0].lines[0].text, "Be concise");
    }

    #[test]
    fn test_unlabeled_leading_content() {
        let sections = classify(&normalize_lines("Think about a time...\nTIP: Be concise"), Vocabulary::Discussion);
        assert_eq!(
            headings(&sections),
            vec![(Label::Prompt, "Prompt"), (Label::Tip, "TIP")]
        );
        let sections = classify(&normalize_lines("Write a memo."), Vocabulary::Assignment);
        assert_eq!(headings(&sections), vec![(Label::Overview, "Overview")]);
    }

    #[test]
    fn test_sentence_starting_with_label_word() {
        let sections = classify(
            &normalize_lines("Objectives\nObjectives are listed in the syllabus."),
            Vocabulary::Discussion,
        );
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].lines.len(), 1);
    }

    #[test]
    fn test_alignment_language() {
        let sections = classify(
            &normalize_lines("This discussion aligns with the following objectives:\n- MO1"),
            Vocabulary::Discussion,
        );
        assert_eq!(sections[0].kind, Label::Alignment);
    }

    #[test]
    fn test_assignment_submission_label() {
        let sections = classify(&normalize_lines("Submission Guidelines\nUpload a PDF."), Vocabulary::Assignment);
        assert_eq!(sections[0].kind, Label::Submission);
        assert!(!rule_names(Vocabulary::Discussion).contains(&"submission"));
    }
}
