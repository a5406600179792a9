//! Discussion and assignment bodies.

use coursefmt_core::AnnotatedLine;

use crate::blocks::render_blocks;
use crate::classify::labeled::{classify, Label, LabeledSection, Vocabulary};

fn render_sections(sections: &[LabeledSection]) -> String {
    sections
        .iter()
        .map(|section| {
            let body = render_blocks(&section.lines);
            match section.kind {
                Label::Tip => format!("<blockquote><p><strong>{}:</strong></p>{body}</blockquote>", section.heading),
                _ => format!("<h3>{}</h3>{body}", section.heading),
            }
        })
        .collect()
}

pub fn render_discussion(lines: &[AnnotatedLine]) -> String {
    render_sections(&classify(lines, Vocabulary::Discussion))
}

pub fn render_assignment(lines: &[AnnotatedLine]) -> String {
    render_sections(&classify(lines, Vocabulary::Assignment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_lines;

    #[test]
    fn test_discussion_sections() {
        let html = render_discussion(&normalize_lines(
            "Reflect on *leadership*.\nInstructions:\n- Post by Wednesday\n  - 250 words\n- Reply by Sunday",
        ));
        assert_eq!(
            html,
            concat!(
                "<h3>Prompt</h3><p>Reflect on <em>leadership</em>.</p>",
                "<h3>Instructions</h3><ul><li>Post by Wednesday<ul><li>250 words</li></ul></li>",
                "<li>Reply by Sunday</li></ul>"
            )
        );
    }

    #[test]
    fn test_tip_is_highlighted() {
        let html = render_discussion(&normalize_lines("TIP: Cite your sources"));
        assert_eq!(
            html,
            "<blockquote><p><strong>TIP:</strong></p><p>Cite your sources</p></blockquote>"
        );
    }

    #[test]
    fn test_assignment_overview_section() {
        let html = render_assignment(&normalize_lines("Draft a policy memo."));
        assert_eq!(html, "<h3>Overview</h3><p>Draft a policy memo.</p>");
    }
}
