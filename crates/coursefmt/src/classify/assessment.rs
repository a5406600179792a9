//! Assessment overview: category headings followed by module, points,
//! rubric and description lines.

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use coursefmt_core::{markup, AnnotatedLine, Section};

use super::{heading_text, RuleTable};
use crate::blocks;
use crate::normalize::compact;

/// Assessment category introduced by a heading line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Discussions,
    Assignments,
    Quizzes,
    Projects,
    Reflections,
}

/// Role of a line inside a category section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    ModuleLine,
    PointsLine,
    RubricLine,
    Description,
}

/// One classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: LineKind,
    pub text: String,
}

pub type AssessmentSection = Section<Category, Entry>;

static HEADINGS: Lazy<RuleTable<Category>> = Lazy::new(|| {
    const TAIL: &str = r"\s*[:\-–—]?\s*$";
    RuleTable::new()
        .pattern("discussions", &format!(r"(?i)^discussions?{TAIL}"), Category::Discussions)
        .pattern("assignments", &format!(r"(?i)^assignments?{TAIL}"), Category::Assignments)
        .pattern("quizzes", &format!(r"(?i)^quiz(?:zes)?{TAIL}"), Category::Quizzes)
        .pattern("projects", &format!(r"(?i)^projects?{TAIL}"), Category::Projects)
        .pattern("reflections", &format!(r"(?i)^reflections?{TAIL}"), Category::Reflections)
});

static LINES: Lazy<RuleTable<LineKind>> = Lazy::new(|| {
    RuleTable::new()
        .pattern("module", r"(?i)^module\s+\d+\b", LineKind::ModuleLine)
        .predicate("points", is_points_line, LineKind::PointsLine)
        .pattern("rubric", r"(?i)rubric", LineKind::RubricLine)
});

fn is_points_line(line: &AnnotatedLine) -> bool {
    static POINTS_RE: Lazy<regex::Regex> =
        Lazy::new(|| regex::Regex::new(r"(?i)\bpoints?\b").expect("valid regex"));
    line.text.chars().any(|c| c.is_ascii_digit()) && POINTS_RE.is_match(&line.text)
}

/// Classifier state between lines
#[derive(Debug, Default)]
struct State {
    sections: Vec<AssessmentSection>,
    skipped: usize,
}

fn step(mut state: State, line: &AnnotatedLine) -> State {
    if let Some((_, category)) = HEADINGS.classify(line) {
        let heading = heading_text(&markup::plain_text(&line.text));
        trace!(%heading, "category heading");
        state.sections.push(Section::new(category, heading));
        return state;
    }

    let Some(section) = state.sections.last_mut() else {
        state.skipped += 1;
        return state;
    };

    let kind = LINES
        .classify(line)
        .map_or(LineKind::Description, |(_, kind)| kind);
    trace!(?kind, text = %line.text, "assessment line");

    section.lines.push(Entry { kind, text: line.text.clone() });
    state
}

/// Split normalized lines into category sections.
///
/// Lines before the first category heading have nowhere to go and are
/// dropped.
pub fn classify(lines: &[AnnotatedLine]) -> Vec<AssessmentSection> {
    let state = compact(lines).iter().fold(State::default(), step);

    if state.skipped > 0 {
        debug!(skipped = state.skipped, "dropped lines before first category heading");
    }
    debug!(sections = state.sections.len(), "classified assessment overview");
    state.sections
}

/// `"Module 1: Read *Dune*"` as `"<strong>Module 1</strong>: Read <em>Dune</em>"`.
///
/// Emphasis markers around the `Module N` token are replaced by the
/// `<strong>`; the rest of the line keeps its inline markup.
pub fn bold_module_token(text: &str) -> String {
    static MODULE_RE: Lazy<regex::Regex> = Lazy::new(|| {
        regex::Regex::new(r"(?i)^(?P<open>\**)\s*(?P<token>module\s+\d+)(?P<sep>\s*[:.\-–—]?)(?P<close>\**)(?P<rest>.*)$")
            .expect("valid regex")
    });

    let Some(caps) = MODULE_RE.captures(text) else {
        return blocks::inline(text);
    };
    let unclosed = caps["open"].len().saturating_sub(caps["close"].len());
    let rest = &caps["rest"];
    let rest = match unclosed {
        0 => rest,
        n => rest.strip_suffix("*".repeat(n).as_str()).unwrap_or(rest),
    };
    format!("<strong>{}</strong>{}{}", &caps["token"], &caps["sep"], blocks::inline(rest))
}

/// Rule names of the heading and line tables, in evaluation order
pub fn rule_names() -> Vec<&'static str> {
    HEADINGS.names().chain(LINES.names()).collect()
}
