//! Section classifiers, one per document kind.
//!
//! Every classifier pairs an ordered [`RuleTable`] (first match wins) with
//! a small state machine folded over the normalized lines.

pub mod assessment;
pub mod labeled;
pub mod materials;

use indexmap::IndexMap;
use regex::Regex;

use coursefmt_core::{markup, AnnotatedLine};

/// How a rule recognizes a line
pub enum Matcher {
    /// Regex over the line's plain text (emphasis markers removed)
    Pattern(Regex),
    /// Predicate over the whole annotated line
    Predicate(fn(&AnnotatedLine) -> bool),
}

impl Matcher {
    fn matches(&self, line: &AnnotatedLine, plain: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(plain),
            Matcher::Predicate(f) => f(line),
        }
    }
}

/// An ordered table of named rules mapping lines to categories
pub struct RuleTable<C> {
    rules: IndexMap<&'static str, (Matcher, C)>,
}

impl<C: Copy> RuleTable<C> {
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Append a regex rule; panics on an invalid pattern
    pub fn pattern(mut self, name: &'static str, pattern: &str, category: C) -> Self {
        let re = Regex::new(pattern).expect("valid classifier pattern");
        self.rules.insert(name, (Matcher::Pattern(re), category));
        self
    }

    /// Append a predicate rule
    pub fn predicate(mut self, name: &'static str, f: fn(&AnnotatedLine) -> bool, category: C) -> Self {
        self.rules.insert(name, (Matcher::Predicate(f), category));
        self
    }

    /// First matching rule, by name and category
    pub fn classify(&self, line: &AnnotatedLine) -> Option<(&'static str, C)> {
        let plain = markup::plain_text(&line.text);
        self.rules
            .iter()
            .find(|(_, (matcher, _))| matcher.matches(line, &plain))
            .map(|(name, (_, category))| (*name, *category))
    }

    /// Rule names in evaluation order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    /// Regex of a pattern rule, for extracting captures after a match
    pub fn pattern_of(&self, name: &str) -> Option<&Regex> {
        match self.rules.get(name) {
            Some((Matcher::Pattern(re), _)) => Some(re),
            _ => None,
        }
    }
}

impl<C: Copy> Default for RuleTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a trailing `:` / `-` / `–` and surrounding whitespace from a heading
pub(crate) fn heading_text(plain: &str) -> String {
    plain
        .trim()
        .trim_end_matches([':', '-', '–', '—'])
        .trim()
        .to_string()
}
