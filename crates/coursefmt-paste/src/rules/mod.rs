//! Rule system for element-tree serialization.

mod annotated;
mod rule;

pub use annotated::{annotated_rules, default_remove_filters};
pub use rule::{Filter, Rule};

use indexmap::IndexMap;

use crate::node::Node;

/// Collection of rules for serialization
pub struct Rules {
    /// Custom rules added by the user (checked first, in insertion order)
    custom_rules: IndexMap<String, Rule>,
    /// Remove rules (drop element and content)
    remove_rules: Vec<Filter>,
    /// Built-in annotated-text rules
    builtin_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            remove_rules: default_remove_filters(),
            builtin_rules: annotated_rules(),
        }
    }

    /// Add a custom rule; re-adding a key replaces the rule in place
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Add a remove filter
    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// Find the first rule matching a node
    pub fn for_node(&self, node: &Node) -> Option<&Rule> {
        let tag = node.tag_name();

        self.custom_rules
            .values()
            .chain(self.builtin_rules.iter())
            .find(|rule| rule.filter.matches(&tag, node))
    }

    /// Check if a node should be dropped with its content
    pub fn should_remove(&self, node: &Node) -> bool {
        let tag = node.tag_name();

        // A custom rule always wins over removal
        if self
            .custom_rules
            .values()
            .any(|rule| rule.filter.matches(&tag, node))
        {
            return false;
        }

        self.remove_rules
            .iter()
            .any(|filter| filter.matches(&tag, node))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
