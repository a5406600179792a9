//! PasteSerializer - the main entry point for element tree to annotated text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use coursefmt_core::{PasteOptions, StyleMarkers};

use crate::node::{Node, NodeType};
use crate::rules::{Filter, Rule, Rules};
use crate::utilities::{collapse_whitespace, is_block, is_bold, is_italic, is_list, is_structural_container};

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {3,}").expect("valid regex"));

static BOLD_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:\*\*([^*]+)\*\*|\*([^*]+)\*|<strong>([^<]+)</strong>|<em>([^<]+)</em>):$")
        .expect("valid regex")
});

/// Where the walk currently is, as seen by a rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkContext {
    /// Number of enclosing `ul`/`ol` elements
    pub list_depth: usize,
    /// An ancestor already renders bold
    pub in_bold: bool,
    /// An ancestor already renders italic
    pub in_italic: bool,
}

impl WalkContext {
    /// Context for the children of `node`
    pub fn enter(&self, node: &Node) -> Self {
        let tag = node.tag_name();
        Self {
            list_depth: self.list_depth + usize::from(is_list(&tag)),
            // A list item marks its own line, not its nested list
            in_bold: self.in_bold || (is_bold(node) && tag != "li"),
            in_italic: self.in_italic || (is_italic(node) && tag != "li"),
        }
    }
}

/// The serializer turning pasted element trees into annotated text
pub struct PasteSerializer {
    options: PasteOptions,
    rules: Rules,
}

impl PasteSerializer {
    /// Create a serializer with asterisk markers
    pub fn new() -> Self {
        Self::with_options(PasteOptions::default())
    }

    /// Create a serializer with custom options
    pub fn with_options(options: PasteOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Create a serializer with the given marker strategy
    pub fn with_markers(markers: StyleMarkers) -> Self {
        Self::with_options(PasteOptions {
            markers,
            ..PasteOptions::default()
        })
    }

    /// Serialize a node tree to annotated text
    pub fn serialize(&self, root: &Node) -> String {
        let raw = self.process_node(root, &WalkContext::default());
        let text = post_process(&raw);
        debug!(
            raw_len = raw.len(),
            lines = text.lines().count(),
            "serialized element tree"
        );
        text
    }

    /// Parse an HTML fragment and serialize it
    #[cfg(feature = "html")]
    pub fn serialize_html(&self, html: &str) -> String {
        self.serialize(&crate::html::parse_html(html))
    }

    /// Add a custom rule, consulted before the built-in rules
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Drop elements matching the filter together with their content
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    fn process_node(&self, node: &Node, ctx: &WalkContext) -> String {
        match node.node_type {
            NodeType::Text => collapse_whitespace(node.node_value.as_deref().unwrap_or_default()),
            NodeType::Comment => String::new(),
            NodeType::DocumentFragment => self.process_children(node, ctx),
            NodeType::Element => self.process_element(node, ctx),
        }
    }

    fn process_element(&self, node: &Node, ctx: &WalkContext) -> String {
        if self.rules.should_remove(node) {
            trace!(tag = %node.tag_name(), "removed element");
            return String::new();
        }

        let content = self.process_children(node, &ctx.enter(node));

        match self.rules.for_node(node) {
            Some(rule) => rule.replace(node, &content, ctx, &self.options),
            None => content,
        }
    }

    fn process_children(&self, node: &Node, ctx: &WalkContext) -> String {
        let structural = is_structural_container(&node.tag_name());
        let children: Vec<&Node> = node.children().collect();
        let mut result = String::new();

        for (i, child) in children.iter().enumerate() {
            match child.node_type {
                NodeType::Text => {
                    let text = self.process_node(child, ctx);
                    if text.trim().is_empty() {
                        let beside_block = i
                            .checked_sub(1)
                            .and_then(|p| children.get(p))
                            .is_some_and(|n| breaks_line(n))
                            || children.get(i + 1).is_some_and(|n| breaks_line(n));
                        if structural || beside_block || result.ends_with('\n') {
                            continue;
                        }
                    }
                    if result.ends_with('\n') {
                        result.push_str(text.trim_start_matches(' '));
                    } else {
                        result.push_str(&text);
                    }
                }
                NodeType::Element => {
                    let out = self.process_node(child, ctx);
                    if breaks_line(child) {
                        // Exactly one newline between a block and what precedes it
                        if !result.is_empty() && !result.ends_with('\n') {
                            result.push('\n');
                        }
                        result.push_str(out.trim_start_matches('\n'));
                    } else {
                        result.push_str(&out);
                    }
                }
                _ => {}
            }
        }

        result
    }
}

impl Default for PasteSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Elements whose output always starts on a fresh line
fn breaks_line(node: &Node) -> bool {
    let tag = node.tag_name();
    node.is_element() && (is_block(&tag) || is_list(&tag) || tag == "li")
}

/// Clean up the concatenated output of the walk
fn post_process(output: &str) -> String {
    let text: String = output
        .chars()
        .map(|c| match c {
            '\u{a0}' | '\u{202f}' | '\u{2007}' => ' ',
            other => other,
        })
        .collect();

    let lines: Vec<String> = text.split('\n').map(clean_line).collect();
    let joined = lines.join("\n");

    BLANK_RUN_RE
        .replace_all(&joined, "\n\n")
        .trim_matches('\n')
        .to_string()
}

fn clean_line(line: &str) -> String {
    let line = line.trim_end();
    let body = line.trim_start_matches(' ');
    let indent = &line[..line.len() - body.len()];
    let body = SPACE_RUN_RE.replace_all(body, " ");
    let line = format!("{indent}{body}");

    match BOLD_LABEL_RE.captures(&line) {
        Some(caps) => {
            let label = (2..=5).find_map(|i| caps.get(i)).map(|m| m.as_str()).unwrap_or_default();
            format!("{}{}:", &caps[1], label.trim())
        }
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paste(html: &str) -> String {
        PasteSerializer::new().serialize_html(html)
    }

    #[test]
    fn test_simple_paragraphs() {
        assert_eq!(paste("<p>Hello World</p><p>Second</p>"), "Hello World\nSecond");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(paste("<p>Read <b>chapter 2</b> and <i>skim</i> 3</p>"), "Read **chapter 2** and *skim* 3");
    }

    #[test]
    fn test_markup_markers() {
        let serializer = PasteSerializer::with_markers(StyleMarkers::Markup);
        assert_eq!(
            serializer.serialize_html("<p><strong>Due</strong> Friday</p>"),
            "<strong>Due</strong> Friday"
        );
    }

    #[test]
    fn test_empty_bold_has_no_markers() {
        assert_eq!(paste("<p>A<b></b>B</p>"), "AB");
        assert_eq!(paste("<p>A<b> </b>B</p>"), "A B");
        assert!(!paste("<p><b><span></span></b>x</p>").contains('*'));
    }

    #[test]
    fn test_nested_bold_not_rewrapped() {
        assert_eq!(paste("<b>outer <strong>inner</strong></b>"), "**outer inner**");
    }

    #[test]
    fn test_bold_inside_italic() {
        assert_eq!(paste("<p><em>Read <strong>this</strong> now</em></p>"), "*Read **this** now*");
        assert_eq!(paste("<p><b>Read <i>this</i> now</b></p>"), "**Read *this* now**");
    }

    #[test]
    fn test_bold_italic_element() {
        assert_eq!(
            paste(r#"<p><span style="font-weight:700;font-style:italic">Note</span></p>"#),
            "***Note***"
        );
    }

    #[test]
    fn test_bold_block_styles_its_line() {
        assert_eq!(paste(r#"<p style="font-weight:bold">Week 1</p><p>x</p>"#), "**Week 1**\nx");
        assert_eq!(
            paste(r#"<div style="font-weight:700"><p>A</p><p><b>B</b></p></div>"#),
            "**A**\n**B**"
        );
    }

    #[test]
    fn test_bold_list_item_keeps_bullet_outside() {
        let html = r#"<ul><li style="font-weight:bold">Top<ul><li>Sub</li></ul></li></ul>"#;
        assert_eq!(paste(html), "- **Top**\n  - Sub");
        let html = r#"<div style="font-weight:bold"><ul><li>One</li></ul></div>"#;
        assert_eq!(paste(html), "- **One**");
    }

    #[test]
    fn test_bold_whitespace_outside_markers() {
        assert_eq!(paste("<p><b>Title </b>rest</p>"), "**Title** rest");
    }

    #[test]
    fn test_google_docs_wrapper() {
        let html = r#"<meta charset="utf-8"><b style="font-weight:normal;" id="docs-internal-guid-abc"><p dir="ltr"><span style="font-weight:700">Week 1</span><span style="font-weight:400"> overview</span></p></b>"#;
        assert_eq!(paste(html), "**Week 1** overview");
    }

    #[test]
    fn test_anchor_label_and_href() {
        assert_eq!(
            paste(r#"<p><a href="https://example.com/a">Guide</a></p>"#),
            "Guide https://example.com/a"
        );
        assert_eq!(
            paste(r#"<p><a href="https://example.com/a">https://example.com/a</a></p>"#),
            "https://example.com/a"
        );
        assert_eq!(paste(r##"<p><a href="#top">Back</a></p>"##), "Back");
    }

    #[test]
    fn test_bold_link_keeps_url_plain() {
        assert_eq!(
            paste(r#"<p><b><a href="https://x.org/r">Reading</a></b></p>"#),
            "**Reading** https://x.org/r"
        );
    }

    #[test]
    fn test_simple_list() {
        assert_eq!(
            paste("<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>"),
            "- One\n- Two"
        );
    }

    #[test]
    fn test_nested_list() {
        let html = "<ul><li>One<ul><li>Sub a</li><li>Sub b</li></ul></li><li>Two</li></ul>";
        assert_eq!(paste(html), "- One\n  - Sub a\n  - Sub b\n- Two");
    }

    #[test]
    fn test_manual_sub_bullets_inside_item() {
        let html = "<ul><li>Main point<br>- first detail<br>- second detail</li></ul>";
        assert_eq!(paste(html), "- Main point\n  - first detail\n  - second detail");
    }

    #[test]
    fn test_continuation_line_joins_item() {
        let html = "<ul><li><p>Main</p><p>continued here</p></li></ul>";
        assert_eq!(paste(html), "- Main continued here");
    }

    #[test]
    fn test_text_around_list() {
        assert_eq!(
            paste("<div>Intro<ul><li>Item</li></ul>Outro</div>"),
            "Intro\n- Item\nOutro"
        );
    }

    #[test]
    fn test_word_list_paragraphs() {
        let html = concat!(
            r#"<p class="MsoListParagraph" style="mso-list:l0 level1 lfo1">"#,
            r#"<span style="mso-list:Ignore">·<span>&nbsp;&nbsp;</span></span>Top</p>"#,
            r#"<p class="MsoListParagraph" style="mso-list:l0 level2 lfo1">"#,
            r#"<span style="mso-list:Ignore">o<span>&nbsp;</span></span>Nested</p>"#,
        );
        assert_eq!(paste(html), "- Top\n  - Nested");
    }

    #[test]
    fn test_discarded_elements() {
        assert_eq!(
            paste("<style>p { color: red }</style><p>Kept</p><script>alert(1)</script>"),
            "Kept"
        );
    }

    #[test]
    fn test_post_process_spacing() {
        assert_eq!(
            post_process("  indented    text\u{a0}here  \n\n\n\nnext"),
            "  indented text here\n\nnext"
        );
    }

    #[test]
    fn test_post_process_unbolds_label_lines() {
        assert_eq!(post_process("**Instructions**:"), "Instructions:");
        assert_eq!(post_process("<strong>Prompt</strong>:"), "Prompt:");
        assert_eq!(post_process("**Due**: Friday"), "**Due**: Friday");
    }

    #[test]
    fn test_custom_rule_wins() {
        let mut serializer = PasteSerializer::new();
        serializer.add_rule(
            "highlight",
            Rule::new(Filter::tag("mark"), |_, content, _, _| format!("=={content}==")),
        );
        assert_eq!(serializer.serialize_html("<p><mark>key</mark> idea</p>"), "==key== idea");
    }

    #[test]
    fn test_serialize_built_tree() {
        let tree = Node::element("p")
            .with_child(Node::text("Plain "))
            .with_child(Node::element("em").with_child(Node::text("tree")));
        assert_eq!(PasteSerializer::new().serialize(&tree), "Plain *tree*");
    }
}
