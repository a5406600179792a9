//! Allow-list sanitization of assembled HTML.
//!
//! The fragment is parsed with `scraper` and written back out keeping only
//! allowed elements and attributes. Disallowed elements are unwrapped
//! (their children survive); script-like elements vanish with their
//! content. Sanitization never fails and is idempotent.

use scraper::{ElementRef, Html, Node};
use tracing::trace;

use coursefmt_core::markup::{escape_attr, escape_text};

const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "div", "span", "b", "strong", "i", "em", "u",
    "s", "strike", "ul", "ol", "li", "a", "img", "table", "thead", "tbody", "tfoot", "tr", "th",
    "td", "caption", "colgroup", "col", "blockquote", "code", "pre", "footer",
];

/// Attribute allow-list, also the order attributes are written in
const ALLOWED_ATTRS: &[&str] = &[
    "href", "src", "alt", "title", "target", "rel", "class", "id", "style",
];

const EMBED_ATTRS: &[&str] = &["width", "height", "frameborder", "allow", "allowfullscreen"];

/// Elements dropped together with everything inside them
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "svg", "math", "object", "embed", "noscript", "template", "textarea",
    "xmp", "plaintext", "noembed", "noframes", "select", "head", "title", "meta", "link", "base",
];

const VOID_TAGS: &[&str] = &["br", "img", "col", "hr", "wbr"];

const URL_ATTRS: &[&str] = &["href", "src"];

const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Which elements and attributes survive sanitization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policy {
    /// Keep `iframe` video embeds
    pub allow_embeds: bool,
}

impl Policy {
    /// The plain allow-list
    pub fn strict() -> Self {
        Self { allow_embeds: false }
    }

    /// The allow-list plus `iframe` embeds
    pub fn with_embeds() -> Self {
        Self { allow_embeds: true }
    }

    fn allows_tag(&self, tag: &str) -> bool {
        ALLOWED_TAGS.contains(&tag) || (self.allow_embeds && tag == "iframe")
    }

    fn drops_tag(&self, tag: &str) -> bool {
        DROPPED_TAGS.contains(&tag) || (!self.allow_embeds && tag == "iframe")
    }

    fn attrs_for(&self, tag: &str) -> impl Iterator<Item = &'static str> {
        let embeds: &'static [&'static str] = if self.allow_embeds && tag == "iframe" {
            EMBED_ATTRS
        } else {
            &[]
        };
        ALLOWED_ATTRS.iter().chain(embeds.iter()).copied()
    }
}

/// Sanitize an HTML fragment against a policy
pub fn sanitize(html: &str, policy: &Policy) -> String {
    let document = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(document.root_element(), policy, &mut out);
    out
}

fn write_children(element: ElementRef, policy: &Policy, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_text(&text.text)),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    write_element(child_element, policy, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef, policy: &Policy, out: &mut String) {
    let tag = element.value().name().to_ascii_lowercase();

    if policy.drops_tag(&tag) {
        trace!(%tag, "dropped element");
        return;
    }
    if !policy.allows_tag(&tag) {
        write_children(element, policy, out);
        return;
    }

    out.push('<');
    out.push_str(&tag);
    for name in policy.attrs_for(&tag) {
        let Some(value) = element.value().attr(name) else {
            continue;
        };
        if URL_ATTRS.contains(&name) && has_blocked_scheme(value) {
            trace!(%tag, attr = name, "dropped unsafe url");
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&tag.as_str()) {
        return;
    }
    if tag != "iframe" {
        // The parser eats one newline right after <pre>
        if tag == "pre" && first_text_starts_with_newline(element) {
            out.push('\n');
        }
        write_children(element, policy, out);
    }
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn first_text_starts_with_newline(element: ElementRef) -> bool {
    match element.children().next().map(|c| c.value()) {
        Some(Node::Text(text)) => text.text.starts_with('\n'),
        _ => false,
    }
}

fn has_blocked_scheme(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES.iter().any(|scheme| compact.starts_with(scheme))
}
