//! HTML parsing support.
//!
//! Parses a clipboard HTML payload and converts it to the generic [`Node`]
//! tree the serializer walks. This stands in for the element tree a browser
//! would hand over on paste.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a Node tree.
///
/// The result is a document fragment whose children are the top-level
/// nodes of the payload.
///
/// # Example
///
/// ```rust
/// use coursefmt_paste::{parse_html, PasteSerializer};
///
/// let node = parse_html("<p>Hello <b>World</b></p>");
/// let text = PasteSerializer::new().serialize(&node);
/// assert_eq!(text, "Hello **World**");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    let mut fragment = Node::document_fragment();
    append_children(document.root_element(), &mut fragment);
    fragment
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    append_children(element, &mut node);
    node
}

fn append_children(element: ElementRef, node: &mut Node) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn test_parse_simple_html() {
        let node = parse_html("<p>Hello World</p>");
        assert_eq!(node.node_type, NodeType::DocumentFragment);
        let p = node.children().next().unwrap();
        assert_eq!(p.tag_name(), "p");
        assert_eq!(p.text_content(), "Hello World");
    }

    #[test]
    fn test_parse_keeps_attributes() {
        let node = parse_html(r#"<a href="https://wfu.edu" style="color:blue">WFU</a>"#);
        let a = node.children().next().unwrap();
        assert_eq!(a.attr("href"), Some("https://wfu.edu"));
        assert_eq!(a.style("color").as_deref(), Some("blue"));
    }

    #[test]
    fn test_parse_clipboard_fragment_markers() {
        let node = parse_html("<!--StartFragment--><span>Pasted</span><!--EndFragment-->");
        assert_eq!(node.children().count(), 3);
        assert_eq!(node.text_content(), "Pasted");
    }
}
