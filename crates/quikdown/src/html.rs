//! HTML parsing support.
//!
//! Parses an HTML string into the read-only [`Node`](crate::Node) tree the
//! reverse reconstructor walks. Any other parser can produce the same
//! structure; this module is only a convenience front-end.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML string into a `Node` tree.
///
/// The returned node is a fragment holding the top-level parsed nodes, so
/// the input does not need a single root element.
///
/// # Example
///
/// ```rust
/// use quikdown::{parse_html, to_markdown, Options};
///
/// let tree = parse_html("<h1>Hello <em>World</em></h1>");
/// let markdown = to_markdown(&tree, &Options::default());
/// assert_eq!(markdown, "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    let mut fragment = Node::fragment();
    append_children(&mut fragment, document.root_element());
    fragment
}

fn append_children(parent: &mut Node, element: ElementRef) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => parent.add_child(Node::text(&text.text)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    parent.add_child(convert_element(child_element));
                }
            }
            _ => {}
        }
    }
}

fn convert_element(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);
    append_children(&mut node, element);
    node
}
