//! Read-only DOM tree for markdown reconstruction.
//!
//! The reverse reconstructor depends only on this minimal tree-visitor
//! surface (tag name, attributes, children, text content), not on a concrete
//! host DOM, so it is testable with an in-memory tree outside any
//! browser-like environment. Any HTML parser can convert its output to this
//! structure; the `html` feature ships a `scraper`-backed conversion.

/// Node kinds the reconstructor distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Element node with a tag, attributes and children
    Element,
    /// Text node carrying literal character data
    Text,
    /// Anonymous container; children are walked transparently
    Fragment,
}

/// An owned DOM node.
///
/// The reconstructor never mutates a `Node` it receives; the mutating
/// builder methods exist for callers assembling input trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    /// Lowercase tag name; empty for text and fragment nodes
    tag: String,
    /// Character data for text nodes
    text: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Node {
    /// Create an element node
    pub fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element,
            tag: tag.to_ascii_lowercase(),
            text: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element node with attributes
    pub fn element_with_attrs(tag: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag);
        node.attrs = attrs
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();
        node
    }

    /// Create a text node
    pub fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            tag: String::new(),
            text: content.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an anonymous container node
    pub fn fragment() -> Self {
        Self {
            kind: NodeKind::Fragment,
            tag: String::new(),
            text: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Lowercase tag name; empty for non-elements
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Character data for text nodes
    pub fn data(&self) -> &str {
        &self.text
    }

    /// Get an attribute value by (case-insensitive) name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Find the first element child with the given tag
    pub fn find_child(&self, tag: &str) -> Option<&Node> {
        self.element_children().find(|c| c.tag_name() == tag)
    }

    /// Add a child node (builder use only)
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Set an attribute, replacing an existing value (builder use only)
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name, value.to_string()));
        }
    }

    /// All text content from this node and its descendants
    pub fn text_content(&self) -> String {
        match self.kind {
            NodeKind::Text => self.text.clone(),
            _ => {
                let mut out = String::new();
                self.collect_text(&mut out);
                out
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self.kind {
            NodeKind::Text => out.push_str(&self.text),
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }
}
