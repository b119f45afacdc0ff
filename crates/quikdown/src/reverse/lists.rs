//! List reconstruction.
//!
//! Lists need their own recursive walker: ordered numbering is regenerated
//! sequentially, nested lists indent two spaces per depth, and a checkbox
//! input inside an item forces the task-item form regardless of the list's
//! own bullet.

use crate::node::Node;
use crate::options::Options;
use crate::reverse::walk_node;

pub(crate) fn walk_list(node: &Node, depth: usize, options: &Options) -> String {
    let ordered = node.tag_name() == "ol";
    let start: u32 = node
        .attr("start")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let indent = "  ".repeat(depth);

    let mut out = String::new();
    let mut index = 0u32;

    for item in node.element_children().filter(|c| c.tag_name() == "li") {
        let number = start + index;
        index += 1;

        let mut text = String::new();
        let mut nested = String::new();
        let mut checkbox: Option<bool> = None;

        for child in item.children() {
            if child.is_element() {
                match child.tag_name() {
                    "ul" | "ol" => {
                        nested.push_str(&walk_list(child, depth + 1, options));
                        continue;
                    }
                    "input" => {
                        let is_checkbox = child
                            .attr("type")
                            .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"));
                        if is_checkbox {
                            checkbox = Some(child.has_attr("checked"));
                            continue;
                        }
                    }
                    _ => {}
                }
            }
            text.push_str(&walk_node(child, "li", options));
        }

        let marker = match checkbox {
            Some(true) => "- [x]".to_string(),
            Some(false) => "- [ ]".to_string(),
            None if ordered => format!("{number}."),
            None => bullet(item).to_string(),
        };

        out.push_str(&indent);
        out.push_str(&marker);
        out.push(' ');
        out.push_str(text.trim());
        out.push('\n');
        out.push_str(&nested);
    }

    out
}

fn bullet(item: &Node) -> &str {
    match item.attr("data-qd") {
        Some(marker) if !marker.is_empty() => marker,
        _ => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reverse::to_markdown;

    fn li(text: &str) -> Node {
        let mut node = Node::element("li");
        node.add_child(Node::text(text));
        node
    }

    fn list_of(tag: &str, items: Vec<Node>) -> Node {
        let mut node = Node::element(tag);
        for item in items {
            node.add_child(item);
        }
        node
    }

    #[test]
    fn unordered_canonical_bullet() {
        let ul = list_of("ul", vec![li("a"), li("b")]);
        assert_eq!(to_markdown(&ul, &Options::default()), "- a\n- b");
    }

    #[test]
    fn bullet_marker_preserved() {
        let mut item = Node::element_with_attrs("li", vec![("data-qd", "*")]);
        item.add_child(Node::text("a"));
        let ul = list_of("ul", vec![item]);
        assert_eq!(to_markdown(&ul, &Options::default()), "* a");
    }

    #[test]
    fn ordered_numbering_is_sequential() {
        // Recorded ordinals never win over positional numbering.
        let mut first = Node::element_with_attrs("li", vec![("data-qd", "7.")]);
        first.add_child(Node::text("a"));
        let ol = list_of("ol", vec![first, li("b"), li("c")]);
        assert_eq!(to_markdown(&ol, &Options::default()), "1. a\n2. b\n3. c");
    }

    #[test]
    fn ordered_start_attribute_offsets_numbering() {
        let mut ol = list_of("ol", vec![li("a"), li("b")]);
        ol.set_attr("start", "3");
        assert_eq!(to_markdown(&ol, &Options::default()), "3. a\n4. b");
    }

    #[test]
    fn nested_list_indents_two_spaces() {
        let mut outer_item = li("a");
        outer_item.add_child(list_of("ul", vec![li("b")]));
        let ul = list_of("ul", vec![outer_item, li("c")]);
        assert_eq!(to_markdown(&ul, &Options::default()), "- a\n  - b\n- c");
    }

    #[test]
    fn checkbox_forces_task_marker() {
        let mut unchecked = Node::element_with_attrs("li", vec![("data-qd", "*")]);
        unchecked.add_child(Node::element_with_attrs("input", vec![("type", "checkbox")]));
        unchecked.add_child(Node::text(" a"));

        let mut checked = Node::element("li");
        checked.add_child(Node::element_with_attrs(
            "input",
            vec![("type", "checkbox"), ("checked", "")],
        ));
        checked.add_child(Node::text(" b"));

        let ul = list_of("ul", vec![unchecked, checked]);
        assert_eq!(to_markdown(&ul, &Options::default()), "- [ ] a\n- [x] b");
    }

    #[test]
    fn checkbox_wins_inside_ordered_list() {
        let mut item = Node::element("li");
        item.add_child(Node::element_with_attrs(
            "input",
            vec![("type", "checkbox"), ("checked", "")],
        ));
        item.add_child(Node::text(" x"));
        let ol = list_of("ol", vec![item]);
        assert_eq!(to_markdown(&ol, &Options::default()), "- [x] x");
    }

    #[test]
    fn inline_markup_inside_items() {
        let mut item = Node::element("li");
        let mut strong = Node::element("strong");
        strong.add_child(Node::text("a"));
        item.add_child(strong);
        let ul = list_of("ul", vec![item]);
        assert_eq!(to_markdown(&ul, &Options::default()), "- **a**");
    }
}
