//! Reverse reconstructor: a DOM tree back to Markdown.
//!
//! Depth-first walk over a read-only tree. Text nodes return literal text;
//! elements dispatch on tag, preferring the recorded `data-qd*` attribute
//! (exact literal reproduction) and falling back to a canonical default.
//! The parent tag is threaded down so an inline-code element directly
//! inside a `pre` is treated as fence content, not an inline code span.
//! Nothing here writes to the tree, and no input aborts the walk.

mod lists;
mod tables;

use crate::node::{Node, NodeKind};
use crate::options::Options;

/// Reconstruct markdown from a DOM tree.
pub fn to_markdown(root: &Node, options: &Options) -> String {
    let body = match root.kind() {
        NodeKind::Text => root.data().to_string(),
        NodeKind::Element => walk_node(root, "", options),
        NodeKind::Fragment => walk_children(root, options),
    };
    cleanup(&body)
}

pub(crate) fn walk_children(node: &Node, options: &Options) -> String {
    let parent = node.tag_name();
    node.children()
        .map(|child| walk_node(child, parent, options))
        .collect()
}

pub(crate) fn walk_node(node: &Node, parent_tag: &str, options: &Options) -> String {
    match node.kind() {
        NodeKind::Text => node.data().to_string(),
        NodeKind::Fragment => walk_children(node, options),
        NodeKind::Element => element_to_markdown(node, parent_tag, options),
    }
}

fn element_to_markdown(node: &Node, parent_tag: &str, options: &Options) -> String {
    let tag = node.tag_name();

    // Fence output is recognized by shape or by the recorded raw source,
    // wherever a plugin wrapper put it.
    if tag == "pre" || node.has_attr("data-qd-source") {
        return reconstruct_fence(node, options);
    }

    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(tag.as_bytes()[1] - b'0');
            let content = walk_children(node, options);
            let content = content.trim();
            if content.is_empty() {
                return String::new();
            }
            let fallback = "#".repeat(level);
            let marker = marker_or(node, &fallback);
            format!("{marker} {content}\n\n")
        }

        "strong" | "b" => wrap_inline(node, "**", options),
        "em" | "i" => wrap_inline(node, "*", options),
        "del" | "s" | "strike" => wrap_inline(node, "~~", options),

        "code" => {
            if parent_tag == "pre" {
                // Fence content, handled by the pre rule.
                return node.text_content();
            }
            let code = node.text_content();
            if code.is_empty() {
                return String::new();
            }
            let marker = marker_or(node, "`");
            format!("{marker}{code}{marker}")
        }

        "p" => {
            let inner = walk_children(node, options);
            let trimmed = inner.trim_end();
            if trimmed.is_empty() {
                return String::new();
            }
            // Trailing blank lines inside the paragraph collapse to one
            // preserved blank line; a single trailing newline becomes the
            // standard separator.
            let trailing_newlines = inner[trimmed.len()..].matches('\n').count();
            if trailing_newlines >= 2 {
                format!("{trimmed}\n\n\n")
            } else {
                format!("{trimmed}\n\n")
            }
        }

        "blockquote" => {
            let inner = walk_children(node, options);
            let inner = inner.trim();
            if inner.is_empty() {
                return String::new();
            }
            let mut out = String::new();
            for line in inner.lines() {
                out.push('>');
                if !line.is_empty() {
                    out.push(' ');
                    out.push_str(line);
                }
                out.push('\n');
            }
            out.push('\n');
            out
        }

        "ul" | "ol" => {
            let mut out = lists::walk_list(node, 0, options);
            out.push('\n');
            out
        }

        "table" => tables::walk_table(node, options),

        "a" => {
            let href = node.attr("href").unwrap_or("");
            let text = node
                .attr("data-qd-text")
                .map(str::to_string)
                .unwrap_or_else(|| walk_children(node, options));
            match node.attr("data-qd") {
                None if text == href => format!("<{href}>"),
                // The empty marker records a bare autolink.
                Some("") if text == href => href.to_string(),
                _ => format!("[{text}]({href})"),
            }
        }

        "img" => {
            let src = node.attr("data-qd-src").or_else(|| node.attr("src"));
            let alt = node.attr("data-qd-alt").or_else(|| node.attr("alt"));
            format!("![{}]({})", alt.unwrap_or(""), src.unwrap_or(""))
        }

        "br" => match node.attr("data-qd") {
            Some(marker) => format!("{marker}\n"),
            None => "\n".to_string(),
        },

        "hr" => format!("{}\n\n", marker_or(node, "---")),

        // Checkbox inputs are consumed by the list walker; anything else
        // from these tags has no markdown meaning.
        "input" | "script" | "style" | "template" | "head" => String::new(),

        // Unknown containers contribute their children.
        _ => walk_children(node, options),
    }
}

fn marker_or<'a>(node: &'a Node, fallback: &'a str) -> &'a str {
    match node.attr("data-qd") {
        Some(marker) if !marker.is_empty() => marker,
        _ => fallback,
    }
}

fn wrap_inline(node: &Node, fallback: &str, options: &Options) -> String {
    let content = walk_children(node, options);
    if content.trim().is_empty() {
        // Empty inline content emits no markers at all.
        return String::new();
    }
    let marker = marker_or(node, fallback);
    format!("{marker}{content}{marker}")
}

fn reconstruct_fence(node: &Node, options: &Options) -> String {
    let code_child = node.find_child("code");

    let mut fence = node.attr("data-qd-fence").unwrap_or("```").to_string();
    let mut lang = node.attr("data-qd-lang").map(str::to_string).or_else(|| {
        code_child
            .and_then(|c| c.attr("class"))
            .and_then(|class| {
                class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("language-"))
            })
            .map(str::to_string)
    });

    let mut content: Option<String> = None;

    // A registered plugin gets the first shot when a language is present;
    // a failing hook falls back to the recorded source.
    if let Some(plugin) = &options.fence_plugin {
        if lang.is_some() {
            match plugin.reverse(node) {
                Ok(Some(source)) => {
                    content = Some(source.content);
                    if let Some(l) = source.lang {
                        lang = Some(l);
                    }
                    if let Some(f) = source.fence {
                        fence = f;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(%error, "fence plugin reverse failed; using recorded source");
                }
            }
        }
    }

    let content = content
        .or_else(|| node.attr("data-qd-source").map(str::to_string))
        .unwrap_or_else(|| match code_child {
            Some(code) => code.text_content(),
            None => node.text_content(),
        });

    let lang = lang.unwrap_or_default();
    let body = content.trim_end_matches('\n');
    format!("{fence}{lang}\n{body}\n{fence}\n\n")
}

/// Collapse 3+ consecutive newlines to 2 and trim the ends.
fn cleanup(s: &str) -> String {
    let trimmed = s.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut newlines = 0;
    for c in trimmed.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(c);
            }
        } else {
            newlines = 0;
            out.push(c);
        }
    }
    out
}
