//! # quikdown
//!
//! Bidirectional conversion between Markdown and HTML.
//!
//! The forward direction parses markdown (via `quikdown-core`) and renders
//! HTML, optionally embedding source-tracking `data-qd*` attributes. The
//! reverse direction walks a read-only DOM tree back into markdown,
//! consulting those attributes so ambiguous constructs (`**` vs `__`,
//! bullet chars, fence strings, autolinks vs explicit links) reproduce the
//! original syntax exactly; without them it falls back to canonical
//! markers.
//!
//! ## Forward
//!
//! ```rust
//! use quikdown::{render, Options};
//!
//! let html = render("# Hello **world**", &Options::default());
//! assert!(html.contains("<h1 class=\"quikdown-h1\">"));
//! assert!(html.contains("<strong class=\"quikdown-strong\">world</strong>"));
//! ```
//!
//! ## Reverse
//!
//! ```rust
//! use quikdown::{to_markdown_html, Options};
//!
//! let markdown = to_markdown_html("<h2 data-qd=\"##\">Title</h2>", &Options::default());
//! assert_eq!(markdown, "## Title");
//! ```
//!
//! ## Round trip
//!
//! ```rust
//! use quikdown::{render, to_markdown_html, Options};
//!
//! let options = Options {
//!     bidirectional: true,
//!     ..Default::default()
//! };
//! let source = "## Notes\n\n__bold__ and _em_";
//! let html = render(source, &options);
//! assert_eq!(to_markdown_html(&html, &options), source);
//! ```
//!
//! Both directions are pure, synchronous and forgiving: adversarial
//! markdown or HTML degrades to literal text, and no error or panic
//! crosses the public boundary.

#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod options;
mod plugin;
mod render;
mod reverse;
mod style;

#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeKind};
pub use options::Options;
pub use plugin::{FencePlugin, FenceSource, PluginError};
pub use render::render;
pub use reverse::to_markdown;
pub use style::style_for;

/// Parse an HTML string and reconstruct markdown from it.
#[cfg(feature = "html")]
pub fn to_markdown_html(html: &str, options: &Options) -> String {
    to_markdown(&html::parse_html(html), options)
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bidirectional() -> Options {
        Options {
            bidirectional: true,
            ..Default::default()
        }
    }

    fn round_trip(source: &str) {
        let options = bidirectional();
        let html = render(source, &options);
        assert_eq!(to_markdown_html(&html, &options), source, "html: {html}");
    }

    #[test]
    fn scenario_heading_emphasis_tasks() {
        let source = "# Hi\n\n**bold** and _em_\n\n- [ ] a\n- [x] b";
        let options = bidirectional();
        let html = render(source, &options);

        assert!(html.contains("<h1"));
        assert!(html.contains("<strong"));
        assert!(html.contains("<em"));
        assert!(html.contains("<input type=\"checkbox\" disabled>"));
        assert!(html.contains("<input type=\"checkbox\" checked disabled>"));

        assert_eq!(to_markdown_html(&html, &options), source);
    }

    #[test]
    fn round_trips_preserve_literal_markers() {
        round_trip("## Two\n\n__b__ and *i* and ~~s~~");
        round_trip("- a\n  - b\n- c");
        round_trip("* star\n* bullet");
        round_trip("+ plus\n+ bullet");
        round_trip("1. one\n2. two");
        round_trip("`code` and ``a ` b``");
        round_trip("[x](https://e.com) and https://e.com/y");
        round_trip("![alt](img.png)");
        round_trip("```rust\nlet x = 1;\n```");
        round_trip("~~~~\nno lang\n~~~~");
        round_trip("> quoted line");
        round_trip("a  \nwith break");
        round_trip("---");
    }

    #[test]
    fn table_round_trip_keeps_alignment_shapes() {
        let options = bidirectional();
        let html = render("| L | C | R |\n|:--|:--:|--:|\n| a | b | c |", &options);
        let md = to_markdown_html(&html, &options);
        assert_eq!(md, "| L | C | R |\n| :--- | :---: | ---: |\n| a | b | c |");
    }

    #[test]
    fn lazy_linefeeds_round_trip() {
        let options = Options {
            bidirectional: true,
            lazy_linefeeds: true,
            ..Default::default()
        };
        let source = "line one\nline two";
        let html = render(source, &options);
        assert!(html.contains("<br>"));
        assert_eq!(to_markdown_html(&html, &options), source);
    }

    #[test]
    fn reconstruction_idempotent_on_unmodified_tree() {
        let options = bidirectional();
        let html = render("# T\n\n- a\n- b\n\n`c`", &options);
        let tree = parse_html(&html);
        let first = to_markdown(&tree, &options);
        let second = to_markdown(&tree, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn escaped_text_survives_the_cycle() {
        let options = bidirectional();
        let html = render("a & b < c", &options);
        assert!(html.contains("a &amp; b &lt; c"));
        assert_eq!(to_markdown_html(&html, &options), "a & b < c");
    }

    #[test]
    fn without_markers_reconstruction_is_canonical() {
        // Hand-authored HTML carries no data-qd attributes; canonical
        // defaults apply.
        let md = to_markdown_html(
            "<h1>T</h1><p><b>x</b> <i>y</i></p><ul><li>a</li></ul>",
            &Options::default(),
        );
        assert_eq!(md, "# T\n\n**x** *y*\n\n- a");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(to_markdown_html("", &Options::default()), "");
        assert_eq!(render("", &Options::default()), "");
    }
}
