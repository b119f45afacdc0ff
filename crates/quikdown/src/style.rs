//! Fixed per-tag style table for `inline_styles` mode.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

static STYLES: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("h1", "font-size:2em;font-weight:600;margin:0.67em 0"),
        ("h2", "font-size:1.5em;font-weight:600;margin:0.83em 0"),
        ("h3", "font-size:1.25em;font-weight:600;margin:1em 0"),
        ("h4", "font-size:1em;font-weight:600;margin:1.33em 0"),
        ("h5", "font-size:0.875em;font-weight:600;margin:1.67em 0"),
        ("h6", "font-size:0.85em;font-weight:600;margin:2em 0"),
        ("p", "margin:1em 0"),
        (
            "blockquote",
            "border-left:4px solid #ddd;margin:1em 0;padding-left:1em;color:#666",
        ),
        (
            "pre",
            "background:#f4f4f4;padding:10px;border-radius:4px;overflow-x:auto;margin:1em 0",
        ),
        (
            "code",
            "background:#f0f0f0;padding:2px 4px;border-radius:3px;font-family:monospace",
        ),
        ("ul", "margin:0.5em 0;padding-left:2em"),
        ("ol", "margin:0.5em 0;padding-left:2em"),
        ("li", "margin:0.25em 0"),
        ("table", "border-collapse:collapse;margin:1em 0"),
        (
            "th",
            "border:1px solid #ddd;padding:8px;text-align:left;background:#f4f4f4;font-weight:600",
        ),
        ("td", "border:1px solid #ddd;padding:8px"),
        ("hr", "border:none;border-top:1px solid #ddd;margin:1em 0"),
        ("a", "color:#0366d6;text-decoration:underline"),
        ("img", "max-width:100%"),
        ("strong", "font-weight:bold"),
        ("em", "font-style:italic"),
        ("del", "text-decoration:line-through"),
    ])
});

/// Style attribute value for a tag, if the table has one.
pub fn style_for(tag: &str) -> Option<&'static str> {
    STYLES.get(tag).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_have_styles() {
        for tag in ["h1", "p", "pre", "code", "table", "strong"] {
            assert!(style_for(tag).is_some(), "{tag}");
        }
        assert!(style_for("video").is_none());
    }
}
