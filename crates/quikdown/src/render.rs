//! Forward renderer: block/inline nodes to HTML.
//!
//! Rendering is pure and deterministic: the same markdown and options
//! produce byte-identical output. All literal text is HTML-escaped, URLs
//! pass the sanitizer, and in bidirectional mode every element records the
//! literal source marker that produced it in a `data-qd*` attribute.

use quikdown_core::{scan, Alignment, Block, Inline, ListItem};

use crate::options::Options;
use crate::style::style_for;

/// Render markdown to HTML.
pub fn render(markdown: &str, options: &Options) -> String {
    let blocks = scan(markdown);
    let mut out = String::with_capacity(markdown.len() * 2);
    render_blocks(&mut out, &blocks, options);
    out
}

fn render_blocks(out: &mut String, blocks: &[Block], options: &Options) {
    for block in blocks {
        render_block(out, block, options);
    }
}

fn render_block(out: &mut String, block: &Block, options: &Options) {
    match block {
        Block::Heading { level, content } => {
            let tag = heading_tag(*level);
            open_tag(out, tag, options);
            if options.bidirectional {
                push_attr(out, "data-qd", &"#".repeat(usize::from(*level)));
            }
            out.push('>');
            render_inlines(out, content, options);
            out.push_str("</");
            out.push_str(tag);
            out.push_str(">\n");
        }

        Block::Paragraph(inlines) => {
            open_tag(out, "p", options);
            out.push('>');
            render_inlines(out, inlines, options);
            out.push_str("</p>\n");
        }

        Block::Blockquote(children) => {
            open_tag(out, "blockquote", options);
            out.push_str(">\n");
            render_blocks(out, children, options);
            out.push_str("</blockquote>\n");
        }

        Block::List { ordered, items } => render_list(out, *ordered, items, options),

        Block::CodeFence {
            fence_char,
            fence_len,
            lang,
            code,
        } => render_fence(out, *fence_char, *fence_len, lang.as_deref(), code, options),

        Block::Table {
            headers,
            alignments,
            rows,
        } => render_table(out, headers, alignments, rows, options),

        Block::ThematicBreak => {
            open_tag(out, "hr", options);
            out.push_str(">\n");
        }
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

fn render_list(out: &mut String, ordered: bool, items: &[ListItem], options: &Options) {
    let tag = if ordered { "ol" } else { "ul" };
    open_tag(out, tag, options);
    if ordered {
        let start = items
            .first()
            .and_then(|i| i.marker.trim_end_matches('.').parse::<u32>().ok())
            .unwrap_or(1);
        if start != 1 {
            push_attr(out, "start", &start.to_string());
        }
    }
    out.push_str(">\n");

    for item in items {
        open_tag(out, "li", options);
        if options.bidirectional {
            push_attr(out, "data-qd", &item.marker);
        }
        out.push('>');
        match item.checked {
            Some(true) => out.push_str("<input type=\"checkbox\" checked disabled> "),
            Some(false) => out.push_str("<input type=\"checkbox\" disabled> "),
            None => {}
        }
        render_inlines(out, &item.content, options);
        if !item.children.is_empty() {
            out.push('\n');
            render_blocks(out, &item.children, options);
        }
        out.push_str("</li>\n");
    }

    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn render_fence(
    out: &mut String,
    fence_char: char,
    fence_len: usize,
    lang: Option<&str>,
    code: &str,
    options: &Options,
) {
    let fence: String = std::iter::repeat(fence_char).take(fence_len).collect();

    if let Some(plugin) = &options.fence_plugin {
        if let Some(html) = plugin.render(code, lang) {
            if options.bidirectional {
                // The plugin may transform the code irreversibly; the raw
                // source rides along as ground truth for reconstruction.
                out.push_str("<div");
                push_attr(out, "data-qd-fence", &fence);
                if let Some(l) = lang {
                    push_attr(out, "data-qd-lang", l);
                }
                push_attr(out, "data-qd-source", code);
                out.push('>');
                out.push_str(&html);
                out.push_str("</div>\n");
            } else {
                out.push_str(&html);
                out.push('\n');
            }
            return;
        }
    }

    open_tag(out, "pre", options);
    if options.bidirectional {
        push_attr(out, "data-qd-fence", &fence);
        if let Some(l) = lang {
            push_attr(out, "data-qd-lang", l);
        }
    }
    out.push_str("><code");
    match (options.inline_styles, lang) {
        (true, Some(l)) => {
            if let Some(style) = style_for("code") {
                push_attr(out, "style", style);
            }
            push_attr(out, "class", &format!("language-{l}"));
        }
        (true, None) => {
            if let Some(style) = style_for("code") {
                push_attr(out, "style", style);
            }
        }
        (false, Some(l)) => {
            push_attr(
                out,
                "class",
                &format!("{}code language-{l}", options.class_prefix()),
            );
        }
        (false, None) => {
            push_attr(out, "class", &format!("{}code", options.class_prefix()));
        }
    }
    out.push('>');
    escape_into(out, code);
    if !code.is_empty() {
        out.push('\n');
    }
    out.push_str("</code></pre>\n");
}

fn render_table(
    out: &mut String,
    headers: &[Vec<Inline>],
    alignments: &[Alignment],
    rows: &[Vec<Vec<Inline>>],
    options: &Options,
) {
    open_tag(out, "table", options);
    if options.bidirectional && alignments.iter().any(|a| *a != Alignment::None) {
        let joined = alignments
            .iter()
            .map(|a| a.css().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(",");
        push_attr(out, "data-qd-align", &joined);
    }
    out.push_str(">\n<thead>\n<tr>\n");
    for (i, cell) in headers.iter().enumerate() {
        open_cell(out, "th", alignments.get(i).copied(), options);
        render_inlines(out, cell, options);
        out.push_str("</th>\n");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>\n");
        for (i, cell) in row.iter().enumerate() {
            open_cell(out, "td", alignments.get(i).copied(), options);
            render_inlines(out, cell, options);
            out.push_str("</td>\n");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn open_cell(out: &mut String, tag: &str, align: Option<Alignment>, options: &Options) {
    out.push('<');
    out.push_str(tag);
    let align_css = align.and_then(Alignment::css);
    if options.inline_styles {
        let base = style_for(tag).unwrap_or("");
        match align_css {
            Some(a) => push_attr(out, "style", &format!("{base};text-align:{a}")),
            None => push_attr(out, "style", base),
        }
    } else {
        push_attr(out, "class", &format!("{}{tag}", options.class_prefix()));
        if let Some(a) = align_css {
            push_attr(out, "style", &format!("text-align:{a}"));
        }
    }
    out.push('>');
}

fn render_inlines(out: &mut String, inlines: &[Inline], options: &Options) {
    for inline in inlines {
        render_inline(out, inline, options);
    }
}

fn render_inline(out: &mut String, inline: &Inline, options: &Options) {
    match inline {
        Inline::Text(text) => {
            if options.lazy_linefeeds {
                for (i, segment) in text.split('\n').enumerate() {
                    if i > 0 {
                        // No newline after the tag: the reconstructor reads
                        // adjacent text nodes literally.
                        out.push_str("<br>");
                    }
                    escape_into(out, segment);
                }
            } else {
                escape_into(out, text);
            }
        }

        Inline::Strong { marker, content } => {
            open_tag(out, "strong", options);
            if options.bidirectional {
                push_attr(out, "data-qd", &marker.to_string().repeat(2));
            }
            out.push('>');
            render_inlines(out, content, options);
            out.push_str("</strong>");
        }

        Inline::Emphasis { marker, content } => {
            open_tag(out, "em", options);
            if options.bidirectional {
                push_attr(out, "data-qd", &marker.to_string());
            }
            out.push('>');
            render_inlines(out, content, options);
            out.push_str("</em>");
        }

        Inline::Strikethrough(content) => {
            open_tag(out, "del", options);
            if options.bidirectional {
                push_attr(out, "data-qd", "~~");
            }
            out.push('>');
            render_inlines(out, content, options);
            out.push_str("</del>");
        }

        Inline::Code { ticks, code } => {
            open_tag(out, "code", options);
            if options.bidirectional {
                push_attr(out, "data-qd", &"`".repeat(*ticks));
            }
            out.push('>');
            escape_into(out, code);
            out.push_str("</code>");
        }

        Inline::Link {
            href,
            text,
            content,
        } => {
            open_tag(out, "a", options);
            push_attr(out, "href", sanitize_url(href, options));
            if options.bidirectional {
                push_attr(out, "data-qd", "[");
                push_attr(out, "data-qd-text", text);
            }
            out.push('>');
            render_inlines(out, content, options);
            out.push_str("</a>");
        }

        Inline::Autolink(url) => {
            open_tag(out, "a", options);
            push_attr(out, "href", sanitize_url(url, options));
            if options.bidirectional {
                // A bare autolink has no marker syntax; the empty marker
                // distinguishes it from an explicit link.
                push_attr(out, "data-qd", "");
            }
            out.push('>');
            escape_into(out, url);
            out.push_str("</a>");
        }

        Inline::Image { src, alt } => {
            open_tag(out, "img", options);
            push_attr(out, "src", sanitize_url(src, options));
            push_attr(out, "alt", alt);
            if options.bidirectional {
                push_attr(out, "data-qd-src", src);
                push_attr(out, "data-qd-alt", alt);
            }
            out.push('>');
        }

        Inline::LineBreak { marker } => {
            out.push_str("<br");
            if options.bidirectional {
                push_attr(out, "data-qd", marker);
            }
            out.push('>');
        }
    }
}

/// Open a tag and emit its class or style attribute. The caller closes the
/// bracket after any extra attributes.
fn open_tag(out: &mut String, tag: &str, options: &Options) {
    out.push('<');
    out.push_str(tag);
    if options.inline_styles {
        if let Some(style) = style_for(tag) {
            push_attr(out, "style", style);
        }
    } else {
        push_attr(out, "class", &format!("{}{tag}", options.class_prefix()));
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(out, value);
    out.push('"');
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Block dangerous URL schemes unless the caller opted out. Non-image
/// `data:` URLs are rejected; `data:image/` passes.
fn sanitize_url<'a>(url: &'a str, options: &Options) -> &'a str {
    if options.allow_unsafe_urls {
        return url;
    }
    let lower = url.trim().to_ascii_lowercase();
    let blocked = lower.starts_with("javascript:")
        || lower.starts_with("vbscript:")
        || (lower.starts_with("data:") && !lower.starts_with("data:image/"));
    if blocked {
        tracing::debug!(url, "blocked unsafe url");
        "#"
    } else {
        url
    }
}
