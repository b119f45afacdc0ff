//! Inline tokenizer
//!
//! Splits a text span into inline nodes by repeatedly matching the
//! highest-priority pattern at the cursor: explicit break > image > link >
//! code span > bold > strikethrough > italic > bare autolink > literal text.
//! Unmatched special characters are consumed as literal text, so every
//! iteration advances by at least one character.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Inline;

static AUTOLINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s<>]+").expect("autolink pattern"));

/// Tokenize a single text span into inline nodes.
pub fn tokenize(span: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < span.len() {
        let rest = &span[i..];

        if let Some((node, used)) = match_at(rest, &buf) {
            flush(&mut buf, &mut nodes);
            nodes.push(node);
            i += used;
            continue;
        }

        let ch = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };

        // Backslash escapes the following punctuation character.
        if ch == '\\' {
            if let Some(next) = rest[1..].chars().next() {
                if next.is_ascii_punctuation() {
                    buf.push(next);
                    i += 1 + next.len_utf8();
                    continue;
                }
            }
        }

        buf.push(ch);
        i += ch.len_utf8();
    }

    flush(&mut buf, &mut nodes);
    nodes
}

fn flush(buf: &mut String, nodes: &mut Vec<Inline>) {
    if !buf.is_empty() {
        nodes.push(Inline::Text(std::mem::take(buf)));
    }
}

fn match_at(rest: &str, buf: &str) -> Option<(Inline, usize)> {
    match_break(rest)
        .or_else(|| match_image(rest))
        .or_else(|| match_link(rest))
        .or_else(|| match_code(rest))
        .or_else(|| match_two_char(rest))
        .or_else(|| match_italic(rest, buf))
        .or_else(|| match_autolink(rest, buf))
}

/// `  \n` (2+ trailing spaces) or `\` + newline.
fn match_break(rest: &str) -> Option<(Inline, usize)> {
    if rest.starts_with("\\\n") {
        return Some((
            Inline::LineBreak {
                marker: "\\".to_string(),
            },
            2,
        ));
    }

    if rest.starts_with(' ') {
        let spaces = rest.bytes().take_while(|&b| b == b' ').count();
        if spaces >= 2 && rest[spaces..].starts_with('\n') {
            return Some((
                Inline::LineBreak {
                    marker: " ".repeat(spaces),
                },
                spaces + 1,
            ));
        }
    }

    None
}

fn match_image(rest: &str) -> Option<(Inline, usize)> {
    if !rest.starts_with("![") {
        return None;
    }
    let close = rest[2..].find(']')? + 2;
    let (href, end) = paren_target(rest, close)?;
    let alt = &rest[2..close];
    Some((
        Inline::Image {
            src: href.to_string(),
            alt: alt.to_string(),
        },
        end,
    ))
}

fn match_link(rest: &str) -> Option<(Inline, usize)> {
    if !rest.starts_with('[') {
        return None;
    }

    // The label may contain balanced brackets (e.g. a nested image).
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut close = None;
    for (idx, &b) in bytes.iter().enumerate().skip(1) {
        match b {
            b'[' => depth += 1,
            b']' => {
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    let close = close?;
    let (href, end) = paren_target(rest, close)?;
    let text = &rest[1..close];
    let content = tokenize(&text.replace('\n', " "));
    Some((
        Inline::Link {
            href: href.to_string(),
            text: text.to_string(),
            content,
        },
        end,
    ))
}

/// Parse the `(target)` that must directly follow a label closing at `close`.
/// Returns the trimmed target and the total number of bytes consumed.
fn paren_target(rest: &str, close: usize) -> Option<(&str, usize)> {
    let bytes = rest.as_bytes();
    if bytes.get(close + 1) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for idx in close + 2..bytes.len() {
        match bytes[idx] {
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return Some((rest[close + 2..idx].trim(), idx + 1));
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

fn match_code(rest: &str) -> Option<(Inline, usize)> {
    if !rest.starts_with('`') {
        return None;
    }
    let ticks = rest.bytes().take_while(|&b| b == b'`').count();
    let bytes = rest.as_bytes();
    let mut j = ticks;
    while j < bytes.len() {
        if bytes[j] == b'`' {
            let run = bytes[j..].iter().take_while(|&&b| b == b'`').count();
            if run == ticks {
                return Some((
                    Inline::Code {
                        ticks,
                        code: rest[ticks..j].to_string(),
                    },
                    j + run,
                ));
            }
            j += run;
        } else {
            j += 1;
        }
    }
    None
}

/// Bold (`**`/`__`) and strikethrough (`~~`).
fn match_two_char(rest: &str) -> Option<(Inline, usize)> {
    for delim in ["**", "__", "~~"] {
        if !rest.starts_with(delim) {
            continue;
        }
        let Some(close) = find_close_two(rest, delim) else {
            continue;
        };
        let content = tokenize(&rest[2..close].replace('\n', " "));
        let marker = delim.as_bytes()[0] as char;
        let node = match marker {
            '~' => Inline::Strikethrough(content),
            _ => Inline::Strong { marker, content },
        };
        return Some((node, close + 2));
    }
    None
}

fn find_close_two(rest: &str, delim: &str) -> Option<usize> {
    let first = rest[2..].chars().next()?;
    if first.is_whitespace() {
        return None;
    }
    let idx = rest[2..].find(delim)? + 2;
    if idx == 2 {
        return None;
    }
    Some(idx)
}

/// Italic `*`/`_`, only when not adjacent to a like run. Underscores do not
/// open emphasis in the middle of a word.
fn match_italic(rest: &str, buf: &str) -> Option<(Inline, usize)> {
    let marker = rest.chars().next()?;
    if marker != '*' && marker != '_' {
        return None;
    }
    if buf.ends_with(marker) {
        return None;
    }
    if marker == '_' && buf.chars().last().is_some_and(char::is_alphanumeric) {
        return None;
    }

    let inner = &rest[1..];
    let first = inner.chars().next()?;
    if first == marker || first.is_whitespace() {
        return None;
    }
    let close = inner.find(marker)? + 1;
    let content = tokenize(&rest[1..close].replace('\n', " "));
    Some((
        Inline::Emphasis { marker, content },
        close + 1,
    ))
}

fn match_autolink(rest: &str, buf: &str) -> Option<(Inline, usize)> {
    if !rest.starts_with("http://") && !rest.starts_with("https://") {
        return None;
    }
    if buf.chars().last().is_some_and(char::is_alphanumeric) {
        return None;
    }
    let m = AUTOLINK.find(rest)?;
    let mut url = m.as_str();
    // Trailing sentence punctuation belongs to the prose, not the URL.
    while let Some(last) = url.chars().last() {
        if matches!(last, '.' | ',' | ';' | ':' | '!' | '?' | ')') {
            url = &url[..url.len() - 1];
        } else {
            break;
        }
    }
    if url.len() <= "https://".len() {
        return None;
    }
    Some((Inline::Autolink(url.to_string()), url.len()))
}
