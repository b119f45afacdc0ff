//! Block scanner
//!
//! Splits markdown text into block nodes. Classification is line-based and
//! forgiving: a construct that fails its own rules degrades to paragraph
//! text instead of producing an error. Blockquote bodies are re-scanned
//! recursively, so nesting falls out of the same rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Alignment, Block, Inline, ListItem};
use crate::inline::tokenize;

static TABLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|?[\s\-:|]+\|?$").expect("separator pattern"));
static TASK_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[( |[xX])\]\s+").expect("task pattern"));

/// Termination guard for the nested-list builder on pathological indentation.
const LIST_ITERATION_CAP: usize = 1000;

/// Scan markdown text into block nodes. Line endings are normalized to LF
/// before any other rule applies.
pub fn scan(text: &str) -> Vec<Block> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    scan_lines(&lines)
}

fn scan_lines(lines: &[&str]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        if let Some((fence_char, fence_len, lang)) = fence_open(line) {
            let mut body: Vec<&str> = Vec::new();
            i += 1;
            while i < lines.len() {
                if fence_close(lines[i], fence_char, fence_len) {
                    i += 1;
                    break;
                }
                body.push(lines[i]);
                i += 1;
            }
            // An unmatched fence closes at EOF.
            blocks.push(Block::CodeFence {
                fence_char,
                fence_len,
                lang,
                code: body.join("\n"),
            });
            continue;
        }

        if let Some((level, text)) = heading(line) {
            blocks.push(Block::Heading {
                level,
                content: tokenize(&text),
            });
            i += 1;
            continue;
        }

        if is_thematic_break(line) {
            blocks.push(Block::ThematicBreak);
            i += 1;
            continue;
        }

        if is_table_start(lines, i) {
            i = scan_table(lines, i, &mut blocks);
            continue;
        }

        if line.trim_start().starts_with('>') {
            let mut inner: Vec<&str> = Vec::new();
            while i < lines.len() {
                let l = lines[i].trim_start();
                if !l.starts_with('>') {
                    break;
                }
                inner.push(strip_quote_marker(l));
                i += 1;
            }
            blocks.push(Block::Blockquote(scan_lines(&inner)));
            continue;
        }

        if parse_list_marker(line).is_some() {
            let mut raw = Vec::new();
            while i < lines.len() {
                match parse_list_marker(lines[i]) {
                    Some(item) => {
                        raw.push(item);
                        i += 1;
                    }
                    None => break,
                }
            }
            let depth = raw[0].indent / 2;
            let mut pos = 0;
            let mut guard = 0;
            blocks.extend(build_lists(&raw, &mut pos, depth, &mut guard));
            continue;
        }

        // Paragraph: accumulate until a blank line or a block starter.
        let start = i;
        i += 1;
        while i < lines.len() && !lines[i].trim().is_empty() && !is_block_start(lines, i) {
            i += 1;
        }
        let span = lines[start..i].join("\n");
        blocks.push(Block::Paragraph(tokenize(&span)));
    }

    blocks
}

fn is_block_start(lines: &[&str], i: usize) -> bool {
    let line = lines[i];
    fence_open(line).is_some()
        || heading(line).is_some()
        || is_thematic_break(line)
        || is_table_start(lines, i)
        || line.trim_start().starts_with('>')
        || parse_list_marker(line).is_some()
}

fn fence_open(line: &str) -> Option<(char, usize, Option<String>)> {
    let t = line.trim_end();
    let first = t.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let run = t.chars().take_while(|&c| c == first).count();
    if run < 3 {
        return None;
    }
    let info = t[run..].trim();
    let lang = if info.is_empty() {
        None
    } else {
        Some(info.to_string())
    };
    Some((first, run, lang))
}

fn fence_close(line: &str, fence_char: char, fence_len: usize) -> bool {
    let t = line.trim();
    let run = t.chars().take_while(|&c| c == fence_char).count();
    run >= fence_len && t[run..].is_empty()
}

fn heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    // The space after the hashes is tolerated missing; a trailing hash run
    // is decoration, not content.
    let text = line[hashes..].trim().trim_end_matches('#').trim_end();
    Some((hashes as u8, text.to_string()))
}

fn is_thematic_break(line: &str) -> bool {
    let compact: String = line.trim().chars().filter(|&c| c != ' ').collect();
    if compact.len() < 3 {
        return false;
    }
    let Some(first) = compact.chars().next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && compact.chars().all(|c| c == first)
}

fn strip_quote_marker(line: &str) -> &str {
    let rest = &line[1..];
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn is_table_start(lines: &[&str], i: usize) -> bool {
    if !lines[i].contains('|') || i + 1 >= lines.len() {
        return false;
    }
    let sep = lines[i + 1].trim();
    sep.contains('-') && TABLE_SEPARATOR.is_match(sep)
}

fn scan_table(lines: &[&str], mut i: usize, blocks: &mut Vec<Block>) -> usize {
    let header_cells = split_row(lines[i]);
    let cols = header_cells.len();

    let mut alignments: Vec<Alignment> = split_row(lines[i + 1])
        .iter()
        .map(|c| alignment_of(c))
        .collect();
    alignments.resize(cols, Alignment::None);
    i += 2;

    let mut rows: Vec<Vec<Vec<Inline>>> = Vec::new();
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() || !line.contains('|') {
            break;
        }
        let mut cells = split_row(line);
        cells.resize(cols, String::new());
        rows.push(cells.iter().map(|c| tokenize(c)).collect());
        i += 1;
    }

    blocks.push(Block::Table {
        headers: header_cells.iter().map(|c| tokenize(c)).collect(),
        alignments,
        rows,
    });
    i
}

fn split_row(line: &str) -> Vec<String> {
    let t = line.trim();
    let t = t.strip_prefix('|').unwrap_or(t);
    let t = t.strip_suffix('|').unwrap_or(t);
    t.split('|').map(|c| c.trim().to_string()).collect()
}

fn alignment_of(cell: &str) -> Alignment {
    let c = cell.trim();
    let left = c.starts_with(':');
    let right = c.len() > 1 && c.ends_with(':');
    match (left, right) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    }
}

struct RawItem {
    indent: usize,
    ordered: bool,
    marker: String,
    checked: Option<bool>,
    text: String,
}

fn parse_list_marker(line: &str) -> Option<RawItem> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    let rest = &line[indent..];
    let first = rest.chars().next()?;

    if matches!(first, '-' | '+' | '*') {
        let after = rest[1..].strip_prefix(' ')?;
        let mut text = after.trim_start();
        let mut checked = None;
        if let Some(m) = TASK_PREFIX.find(text) {
            checked = Some(matches!(text.as_bytes()[1], b'x' | b'X'));
            text = &text[m.end()..];
        }
        return Some(RawItem {
            indent,
            ordered: false,
            marker: first.to_string(),
            checked,
            text: text.to_string(),
        });
    }

    if first.is_ascii_digit() {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let after = rest[digits..].strip_prefix('.')?;
        let after = after.strip_prefix(' ')?;
        return Some(RawItem {
            indent,
            ordered: true,
            marker: rest[..digits + 1].to_string(),
            checked: None,
            text: after.trim_start().to_string(),
        });
    }

    None
}

/// Marker kind at one depth: ordered items are one kind, each bullet char
/// is its own. A kind change closes the open list and opens a sibling.
fn marker_kind(item: &RawItem) -> char {
    if item.ordered {
        '0'
    } else {
        item.marker.chars().next().unwrap_or('-')
    }
}

fn build_lists(
    items: &[RawItem],
    pos: &mut usize,
    depth: usize,
    guard: &mut usize,
) -> Vec<Block> {
    let mut out = Vec::new();
    let mut current: Option<(char, bool, Vec<ListItem>)> = None;

    while *pos < items.len() {
        *guard += 1;
        if *guard > LIST_ITERATION_CAP {
            break;
        }

        let item = &items[*pos];
        let d = item.indent / 2;

        if d < depth {
            break;
        }

        if d > depth {
            let children = build_lists(items, pos, d, guard);
            match current.as_mut().and_then(|(_, _, open)| open.last_mut()) {
                Some(last) => last.children.extend(children),
                // Indentation with no parent item degrades to sibling lists.
                None => out.extend(children),
            }
            continue;
        }

        let kind = marker_kind(item);
        if let Some((open_kind, ordered, open)) = current.take() {
            if open_kind == kind {
                current = Some((open_kind, ordered, open));
            } else {
                out.push(Block::List {
                    ordered,
                    items: open,
                });
            }
        }
        let (_, _, open) = current.get_or_insert((kind, item.ordered, Vec::new()));

        let mut li = ListItem::new(item.marker.clone(), tokenize(&item.text));
        li.checked = item.checked;
        open.push(li);
        *pos += 1;
    }

    if let Some((_, ordered, open)) = current {
        out.push(Block::List {
            ordered,
            items: open,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn heading_levels() {
        let blocks = scan("# One\n### Three");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("One")],
                },
                Block::Heading {
                    level: 3,
                    content: vec![text("Three")],
                },
            ]
        );
    }

    #[test]
    fn heading_space_tolerated_missing() {
        let blocks = scan("##Two");
        assert_eq!(
            blocks,
            vec![Block::Heading {
                level: 2,
                content: vec![text("Two")],
            }]
        );
    }

    #[test]
    fn heading_trailing_hashes_stripped() {
        let blocks = scan("# Title ##");
        assert_eq!(
            blocks,
            vec![Block::Heading {
                level: 1,
                content: vec![text("Title")],
            }]
        );
    }

    #[test]
    fn seven_hashes_degrade_to_paragraph() {
        let blocks = scan("####### nope");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("####### nope")])]);
    }

    #[test]
    fn thematic_break_variants() {
        for src in ["---", "***", "___", "- - -", "*  *  *"] {
            assert_eq!(scan(src), vec![Block::ThematicBreak], "{src}");
        }
        // Mixed characters are not a break.
        assert_eq!(
            scan("-*-"),
            vec![Block::Paragraph(vec![text("-*-")])]
        );
    }

    #[test]
    fn fence_basic() {
        let blocks = scan("```rust\nlet x = 1;\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeFence {
                fence_char: '`',
                fence_len: 3,
                lang: Some("rust".to_string()),
                code: "let x = 1;".to_string(),
            }]
        );
    }

    #[test]
    fn fence_tilde_and_longer_close() {
        let blocks = scan("~~~~\ncode\n~~~~~");
        assert_eq!(
            blocks,
            vec![Block::CodeFence {
                fence_char: '~',
                fence_len: 4,
                lang: None,
                code: "code".to_string(),
            }]
        );
    }

    #[test]
    fn unmatched_fence_closes_at_eof() {
        let blocks = scan("```\nstill code\nmore");
        assert_eq!(
            blocks,
            vec![Block::CodeFence {
                fence_char: '`',
                fence_len: 3,
                lang: None,
                code: "still code\nmore".to_string(),
            }]
        );
    }

    #[test]
    fn fence_does_not_close_on_other_char() {
        let blocks = scan("```\n~~~\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeFence {
                fence_char: '`',
                fence_len: 3,
                lang: None,
                code: "~~~".to_string(),
            }]
        );
    }

    #[test]
    fn blockquote_recursive() {
        let blocks = scan("> # Hi\n> text");
        assert_eq!(
            blocks,
            vec![Block::Blockquote(vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Hi")],
                },
                Block::Paragraph(vec![text("text")]),
            ])]
        );
    }

    #[test]
    fn blockquote_nested() {
        let blocks = scan("> a\n>> b");
        assert_eq!(
            blocks,
            vec![Block::Blockquote(vec![
                Block::Paragraph(vec![text("a")]),
                Block::Blockquote(vec![Block::Paragraph(vec![text("b")])]),
            ])]
        );
    }

    #[test]
    fn nested_list_shape() {
        // "- a" with a 2-space-indented "- b" child, then "- c".
        let blocks = scan("- a\n  - b\n- c");
        assert_eq!(blocks.len(), 1);
        let Block::List { ordered, items } = &blocks[0] else {
            panic!("expected list");
        };
        assert!(!*ordered);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content, vec![text("a")]);
        assert_eq!(
            items[0].children,
            vec![Block::List {
                ordered: false,
                items: vec![ListItem::new("-", vec![text("b")])],
            }]
        );
        assert_eq!(items[1].content, vec![text("c")]);
    }

    #[test]
    fn marker_change_closes_list() {
        let blocks = scan("- a\n* b");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::List { items, .. } if items[0].marker == "-"));
        assert!(matches!(&blocks[1], Block::List { items, .. } if items[0].marker == "*"));
    }

    #[test]
    fn ordered_list_markers_kept() {
        let blocks = scan("3. a\n4. b");
        let Block::List { ordered, items } = &blocks[0] else {
            panic!("expected list");
        };
        assert!(*ordered);
        assert_eq!(items[0].marker, "3.");
        assert_eq!(items[1].marker, "4.");
    }

    #[test]
    fn task_items() {
        let blocks = scan("- [ ] a\n- [x] b");
        let Block::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items[0].checked, Some(false));
        assert_eq!(items[0].content, vec![text("a")]);
        assert_eq!(items[1].checked, Some(true));
    }

    #[test]
    fn task_prefix_ignored_in_ordered_list() {
        let blocks = scan("1. [ ] a");
        let Block::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items[0].checked, None);
    }

    #[test]
    fn table_with_alignment() {
        let blocks = scan("| L | C | R |\n|:--|:--:|--:|\n| a | b | c |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                headers: vec![vec![text("L")], vec![text("C")], vec![text("R")]],
                alignments: vec![Alignment::Left, Alignment::Center, Alignment::Right],
                rows: vec![vec![vec![text("a")], vec![text("b")], vec![text("c")]]],
            }]
        );
    }

    #[test]
    fn pipe_without_separator_is_paragraph() {
        let blocks = scan("a | b\nplain");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("a | b\nplain")])]);
    }

    #[test]
    fn short_row_padded_to_header_width() {
        let blocks = scan("| a | b |\n|---|---|\n| only |");
        let Block::Table { rows, .. } = &blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(rows[0].len(), 2);
        assert!(rows[0][1].is_empty());
    }

    #[test]
    fn paragraph_stops_at_block_starter() {
        let blocks = scan("text\n# head");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], Block::Heading { level: 1, .. }));
    }

    #[test]
    fn crlf_normalized() {
        assert_eq!(scan("a\r\nb"), vec![Block::Paragraph(vec![text("a\nb")])]);
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        let blocks = scan("a\n\nb");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![text("a")]),
                Block::Paragraph(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn pathological_indentation_terminates() {
        let mut src = String::new();
        for depth in 0..600 {
            src.push_str(&"  ".repeat(depth % 40));
            src.push_str("- x\n");
        }
        // Only the guard matters here: the scan must return.
        assert!(!scan(&src).is_empty());
    }
}
