//! Table reconstruction.
//!
//! Reads header and body cells and the optional `data-qd-align` attribute
//! (comma-separated per column) to regenerate the `:---` / `:---:` / `---:`
//! separator shapes.

use crate::node::Node;
use crate::options::Options;
use crate::reverse::walk_children;

pub(crate) fn walk_table(node: &Node, options: &Options) -> String {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for section in node.element_children() {
        match section.tag_name() {
            "thead" => {
                if let Some(tr) = section.find_child("tr") {
                    if headers.is_empty() {
                        headers = row_cells(tr, options);
                    }
                }
            }
            "tbody" | "tfoot" => {
                for tr in section.element_children().filter(|c| c.tag_name() == "tr") {
                    rows.push(row_cells(tr, options));
                }
            }
            "tr" => {
                let cells = row_cells(section, options);
                let has_th = section.element_children().any(|c| c.tag_name() == "th");
                if headers.is_empty() && has_th {
                    headers = cells;
                } else {
                    rows.push(cells);
                }
            }
            _ => {}
        }
    }

    if headers.is_empty() {
        if rows.is_empty() {
            return String::new();
        }
        headers = rows.remove(0);
    }

    let cols = headers.len();
    let alignments: Vec<&str> = node
        .attr("data-qd-align")
        .map(|a| a.split(',').map(str::trim).collect())
        .unwrap_or_default();

    let mut out = String::new();
    push_row(&mut out, &headers);

    out.push('|');
    for i in 0..cols {
        let separator = match alignments.get(i).copied() {
            Some("left") => ":---",
            Some("center") => ":---:",
            Some("right") => "---:",
            _ => "---",
        };
        out.push(' ');
        out.push_str(separator);
        out.push_str(" |");
    }
    out.push('\n');

    for row in &mut rows {
        row.resize(cols, String::new());
        push_row(&mut out, row);
    }

    out.push('\n');
    out
}

fn row_cells(tr: &Node, options: &Options) -> Vec<String> {
    tr.element_children()
        .filter(|c| matches!(c.tag_name(), "th" | "td"))
        .map(|cell| walk_children(cell, options).trim().to_string())
        .collect()
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(cell);
        out.push_str(" |");
    }
    out.push('\n');
}
