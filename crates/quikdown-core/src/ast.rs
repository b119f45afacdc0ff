//! Markdown Abstract Syntax Tree
//!
//! Nodes carry the literal source marker that produced them wherever the
//! syntax is ambiguous (`**` vs `__`, `-` vs `*`, backtick run length, fence
//! char and length), so a renderer can embed enough information to invert
//! the HTML back into the exact original markdown.

/// A block-level Markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Heading with level (1-6) and inline content
    Heading { level: u8, content: Vec<Inline> },

    /// Paragraph containing inline content
    Paragraph(Vec<Inline>),

    /// Block quote containing nested blocks
    Blockquote(Vec<Block>),

    /// List (ordered or unordered)
    List { ordered: bool, items: Vec<ListItem> },

    /// Fenced code block, fence recorded verbatim
    CodeFence {
        fence_char: char,
        fence_len: usize,
        lang: Option<String>,
        code: String,
    },

    /// Pipe table with per-column alignment
    Table {
        headers: Vec<Vec<Inline>>,
        alignments: Vec<Alignment>,
        rows: Vec<Vec<Vec<Inline>>>,
    },

    /// Thematic break (horizontal rule)
    ThematicBreak,
}

/// Column alignment taken from a table separator cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// The separator cell that produces this alignment
    pub fn separator(self) -> &'static str {
        match self {
            Alignment::None => "---",
            Alignment::Left => ":---",
            Alignment::Center => ":---:",
            Alignment::Right => "---:",
        }
    }

    /// CSS `text-align` value, if any
    pub fn css(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

/// A list item: literal marker, inline content, optional task state and
/// nested sublists
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Literal marker from the source: `-`, `+`, `*` or `3.`
    pub marker: String,
    pub content: Vec<Inline>,
    /// `Some(_)` for task items (unordered lists only)
    pub checked: Option<bool>,
    /// Nested lists opened by deeper-indented items
    pub children: Vec<Block>,
}

impl ListItem {
    pub fn new(marker: impl Into<String>, content: Vec<Inline>) -> Self {
        Self {
            marker: marker.into(),
            content,
            checked: None,
            children: Vec::new(),
        }
    }
}

/// An inline Markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text; may contain soft newlines
    Text(String),

    /// Strong emphasis; marker is `'*'` for `**` or `'_'` for `__`
    Strong { marker: char, content: Vec<Inline> },

    /// Emphasis; marker is `'*'` or `'_'`
    Emphasis { marker: char, content: Vec<Inline> },

    /// Strikethrough (`~~`)
    Strikethrough(Vec<Inline>),

    /// Inline code span; `ticks` is the delimiter run length
    Code { ticks: usize, code: String },

    /// Explicit link; `text` is the verbatim source label
    Link {
        href: String,
        text: String,
        content: Vec<Inline>,
    },

    /// Image
    Image { src: String, alt: String },

    /// Bare `https?://` autolink
    Autolink(String),

    /// Hard line break; marker is the trailing-space run or `"\\"`
    LineBreak { marker: String },
}

impl Block {
    /// Check if this block is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Paragraph(inlines) => inlines.iter().all(Inline::is_blank),
            Block::Heading { content, .. } => content.iter().all(Inline::is_blank),
            Block::Blockquote(blocks) => blocks.iter().all(Block::is_blank),
            Block::List { items, .. } => items
                .iter()
                .all(|i| i.content.iter().all(Inline::is_blank) && i.children.is_empty()),
            Block::CodeFence { code, .. } => code.trim().is_empty(),
            Block::Table { headers, rows, .. } => {
                headers.iter().all(|h| h.iter().all(Inline::is_blank))
                    && rows
                        .iter()
                        .all(|r| r.iter().all(|c| c.iter().all(Inline::is_blank)))
            }
            Block::ThematicBreak => false,
        }
    }
}

impl Inline {
    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Strong { content, .. }
            | Inline::Emphasis { content, .. }
            | Inline::Strikethrough(content) => content.iter().all(Inline::is_blank),
            Inline::Code { code, .. } => code.is_empty(),
            Inline::Link { content, .. } => content.iter().all(Inline::is_blank),
            Inline::Image { .. } => false,
            Inline::Autolink(_) => false,
            Inline::LineBreak { .. } => false,
        }
    }

    /// The literal delimiter string for this inline, when it has one
    pub fn marker_str(&self) -> Option<String> {
        match self {
            Inline::Strong { marker, .. } => Some(marker.to_string().repeat(2)),
            Inline::Emphasis { marker, .. } => Some(marker.to_string()),
            Inline::Strikethrough(_) => Some("~~".to_string()),
            Inline::Code { ticks, .. } => Some("`".repeat(*ticks)),
            _ => None,
        }
    }
}
