//! quikdown-core - Markdown AST, block scanner and inline tokenizer
//!
//! This crate provides the markdown side of the quikdown engine: the data
//! model and the two parsing passes. It is consumed by the `quikdown` crate,
//! which renders the AST to HTML and reconstructs markdown from a DOM tree.
//!
//! # Architecture
//!
//! ```text
//! Markdown ──scan──▶ [Block] ──tokenize (per span)──▶ [Inline]
//! ```
//!
//! # Example
//!
//! ```rust
//! use quikdown_core::{scan, Block, Inline};
//!
//! let blocks = scan("# Hello\n\nSome **bold** text.");
//! assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
//! assert!(matches!(
//!     blocks[1],
//!     Block::Paragraph(ref inlines) if inlines.iter().any(|i| matches!(i, Inline::Strong { .. }))
//! ));
//! ```

mod ast;
mod inline;
mod scan;

pub use ast::{Alignment, Block, Inline, ListItem};
pub use inline::tokenize;
pub use scan::scan;
