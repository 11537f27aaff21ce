//! BBCode-style markup parser.
//!
//! This crate turns `[tag]content[/tag]` markup into a sequence of
//! [`ParseNode`]s. It knows nothing about which tags exist or what they mean;
//! that is decided by whoever consumes the nodes.
//!
//! # Example
//!
//! ```rust
//! use bbking_parser::{BBParser, ParseNode};
//!
//! let nodes = BBParser::new().parse("Hello [b]world[/b]!");
//! assert_eq!(nodes.len(), 3);
//! assert_eq!(nodes[0], ParseNode::literal("Hello "));
//!
//! let bold = nodes[1].as_tagged().unwrap();
//! assert_eq!(bold.name, "b");
//! assert_eq!(bold.children, vec![ParseNode::literal("world")]);
//! ```
//!
//! # Tag Syntax
//!
//! | Form | Example | Result |
//! |------|---------|--------|
//! | Plain | `[b]x[/b]` | no arguments |
//! | Positional | `[url=http://a.b]x[/url]` | `arg = "http://a.b"` |
//! | Keyword | `[img width=10 alt="a cat"]x[/img]` | `kwargs = {alt, width}` |
//!
//! Positional values run to the closing bracket and may be quoted with `"` or
//! `'`. Keyword values end at whitespace unless quoted.
//!
//! # Tag Name Syntax
//!
//! - Start with a letter or underscore (`_`)
//! - Followed by letters, digits, underscores, or hyphens (`-`)
//! - Case-insensitive; names are reported in lowercase
//!
//! Pattern: `[A-Za-z_][A-Za-z0-9_-]*`

mod node;
mod parser;
mod tokenizer;

pub use node::{ParseNode, Tagged};
pub use parser::{BBParser, DEFAULT_MAX_DEPTH};

/// Parses markup with a default [`BBParser`].
pub fn parse(input: &str) -> Vec<ParseNode> {
    BBParser::new().parse(input)
}
