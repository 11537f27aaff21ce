//! Parse node types.
//!
//! The parser produces a flat-at-the-top, nested-below sequence of
//! [`ParseNode`]s. Tag names are not resolved here: a [`Tagged`] node only
//! records what the markup said, leaving it to the consumer to decide whether
//! the name means anything.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of parsed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParseNode {
    /// A `[name ...]...[/name]` span.
    Tagged(Tagged),
    /// Plain text between tags, exactly as written.
    Literal(String),
}

impl ParseNode {
    /// Creates a literal text node.
    pub fn literal(text: impl Into<String>) -> Self {
        ParseNode::Literal(text.into())
    }

    /// Creates a tagged node with no arguments.
    pub fn tagged(name: impl Into<String>, children: Vec<ParseNode>) -> Self {
        ParseNode::Tagged(Tagged::new(name, children))
    }

    /// Returns the tagged payload, if this is a tagged node.
    pub fn as_tagged(&self) -> Option<&Tagged> {
        match self {
            ParseNode::Tagged(tagged) => Some(tagged),
            ParseNode::Literal(_) => None,
        }
    }

    /// Returns the literal text, if this is a literal node.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            ParseNode::Literal(text) => Some(text),
            ParseNode::Tagged(_) => None,
        }
    }
}

/// A tag occurrence with its arguments and nested content.
///
/// `arg` holds the value of the `[name=value]` form, `kwargs` the pairs of the
/// `[name key=value]` form. The parser never fills both.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tagged {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub arg: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeMap::is_empty"))]
    pub kwargs: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ParseNode>,
}

impl Tagged {
    pub fn new(name: impl Into<String>, children: Vec<ParseNode>) -> Self {
        Self {
            name: name.into(),
            arg: None,
            kwargs: BTreeMap::new(),
            children,
        }
    }

    /// Sets the positional argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    /// Adds a keyword argument.
    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}

impl From<Tagged> for ParseNode {
    fn from(tagged: Tagged) -> Self {
        ParseNode::Tagged(tagged)
    }
}
