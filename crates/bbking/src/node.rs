//! Renderable node tree.
//!
//! A compiled document is a tree of [`Node`]s. Each node owns its children
//! exclusively; tag nodes share their [`TagDefinition`] with every other node
//! of the same kind. Trees are immutable once built and can be rendered any
//! number of times.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::tag::{ArgContract, TagDefinition};

/// A node of the render tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Raw text, escaped when rendered.
    Literal(LiteralNode),
    /// Siblings rendered back to back.
    Block(BlockNode),
    /// A tag rendered through its template.
    Tag(TagNode),
}

impl Node {
    /// Creates a literal node.
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal(LiteralNode::new(text))
    }

    /// Wraps siblings, collapsing a single sibling to itself.
    pub fn from_siblings(mut siblings: Vec<Node>) -> Self {
        if siblings.len() == 1 {
            if let Some(only) = siblings.pop() {
                return only;
            }
        }
        Node::Block(BlockNode::new(siblings))
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Node::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&BlockNode> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralNode> {
        match self {
            Node::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Concatenated literal text of this subtree, without markup.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Literal(literal) => out.push_str(literal.text()),
            Node::Block(block) => {
                for child in block.children() {
                    child.collect_text(out);
                }
            }
            Node::Tag(tag) => tag.contents().collect_text(out),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralNode {
    text: String,
}

impl LiteralNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone)]
pub struct BlockNode {
    children: Vec<Node>,
}

impl BlockNode {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// The arguments a tag node was built with.
///
/// Only one kind is ever present, matching the definition's [`ArgContract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagArgs {
    None,
    Positional(String),
    Keywords(BTreeMap<String, String>),
}

impl TagArgs {
    /// Picks the arguments a tag keeps from what the markup supplied.
    ///
    /// A positional argument is used if the tag takes one and it is non-empty;
    /// otherwise keyword arguments if the tag takes them and there are any;
    /// otherwise nothing. Supplied arguments the tag does not accept are
    /// dropped.
    pub fn select(
        contract: ArgContract,
        arg: Option<&str>,
        kwargs: &BTreeMap<String, String>,
    ) -> Self {
        match (contract, arg) {
            (ArgContract::Positional, Some(arg)) if !arg.is_empty() => {
                TagArgs::Positional(arg.to_string())
            }
            (ArgContract::Keywords, _) if !kwargs.is_empty() => TagArgs::Keywords(kwargs.clone()),
            _ => TagArgs::None,
        }
    }
}

/// A tag occurrence bound to its definition.
#[derive(Debug, Clone)]
pub struct TagNode {
    definition: Arc<TagDefinition>,
    contents: Box<Node>,
    args: TagArgs,
}

impl TagNode {
    /// Creates a tag node with no arguments.
    pub fn new(definition: Arc<TagDefinition>, contents: Node) -> Self {
        Self {
            definition,
            contents: Box::new(contents),
            args: TagArgs::None,
        }
    }

    /// Creates a tag node, keeping only the arguments the definition accepts.
    pub fn with_args(
        definition: Arc<TagDefinition>,
        contents: Node,
        arg: Option<&str>,
        kwargs: &BTreeMap<String, String>,
    ) -> Self {
        let args = TagArgs::select(definition.contract(), arg, kwargs);
        Self {
            definition,
            contents: Box::new(contents),
            args,
        }
    }

    pub fn definition(&self) -> &TagDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn contents(&self) -> &Node {
        &self.contents
    }

    pub fn args(&self) -> &TagArgs {
        &self.args
    }

    /// The positional argument, if any.
    pub fn arg(&self) -> Option<&str> {
        match &self.args {
            TagArgs::Positional(arg) => Some(arg),
            _ => None,
        }
    }

    /// The keyword arguments, if any.
    pub fn kwargs(&self) -> Option<&BTreeMap<String, String>> {
        match &self.args {
            TagArgs::Keywords(kwargs) => Some(kwargs),
            _ => None,
        }
    }
}
