//! Parse nodes to render nodes.

use bbking_parser::ParseNode;

use crate::error::CompilationError;
use crate::node::{Node, TagNode};
use crate::registry::TagRegistry;

/// Resolves parse nodes against a registry and builds the render tree.
///
/// Building is all or nothing: the first unknown tag fails the whole build.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'r> {
    registry: &'r TagRegistry,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(registry: &'r TagRegistry) -> Self {
        Self { registry }
    }

    /// Builds a tree from a sequence of sibling parse nodes.
    ///
    /// A single sibling becomes the tree itself; anything else is wrapped in
    /// a block, including no siblings at all.
    pub fn build(&self, nodes: &[ParseNode]) -> Result<Node, CompilationError> {
        let siblings = nodes
            .iter()
            .map(|node| self.build_node(node))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::from_siblings(siblings))
    }

    fn build_node(&self, node: &ParseNode) -> Result<Node, CompilationError> {
        match node {
            ParseNode::Literal(text) => Ok(Node::literal(text.as_str())),
            ParseNode::Tagged(tagged) => {
                let definition = self.registry.lookup(&tagged.name)?;
                let contents = self.build(&tagged.children)?;
                log::trace!(
                    "built [{}] ({}, {} children)",
                    definition.name(),
                    definition.contract(),
                    tagged.children.len()
                );
                Ok(Node::Tag(TagNode::with_args(
                    definition,
                    contents,
                    tagged.arg.as_deref(),
                    &tagged.kwargs,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TagArgs;
    use bbking_parser::Tagged;

    #[test]
    fn literal_only_input() {
        let registry = TagRegistry::default();
        let node = TreeBuilder::new(&registry)
            .build(&[ParseNode::literal("hello\nworld")])
            .unwrap();
        assert_eq!(node.as_literal().map(|l| l.text()), Some("hello\nworld"));
    }

    #[test]
    fn two_top_level_nodes_make_a_block() {
        let registry = TagRegistry::default();
        let node = TreeBuilder::new(&registry)
            .build(&[
                ParseNode::literal("a"),
                ParseNode::tagged("b", vec![ParseNode::literal("b")]),
            ])
            .unwrap();
        assert_eq!(node.as_block().map(|b| b.children().len()), Some(2));
    }

    #[test]
    fn tag_children_are_built_recursively() {
        let registry = TagRegistry::default();
        let node = TreeBuilder::new(&registry)
            .build(&[ParseNode::tagged(
                "quote",
                vec![ParseNode::tagged("b", vec![ParseNode::literal("x")])],
            )])
            .unwrap();

        let quote = node.as_tag().unwrap();
        assert_eq!(quote.name(), "quote");
        assert_eq!(quote.args(), &TagArgs::None);
        let bold = quote.contents().as_tag().unwrap();
        assert_eq!(bold.name(), "b");
        assert_eq!(bold.contents().plain_text(), "x");
    }

    #[test]
    fn empty_tag_gets_empty_block() {
        let registry = TagRegistry::default();
        let node = TreeBuilder::new(&registry)
            .build(&[ParseNode::tagged("b", vec![])])
            .unwrap();
        let contents = node.as_tag().unwrap().contents();
        assert_eq!(contents.as_block().map(|b| b.children().len()), Some(0));
    }

    #[test]
    fn arguments_follow_the_contract() {
        let registry = TagRegistry::default();
        let builder = TreeBuilder::new(&registry);

        let url = Tagged::new("url", vec![ParseNode::literal("home")]).with_arg("http://a.example");
        let node = builder.build(&[url.into()]).unwrap();
        assert_eq!(node.as_tag().unwrap().arg(), Some("http://a.example"));

        let bold = Tagged::new("b", vec![ParseNode::literal("x")]).with_arg("ignored");
        let node = builder.build(&[bold.into()]).unwrap();
        assert_eq!(node.as_tag().unwrap().args(), &TagArgs::None);

        let img = Tagged::new("img", vec![ParseNode::literal("a.png")]).with_kwarg("width", "10");
        let node = builder.build(&[img.into()]).unwrap();
        assert_eq!(
            node.as_tag().unwrap().kwargs().and_then(|k| k.get("width")),
            Some(&"10".to_string())
        );
    }

    #[test]
    fn unknown_tag_fails_the_whole_build() {
        let registry = TagRegistry::default();
        let err = TreeBuilder::new(&registry)
            .build(&[
                ParseNode::literal("fine"),
                ParseNode::tagged("b", vec![ParseNode::tagged("ghost", vec![])]),
            ])
            .unwrap_err();
        assert_eq!(err, CompilationError::tag_not_found("ghost"));
    }
}
