//! Rendering node trees to HTML.
//!
//! Rendering walks the tree depth first:
//!
//! - A literal escapes its text and turns line breaks into `<br>`.
//! - A block concatenates its children.
//! - A tag opens a frame, renders its children inside it, binds the result
//!   as `contents` together with its arguments, lets its hook extend the
//!   frame, and renders its template against everything visible. The frame is
//!   closed on every exit path because it is owned by a [`FrameGuard`].
//!
//! Rendering never mutates the tree, so one tree can be rendered any number
//! of times, including from several threads, each with its own
//! [`RenderContext`].
//!
//! [`FrameGuard`]: crate::context::FrameGuard

use minijinja::Value;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::markup::{escape, linebreaksbr, Markup};
use crate::node::{Node, TagArgs, TagNode};
use crate::template::TagTemplates;

/// Context keys bound by the renderer itself.
pub const RESERVED_KEYS: &[&str] = &["contents", "arg"];

impl Node {
    /// Renders this node with the given templates and context.
    ///
    /// The context is left exactly as it was found, whether rendering
    /// succeeds or fails.
    pub fn render(
        &self,
        templates: &TagTemplates,
        ctx: &mut RenderContext,
    ) -> Result<Markup, RenderError> {
        match self {
            Node::Literal(literal) => Ok(linebreaksbr(&escape(literal.text()))),
            Node::Block(block) => block
                .children()
                .iter()
                .map(|child| child.render(templates, ctx))
                .collect(),
            Node::Tag(tag) => render_tag(tag, templates, ctx),
        }
    }
}

fn render_tag(
    tag: &TagNode,
    templates: &TagTemplates,
    ctx: &mut RenderContext,
) -> Result<Markup, RenderError> {
    let mut frame = ctx.push();

    let contents = tag.contents().render(templates, &mut frame)?;
    frame.insert("contents", contents);

    match tag.args() {
        TagArgs::None => {}
        TagArgs::Positional(arg) => frame.insert("arg", Value::from(arg.as_str())),
        TagArgs::Keywords(kwargs) => {
            for (key, value) in kwargs {
                if RESERVED_KEYS.contains(&key.as_str()) {
                    log::warn!(
                        "[{}] keyword argument '{}' is reserved and was ignored",
                        tag.name(),
                        key
                    );
                    continue;
                }
                frame.insert(key.as_str(), Value::from(value.as_str()));
            }
        }
    }

    let definition = tag.definition();
    if let Some(hook) = definition.hook() {
        hook.extend(tag, &mut frame)?;
    }

    templates.render(&definition.template_name(), frame.flatten())
}

/// Renders node trees with a fixed set of tag templates.
///
/// # Example
///
/// ```rust
/// use bbking::{Compiler, Renderer};
///
/// let tree = Compiler::default().compile("[b]bold[/b] move").unwrap();
/// let html = Renderer::default().render(&tree).unwrap();
/// assert_eq!(html, "<strong>bold</strong> move");
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    templates: TagTemplates,
}

impl Renderer {
    pub fn new(templates: TagTemplates) -> Self {
        Self { templates }
    }

    /// Renders a tree with a fresh context.
    pub fn render(&self, node: &Node) -> Result<String, RenderError> {
        let mut ctx = RenderContext::new();
        Ok(self.render_with_context(node, &mut ctx)?.into_string())
    }

    /// Renders a tree with caller-supplied bindings visible to every template.
    pub fn render_with_context(
        &self,
        node: &Node,
        ctx: &mut RenderContext,
    ) -> Result<Markup, RenderError> {
        node.render(&self.templates, ctx)
    }

    pub fn templates(&self) -> &TagTemplates {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TagTemplates {
        &mut self.templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{ArgContract, TagDefinition};
    use crate::template::TemplateRegistry;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn templates(entries: &[(&str, &str)]) -> TagTemplates {
        let mut registry = TemplateRegistry::new();
        for (name, source) in entries {
            registry.add_inline(*name, *source);
        }
        TagTemplates::new(registry)
    }

    fn tag(definition: TagDefinition, contents: Node) -> Node {
        Node::Tag(TagNode::new(Arc::new(definition), contents))
    }

    #[test]
    fn literal_is_escaped_and_line_broken() {
        let node = Node::literal("a < b\nc");
        let out = node
            .render(&templates(&[]), &mut RenderContext::new())
            .unwrap();
        assert_eq!(out.as_str(), "a &lt; b<br>c");
    }

    #[test]
    fn block_concatenates_children() {
        let node = Node::from_siblings(vec![Node::literal("a"), Node::literal("&")]);
        let out = node
            .render(&templates(&[]), &mut RenderContext::new())
            .unwrap();
        assert_eq!(out.as_str(), "a&amp;");
    }

    #[test]
    fn tag_binds_contents_and_arg() {
        let templates = templates(&[("tags/t.html", "<{{ arg }}>{{ contents }}")]);
        let definition = TagDefinition::new("t", ArgContract::Positional).unwrap();
        let node = Node::Tag(TagNode::with_args(
            Arc::new(definition),
            Node::literal("x<y"),
            Some("1"),
            &BTreeMap::new(),
        ));
        let out = node.render(&templates, &mut RenderContext::new()).unwrap();
        assert_eq!(out.as_str(), "<1>x&lt;y");
    }

    #[test]
    fn reserved_kwargs_are_skipped() {
        let templates = templates(&[("tags/k.html", "{{ contents }}|{{ size }}")]);
        let definition = TagDefinition::new("k", ArgContract::Keywords).unwrap();
        let mut kwargs = BTreeMap::new();
        kwargs.insert("contents".to_string(), "hijack".to_string());
        kwargs.insert("size".to_string(), "3".to_string());
        let node = Node::Tag(TagNode::with_args(
            Arc::new(definition),
            Node::literal("body"),
            None,
            &kwargs,
        ));
        let out = node.render(&templates, &mut RenderContext::new()).unwrap();
        assert_eq!(out.as_str(), "body|3");
    }

    #[test]
    fn frame_is_popped_when_hook_fails() {
        let templates = templates(&[("tags/f.html", "{{ contents }}")]);
        let definition = TagDefinition::new("f", ArgContract::None)
            .unwrap()
            .with_hook(|node: &TagNode, _: &mut RenderContext| -> Result<(), RenderError> {
                Err(RenderError::hook(node.name(), "refused"))
            });
        let node = tag(definition, Node::literal("x"));

        let mut ctx = RenderContext::new();
        let err = node.render(&templates, &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "[f] cannot be rendered: refused");
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.get("contents"), None);
    }

    #[test]
    fn frame_is_popped_when_template_is_missing() {
        let definition = TagDefinition::new("gone", ArgContract::None).unwrap();
        let node = tag(definition, Node::literal("x"));

        let mut ctx = RenderContext::new();
        let err = node.render(&templates(&[]), &mut ctx).unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(_)));
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn caller_bindings_are_visible() {
        let templates = templates(&[("tags/s.html", "{{ site }}:{{ contents }}")]);
        let definition = TagDefinition::new("s", ArgContract::None).unwrap();
        let node = tag(definition, Node::literal("x"));

        let mut ctx = RenderContext::new().with("site", "home");
        let out = Renderer::new(templates)
            .render_with_context(&node, &mut ctx)
            .unwrap();
        assert_eq!(out.as_str(), "home:x");
    }
}
