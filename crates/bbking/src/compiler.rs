//! Markup compilation.
//!
//! Compiling runs the parser over raw markup and builds a render tree from
//! the result. It does not render; pass the tree to a
//! [`Renderer`](crate::Renderer) for that.

use bbking_parser::{BBParser, ParseNode};

use crate::builder::TreeBuilder;
use crate::error::CompilationError;
use crate::node::Node;
use crate::registry::TagRegistry;

/// Turns raw markup into parse nodes.
///
/// `None` and an empty sequence both mean there is nothing to compile.
pub trait MarkupParser: Send + Sync {
    fn parse(&self, raw: &str) -> Option<Vec<ParseNode>>;
}

impl MarkupParser for BBParser {
    fn parse(&self, raw: &str) -> Option<Vec<ParseNode>> {
        Some(BBParser::parse(self, raw))
    }
}

impl<F> MarkupParser for F
where
    F: Fn(&str) -> Option<Vec<ParseNode>> + Send + Sync,
{
    fn parse(&self, raw: &str) -> Option<Vec<ParseNode>> {
        (self)(raw)
    }
}

/// Parser plus tag registry.
///
/// # Example
///
/// ```rust
/// use bbking::{CompilationError, Compiler};
///
/// let compiler = Compiler::default();
/// assert!(compiler.compile("[b]hi[/b]").is_ok());
/// assert_eq!(compiler.compile("").unwrap_err(), CompilationError::Empty);
/// assert_eq!(
///     compiler.compile("[ghost]boo[/ghost]").unwrap_err(),
///     CompilationError::tag_not_found("ghost")
/// );
/// ```
pub struct Compiler {
    parser: Box<dyn MarkupParser>,
    registry: TagRegistry,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(TagRegistry::default())
    }
}

impl Compiler {
    /// Creates a compiler using the bundled parser.
    pub fn new(registry: TagRegistry) -> Self {
        Self::with_parser(BBParser::default(), registry)
    }

    /// Creates a compiler using a custom parser.
    pub fn with_parser<P: MarkupParser + 'static>(parser: P, registry: TagRegistry) -> Self {
        Self {
            parser: Box::new(parser),
            registry,
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Compiles markup into a render tree.
    ///
    /// # Errors
    ///
    /// - [`CompilationError::Empty`] if the parser produced nothing
    /// - [`CompilationError::TagNotFound`] if the markup uses an unknown tag
    /// - [`CompilationError::LibraryNotFound`] if a configured library is missing
    pub fn compile(&self, raw: &str) -> Result<Node, CompilationError> {
        let nodes = match self.parser.parse(raw) {
            Some(nodes) if !nodes.is_empty() => nodes,
            _ => return Err(CompilationError::Empty),
        };
        TreeBuilder::new(&self.registry).build(&nodes)
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
