//! Tag definitions and the libraries that export them.
//!
//! A [`TagDefinition`] describes one tag kind: its name, which arguments it
//! accepts, which template renders it, and optionally a [`ContextHook`] that
//! adds bindings before the template runs. Definitions are grouped into
//! [`TagLibrary`] values, which is what the registry loads.
//!
//! # Example
//!
//! ```rust
//! use bbking::{ArgContract, TagDefinition, TagLibrary};
//!
//! # fn main() -> Result<(), bbking::CompilationError> {
//! let library = TagLibrary::new("forum")
//!     .export(TagDefinition::new("spoiler", ArgContract::None)?)
//!     .export(TagDefinition::new("user", ArgContract::Positional)?.with_template("tags/user.html"));
//!
//! assert_eq!(library.exports().len(), 2);
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::error::{CompilationError, RenderError};
use crate::node::TagNode;

/// Which arguments a tag accepts.
///
/// A tag accepts at most one kind of argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgContract {
    /// `[name]...[/name]`
    None,
    /// `[name=value]...[/name]`
    Positional,
    /// `[name key=value ...]...[/name]`
    Keywords,
}

impl fmt::Display for ArgContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArgContract::None => "no arguments",
            ArgContract::Positional => "positional argument",
            ArgContract::Keywords => "keyword arguments",
        };
        f.write_str(label)
    }
}

/// Adds context bindings derived from a tag node before its template renders.
///
/// Hooks run inside the tag's own frame, after `contents` and the arguments
/// have been bound, so they can read those and add or replace entries.
///
/// A blanket implementation is provided for closures:
///
/// ```rust
/// use bbking::{ArgContract, RenderContext, RenderError, TagDefinition, TagNode};
///
/// # fn main() -> Result<(), bbking::CompilationError> {
/// let shout = TagDefinition::new("shout", ArgContract::None)?.with_hook(
///     |_node: &TagNode, ctx: &mut RenderContext| -> Result<(), RenderError> {
///         ctx.insert("volume", "loud");
///         Ok(())
///     },
/// );
/// assert!(shout.hook().is_some());
/// # Ok(())
/// # }
/// ```
pub trait ContextHook: Send + Sync {
    fn extend(&self, node: &TagNode, ctx: &mut RenderContext) -> Result<(), RenderError>;
}

impl<F> ContextHook for F
where
    F: Fn(&TagNode, &mut RenderContext) -> Result<(), RenderError> + Send + Sync,
{
    fn extend(&self, node: &TagNode, ctx: &mut RenderContext) -> Result<(), RenderError> {
        (self)(node, ctx)
    }
}

/// One tag kind.
///
/// Definitions are immutable once built and shared by every node of their
/// kind through an `Arc`.
#[derive(Clone)]
pub struct TagDefinition {
    name: String,
    contract: ArgContract,
    template: Option<String>,
    hook: Option<Arc<dyn ContextHook>>,
    usage: Option<Vec<String>>,
}

impl TagDefinition {
    /// Creates a definition.
    ///
    /// Tag names are case-insensitive and stored in ASCII lowercase, matching
    /// what the parser produces for `[B]` or `[Quote]`.
    ///
    /// # Errors
    ///
    /// Returns [`CompilationError::UnnamedTag`] if `name` is blank.
    pub fn new(name: impl Into<String>, contract: ArgContract) -> Result<Self, CompilationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CompilationError::UnnamedTag);
        }
        Ok(Self {
            name: name.to_ascii_lowercase(),
            contract,
            template: None,
            hook: None,
            usage: None,
        })
    }

    /// Renders this tag with the named template instead of `tags/<name>.html`.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Installs a context hook.
    pub fn with_hook<H: ContextHook + 'static>(mut self, hook: H) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Replaces the generated usage examples.
    pub fn with_usage<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.usage = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contract(&self) -> ArgContract {
        self.contract
    }

    pub fn takes_arg(&self) -> bool {
        self.contract == ArgContract::Positional
    }

    pub fn takes_kwargs(&self) -> bool {
        self.contract == ArgContract::Keywords
    }

    pub fn hook(&self) -> Option<&dyn ContextHook> {
        self.hook.as_deref()
    }

    /// Name of the template that renders this tag.
    pub fn template_name(&self) -> Cow<'_, str> {
        match &self.template {
            Some(template) => Cow::Borrowed(template),
            None => Cow::Owned(format!("tags/{}.html", self.name)),
        }
    }

    /// Example markup showing how the tag is written.
    pub fn usage(&self) -> Vec<String> {
        if let Some(lines) = &self.usage {
            return lines.clone();
        }
        let name = &self.name;
        let line = match self.contract {
            ArgContract::None => format!("[{name}]Example Text[/{name}]"),
            ArgContract::Positional => format!("[{name}=value]Example Text[/{name}]"),
            ArgContract::Keywords => format!("[{name} key=value]Example Text[/{name}]"),
        };
        vec![line]
    }
}

impl fmt::Debug for TagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagDefinition")
            .field("name", &self.name)
            .field("contract", &self.contract)
            .field("template", &self.template_name())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// A named group of tag definitions.
///
/// Export order matters: when two exports share a name, the later one wins.
#[derive(Debug, Clone)]
pub struct TagLibrary {
    name: String,
    exports: Vec<TagDefinition>,
}

impl TagLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exports: Vec::new(),
        }
    }

    /// Adds a definition to the export list.
    pub fn export(mut self, definition: TagDefinition) -> Self {
        self.exports.push(definition);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exports(&self) -> &[TagDefinition] {
        &self.exports
    }

    pub fn into_exports(self) -> Vec<TagDefinition> {
        self.exports
    }
}
