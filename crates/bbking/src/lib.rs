//! # BBKing - BBCode-style markup to HTML
//!
//! `bbking` compiles bracket-tagged markup (`[b]bold[/b]`, `[url=...]...[/url]`)
//! into a tree of render nodes, and renders that tree to HTML by giving each
//! tag its own template.
//!
//! ## Core Concepts
//!
//! - [`TagDefinition`]: one tag kind, with its [`ArgContract`], template and
//!   optional [`ContextHook`]
//! - [`TagLibrary`] / [`LibraryCatalog`]: named groups of definitions
//! - [`TagRegistry`]: tag name → definition, loaded once on first use
//! - [`Compiler`]: markup → [`Node`] tree
//! - [`Renderer`]: [`Node`] tree → HTML, through [`TagTemplates`]
//! - [`Engine`]: both of the above, built from a [`Config`]
//!
//! ## Quick Start
//!
//! ```rust
//! let html = bbking::to_html("[quote=Ann]Be [b]bold[/b].[/quote]").unwrap();
//! assert_eq!(
//!     html,
//!     "<blockquote><cite>Ann</cite>Be <strong>bold</strong>.</blockquote>"
//! );
//! ```
//!
//! ## Compile Once, Render Often
//!
//! Compiling and rendering are separate steps. A compiled tree is immutable
//! and can be rendered any number of times:
//!
//! ```rust
//! use bbking::{Compiler, RenderContext, Renderer};
//!
//! let tree = Compiler::default().compile("[i]hi[/i]").unwrap();
//! let renderer = Renderer::default();
//!
//! let plain = renderer.render(&tree).unwrap();
//! let mut ctx = RenderContext::new().with("site", "example.org");
//! let again = renderer.render_with_context(&tree, &mut ctx).unwrap();
//! assert_eq!(plain, again.as_str());
//! ```
//!
//! ## Custom Tags
//!
//! ```rust
//! use bbking::{
//!     ArgContract, Compiler, LibraryCatalog, Renderer, TagDefinition, TagLibrary,
//!     TagRegistry, TagTemplates, TemplateRegistry,
//! };
//!
//! let mut catalog = LibraryCatalog::builtin();
//! catalog.add("forum", || {
//!     Ok(TagLibrary::new("forum").export(TagDefinition::new("spoiler", ArgContract::None)?))
//! });
//!
//! let mut templates = TemplateRegistry::builtin();
//! templates.add_inline("tags/spoiler.html", "<details>{{ contents }}</details>");
//!
//! let compiler = Compiler::new(TagRegistry::with_catalog(catalog, ["text", "forum"]));
//! let renderer = Renderer::new(TagTemplates::new(templates));
//!
//! let tree = compiler.compile("[spoiler][b]boo[/b][/spoiler]").unwrap();
//! assert_eq!(
//!     renderer.render(&tree).unwrap(),
//!     "<details><strong>boo</strong></details>"
//! );
//! ```

mod builder;
mod compiler;
mod config;
pub mod context;
mod engine;
mod error;
pub mod markup;
mod node;
mod registry;
mod render;
mod tag;
pub mod tags;
pub mod template;

pub use builder::TreeBuilder;
pub use compiler::{Compiler, MarkupParser};
pub use config::Config;
pub use context::{Frame, FrameGuard, RenderContext};
pub use engine::{to_html, Engine};
pub use error::{CompilationError, ConfigError, Error, RenderError};
pub use markup::Markup;
pub use node::{BlockNode, LiteralNode, Node, TagArgs, TagNode};
pub use registry::{LibraryCatalog, LibraryLoader, TagRegistry, DEFAULT_TAG_LIBRARIES};
pub use render::{Renderer, RESERVED_KEYS};
pub use tag::{ArgContract, ContextHook, TagDefinition, TagLibrary};
pub use template::{TagTemplates, TemplateRegistry, TemplateSource};

// Parser types, for callers that supply their own parse nodes
pub use bbking_parser::{BBParser, ParseNode, Tagged};
