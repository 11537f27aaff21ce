//! Markup to HTML in one place.

use crate::compiler::Compiler;
use crate::config::Config;
use crate::error::{CompilationError, ConfigError, Error, RenderError};
use crate::node::Node;
use crate::registry::{LibraryCatalog, TagRegistry};
use crate::render::Renderer;
use crate::template::{RegistryError, TagTemplates, TemplateRegistry};

/// A compiler and a renderer configured together.
///
/// # Example
///
/// ```rust
/// use bbking::{Config, Engine};
///
/// let engine = Engine::from_config(&Config::default()).unwrap();
/// let html = engine.render("[i]hello[/i]\nworld").unwrap();
/// assert_eq!(html, "<em>hello</em><br>world");
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    compiler: Compiler,
    renderer: Renderer,
}

impl Engine {
    pub fn new(compiler: Compiler, renderer: Renderer) -> Self {
        Self { compiler, renderer }
    }

    /// Builds an engine over the built-in library catalog.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::from_config_with_catalog(config, LibraryCatalog::builtin())
    }

    /// Builds an engine whose library identifiers resolve through `catalog`.
    pub fn from_config_with_catalog(
        config: &Config,
        catalog: LibraryCatalog,
    ) -> Result<Self, ConfigError> {
        let mut templates = TemplateRegistry::builtin();
        for dir in &config.template_dirs {
            templates.add_template_dir(dir).map_err(|err| match err {
                RegistryError::DirectoryNotFound { path } => ConfigError::TemplateDir(path),
                _ => ConfigError::TemplateDir(dir.clone()),
            })?;
        }

        let registry = TagRegistry::with_catalog(catalog, config.tag_libraries.iter().cloned());
        Ok(Self::new(
            Compiler::new(registry),
            Renderer::new(TagTemplates::new(templates)),
        ))
    }

    pub fn compile(&self, raw: &str) -> Result<Node, CompilationError> {
        self.compiler.compile(raw)
    }

    pub fn render_node(&self, node: &Node) -> Result<String, RenderError> {
        self.renderer.render(node)
    }

    /// Compiles and renders markup.
    pub fn render(&self, raw: &str) -> Result<String, Error> {
        let node = self.compile(raw)?;
        Ok(self.render_node(&node)?)
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }
}

/// Renders markup with the default libraries and templates.
///
/// Builds a fresh [`Engine`] on every call; keep an engine around when
/// rendering many documents.
pub fn to_html(raw: &str) -> Result<String, Error> {
    Engine::default().render(raw)
}
