//! Tag template engine.
//!
//! [`TagTemplates`] owns a MiniJinja environment whose loader pulls template
//! source from a [`TemplateSource`] the first time a name is requested. The
//! environment keeps every template it compiles, so resolution happens once
//! per name and later renders reuse the compiled template.
//!
//! Templates whose names end in `.html` are auto-escaped with the same rules
//! as [`escape`](crate::markup::escape). Values bound as
//! [`Markup`](crate::Markup) are flagged safe and pass through untouched.

use std::fmt::Write;
use std::sync::Arc;

use minijinja::{
    escape_formatter, AutoEscape, Environment, Error, ErrorKind, Output, State, Value,
};

use super::filters::register_filters;
use super::registry::{TemplateRegistry, TemplateSource};
use crate::context::Frame;
use crate::error::RenderError;
use crate::markup::{escape, mark_safe, Markup};

/// Compiled, cached tag templates.
pub struct TagTemplates {
    env: Environment<'static>,
}

impl TagTemplates {
    /// Creates an engine that resolves templates through `source`.
    pub fn new<S: TemplateSource + 'static>(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    /// Creates an engine over a shared template source.
    pub fn from_shared(source: Arc<dyn TemplateSource>) -> Self {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.set_formatter(html_formatter);
        env.set_loader(move |name| {
            log::debug!("resolving template '{}'", name);
            source.load(name).map_err(|err| {
                Error::new(ErrorKind::InvalidOperation, "template source failed").with_source(err)
            })
        });
        Self { env }
    }

    /// Renders the named template against a flattened context frame.
    pub fn render(&self, name: &str, frame: Frame) -> Result<Markup, RenderError> {
        let template = self.env.get_template(name)?;
        let output = template.render(&frame)?;
        Ok(mark_safe(output))
    }

    /// Returns true if the named template can be resolved and compiled.
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters or functions for tag templates.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

/// Auto-escapes unsafe strings in HTML templates with [`escape`].
///
/// Everything else goes through MiniJinja's stock formatter.
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), Error> {
    match (state.auto_escape(), value.as_str()) {
        (AutoEscape::Html, Some(text)) if !value.is_safe() => out
            .write_str(escape(text).as_str())
            .map_err(|_| Error::new(ErrorKind::WriteFailure, "could not write output")),
        _ => escape_formatter(out, state, value),
    }
}

impl Default for TagTemplates {
    fn default() -> Self {
        Self::new(TemplateRegistry::builtin())
    }
}

impl std::fmt::Debug for TagTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagTemplates").finish_non_exhaustive()
    }
}
