//! Error types for compiling and rendering markup.
//!
//! Compilation and rendering fail for different reasons and at different
//! times, so they have separate types:
//!
//! - [`CompilationError`]: structural problems found while turning markup into
//!   a node tree (empty document, unknown tag, unnamed tag definition).
//! - [`RenderError`]: problems found while producing output (missing or broken
//!   templates, failing context hooks).
//!
//! [`Error`] wraps both, plus configuration failures, for callers that go
//! straight from markup to HTML.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a node tree.
///
/// None of these are recoverable mid-compile: the first one aborts the whole
/// compilation and no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationError {
    /// The parser produced no nodes for the document.
    #[error("nothing to compile: the document is empty")]
    Empty,

    /// A tagged node names a tag that no loaded library exports.
    #[error("{name} is not a valid tag name")]
    TagNotFound { name: String },

    /// A tag definition was constructed without a name.
    #[error("tag definitions must have a name")]
    UnnamedTag,

    /// A configured tag library identifier is not in the catalog.
    #[error("tag library '{name}' is not available")]
    LibraryNotFound { name: String },
}

impl CompilationError {
    /// Create a tag-not-found error.
    pub fn tag_not_found(name: impl Into<String>) -> Self {
        Self::TagNotFound { name: name.into() }
    }
}

/// Error type for template rendering operations.
///
/// This error type provides a stable API that doesn't expose implementation details
/// of the underlying template engine.
#[derive(Debug)]
pub enum RenderError {
    /// Template syntax error or compilation failure.
    TemplateError(String),

    /// Template not found by any template source.
    TemplateNotFound(String),

    /// A tag's context hook refused to render.
    HookError { tag: String, message: String },

    /// Other operational error.
    OperationError(String),
}

impl RenderError {
    /// Create a hook error for the given tag.
    pub fn hook(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HookError {
            tag: tag.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateError(msg) => write!(f, "template error: {}", msg),
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::HookError { tag, message } => {
                write!(f, "[{}] cannot be rendered: {}", tag, message)
            }
            RenderError::OperationError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::TemplateError(err.to_string()),
            _ => RenderError::OperationError(err.to_string()),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML for [`Config`](crate::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A configured template directory does not exist.
    #[error("template directory not found: {0}")]
    TemplateDir(PathBuf),
}

/// Any failure on the way from markup to HTML.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Compilation(#[from] CompilationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
