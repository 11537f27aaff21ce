//! Template source resolution.
//!
//! [`TemplateRegistry`] answers "what is the source of template `name`?" from
//! three tiers, checked in this order:
//!
//! 1. Inline templates added with [`TemplateRegistry::add_inline`]
//! 2. Template directories, in registration order (first directory wins);
//!    `tags/b.html` resolves to `<dir>/tags/b.html`
//! 3. Built-in defaults shipped with the crate
//!
//! Directory templates are read from disk when they are resolved, not when
//! the directory is registered. The template engine caches what it compiles,
//! so each name is read at most once per [`TagTemplates`](super::TagTemplates).
//!
//! # Example
//!
//! ```rust
//! use bbking::template::{TemplateRegistry, TemplateSource};
//!
//! let mut registry = TemplateRegistry::builtin();
//! registry.add_inline("tags/b.html", "<strong>{{ contents }}</strong>");
//!
//! let source = registry.load("tags/b.html").unwrap();
//! assert_eq!(source.as_deref(), Some("<strong>{{ contents }}</strong>"));
//! assert!(registry.load("tags/nope.html").unwrap().is_none());
//! ```

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::tags::BUILTIN_TEMPLATES;

/// Error type for template source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A registered template directory does not exist.
    DirectoryNotFound {
        /// The directory that was given
        path: PathBuf,
    },

    /// A template name tries to leave its template directory.
    InvalidName {
        /// The name that was requested
        name: String,
    },

    /// Failed to read template file from disk.
    ReadError {
        /// Path that failed to read
        path: PathBuf,
        /// Error message
        message: String,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::DirectoryNotFound { path } => {
                write!(f, "Template directory not found: {}", path.display())
            }
            RegistryError::InvalidName { name } => {
                write!(f, "Invalid template name: \"{}\"", name)
            }
            RegistryError::ReadError { path, message } => {
                write!(
                    f,
                    "Failed to read template \"{}\": {}",
                    path.display(),
                    message
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Something that can produce template source by name.
///
/// `Ok(None)` means the source does not know the template; errors are for
/// templates that exist but cannot be read.
pub trait TemplateSource: Send + Sync {
    fn load(&self, name: &str) -> Result<Option<String>, RegistryError>;
}

/// Registry for template resolution from multiple sources.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    /// Inline templates (highest priority).
    inline: HashMap<String, String>,

    /// Template directories, searched in order.
    dirs: Vec<PathBuf>,

    /// Built-in templates (lowest priority fallback).
    builtin: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Creates an empty template registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in tag templates.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.add_builtin_entries(BUILTIN_TEMPLATES);
        registry
    }

    /// Adds an inline template with the given name.
    ///
    /// Inline templates have the highest priority and will shadow any
    /// directory or built-in template with the same name.
    pub fn add_inline(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.inline.insert(name.into(), content.into());
    }

    /// Adds a template directory to search for files.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DirectoryNotFound`] if the directory doesn't exist.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RegistryError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(RegistryError::DirectoryNotFound {
                path: path.to_path_buf(),
            });
        }
        self.dirs.push(path.to_path_buf());
        Ok(())
    }

    /// Adds built-in templates from `(name, content)` pairs.
    pub fn add_builtin_entries(&mut self, entries: &[(&str, &str)]) {
        for (name, content) in entries {
            self.builtin.insert(name.to_string(), content.to_string());
        }
    }

    /// Template directories, in search order.
    pub fn template_dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    fn read_from_dirs(&self, name: &str) -> Result<Option<String>, RegistryError> {
        let relative = Path::new(name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }

        for dir in &self.dirs {
            let path = dir.join(relative);
            if !path.is_file() {
                continue;
            }
            return std::fs::read_to_string(&path)
                .map(Some)
                .map_err(|e| RegistryError::ReadError {
                    path,
                    message: e.to_string(),
                });
        }
        Ok(None)
    }
}

impl TemplateSource for TemplateRegistry {
    fn load(&self, name: &str) -> Result<Option<String>, RegistryError> {
        if let Some(content) = self.inline.get(name) {
            return Ok(Some(content.clone()));
        }
        if let Some(content) = self.read_from_dirs(name)? {
            log::debug!("template '{}' loaded from template directory", name);
            return Ok(Some(content));
        }
        Ok(self.builtin.get(name).cloned())
    }
}
