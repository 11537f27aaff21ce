//! Tag registry.
//!
//! The registry maps tag names to [`TagDefinition`]s. It is populated from an
//! ordered list of library identifiers, resolved through a [`LibraryCatalog`].
//!
//! # Loading
//!
//! Loading is lazy and happens once: the first [`TagRegistry::lookup`] (or an
//! explicit [`TagRegistry::ensure_loaded`]) loads every configured library in
//! order; later calls reuse the index. The one-time transition is guarded by a
//! [`OnceCell`], so concurrent first use loads exactly once and later lookups
//! do not lock.
//!
//! # Resolution
//!
//! Libraries are applied in configuration order. When two libraries export a
//! tag with the same name, the later library wins. Listing the same library
//! twice loads it once.
//!
//! # Example
//!
//! ```rust
//! use bbking::{ArgContract, LibraryCatalog, TagDefinition, TagLibrary, TagRegistry};
//!
//! let mut catalog = LibraryCatalog::builtin();
//! catalog.add("forum", || {
//!     Ok(TagLibrary::new("forum").export(TagDefinition::new("spoiler", ArgContract::None)?))
//! });
//!
//! let registry = TagRegistry::with_catalog(catalog, ["text", "forum"]);
//! assert!(registry.lookup("spoiler").is_ok());
//! assert!(registry.lookup("b").is_ok());
//! assert!(registry.lookup("quote").is_err());
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::CompilationError;
use crate::tag::{TagDefinition, TagLibrary};
use crate::tags;

/// Produces a library on demand.
pub type LibraryLoader = Arc<dyn Fn() -> Result<TagLibrary, CompilationError> + Send + Sync>;

/// Identifiers of the libraries loaded when nothing else is configured.
pub const DEFAULT_TAG_LIBRARIES: &[&str] = &["text", "hrefs", "quote"];

/// Maps library identifiers to loaders.
#[derive(Clone, Default)]
pub struct LibraryCatalog {
    loaders: HashMap<String, LibraryLoader>,
}

impl LibraryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with the built-in `text`, `hrefs` and `quote` libraries.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.add("text", tags::text::library);
        catalog.add("hrefs", tags::hrefs::library);
        catalog.add("quote", tags::quote::library);
        catalog
    }

    /// Registers a loader under an identifier, replacing any previous one.
    pub fn add<F>(&mut self, name: impl Into<String>, loader: F)
    where
        F: Fn() -> Result<TagLibrary, CompilationError> + Send + Sync + 'static,
    {
        self.loaders.insert(name.into(), Arc::new(loader));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    /// Gets the names of all cataloged libraries.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(|s| s.as_str())
    }

    fn load(&self, name: &str) -> Result<TagLibrary, CompilationError> {
        let loader = self
            .loaders
            .get(name)
            .ok_or_else(|| CompilationError::LibraryNotFound {
                name: name.to_string(),
            })?;
        loader()
    }
}

impl fmt::Debug for LibraryCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryCatalog")
            .field("libraries", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Name → definition index, loaded once on first use.
#[derive(Debug)]
pub struct TagRegistry {
    catalog: LibraryCatalog,
    libraries: Vec<String>,
    tags: OnceCell<HashMap<String, Arc<TagDefinition>>>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_LIBRARIES.iter().copied())
    }
}

impl TagRegistry {
    /// Creates a registry over the built-in catalog.
    pub fn new<I, S>(libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_catalog(LibraryCatalog::builtin(), libraries)
    }

    /// Creates a registry over a custom catalog.
    pub fn with_catalog<I, S>(catalog: LibraryCatalog, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog,
            libraries: libraries.into_iter().map(Into::into).collect(),
            tags: OnceCell::new(),
        }
    }

    /// Configured library identifiers, in load order.
    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    /// Returns true once the libraries have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.tags.get().is_some()
    }

    /// Loads the configured libraries if that has not happened yet.
    ///
    /// A failed load leaves the registry unloaded; the next call tries again.
    pub fn ensure_loaded(&self) -> Result<&HashMap<String, Arc<TagDefinition>>, CompilationError> {
        self.tags.get_or_try_init(|| self.register(&self.libraries))
    }

    /// Looks a tag up by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`CompilationError::TagNotFound`] if no loaded library exports
    /// the tag, or the loading error if the libraries could not be loaded.
    pub fn lookup(&self, name: &str) -> Result<Arc<TagDefinition>, CompilationError> {
        self.ensure_loaded()?
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| CompilationError::tag_not_found(name))
    }

    /// All loaded definitions, sorted by name.
    pub fn definitions(&self) -> Result<Vec<Arc<TagDefinition>>, CompilationError> {
        let mut definitions: Vec<_> = self.ensure_loaded()?.values().cloned().collect();
        definitions.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(definitions)
    }

    fn register(
        &self,
        libraries: &[String],
    ) -> Result<HashMap<String, Arc<TagDefinition>>, CompilationError> {
        let mut tags = HashMap::new();
        let mut seen = HashSet::new();

        for name in libraries {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let library = self.catalog.load(name)?;
            log::debug!(
                "loaded tag library '{}' ({} tags)",
                library.name(),
                library.exports().len()
            );
            for definition in library.into_exports() {
                let key = definition.name().to_string();
                if let Some(previous) = tags.insert(key, Arc::new(definition)) {
                    log::debug!("tag [{}] overridden by library '{}'", previous.name(), name);
                }
            }
        }

        Ok(tags)
    }
}
