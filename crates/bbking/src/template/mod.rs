//! Tag templates.
//!
//! Each tag kind renders through a named template (by default
//! `tags/<name>.html`). Template source comes from a [`TemplateSource`],
//! usually a [`TemplateRegistry`]; [`TagTemplates`] compiles it on first use
//! and keeps the compiled template for later renders.
//!
//! ## Template Context
//!
//! A tag template sees the merged context of every enclosing frame plus its
//! own bindings:
//!
//! | Key | Value |
//! |-----|-------|
//! | `contents` | The tag's rendered children, already safe |
//! | `arg` | The positional argument, for positional tags |
//! | any kwarg | Each keyword argument under its own key, for keyword tags |
//!
//! Context hooks may add further keys (for example `href` for `[url]`).

mod engine;
pub mod filters;
pub mod registry;

pub use engine::TagTemplates;
pub use registry::{RegistryError, TemplateRegistry, TemplateSource};
