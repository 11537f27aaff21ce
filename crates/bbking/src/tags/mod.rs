//! Built-in tag libraries.
//!
//! | Library | Tags |
//! |---------|------|
//! | `text` | `b`, `i`, `u`, `s`, `code`, `color` |
//! | `hrefs` | `url`, `img` |
//! | `quote` | `quote` |
//!
//! Each library is a plain loader function, registered in
//! [`LibraryCatalog::builtin`](crate::LibraryCatalog::builtin). Their default
//! templates live in `templates/tags/` and are compiled into the crate.

pub mod hrefs;
pub mod quote;
pub mod text;

/// Default templates for the built-in tags, as `(name, source)` pairs.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("tags/b.html", include_str!("../../templates/tags/b.html")),
    ("tags/i.html", include_str!("../../templates/tags/i.html")),
    ("tags/u.html", include_str!("../../templates/tags/u.html")),
    ("tags/s.html", include_str!("../../templates/tags/s.html")),
    ("tags/code.html", include_str!("../../templates/tags/code.html")),
    ("tags/color.html", include_str!("../../templates/tags/color.html")),
    ("tags/url.html", include_str!("../../templates/tags/url.html")),
    ("tags/img.html", include_str!("../../templates/tags/img.html")),
    ("tags/quote.html", include_str!("../../templates/tags/quote.html")),
];
