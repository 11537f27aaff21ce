//! HTML-safe text.
//!
//! Everything a node renders is [`Markup`]: text that is already escaped and
//! must not be escaped again. Raw input only becomes markup through
//! [`escape`], [`conditional_escape`] or an explicit [`mark_safe`].

use std::fmt;
use std::ops::Deref;

use minijinja::Value;

/// Text that is safe to embed in HTML as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Creates empty markup.
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Appends already-safe markup.
    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Converts to a template value flagged as safe, so auto-escaping leaves it alone.
    pub fn to_value(&self) -> Value {
        Value::from_safe_string(self.0.clone())
    }
}

impl Deref for Markup {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

impl From<Markup> for Value {
    fn from(markup: Markup) -> Self {
        Value::from_safe_string(markup.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::new();
        for part in iter {
            out.push(&part);
        }
        out
    }
}

/// Declares text safe without escaping it.
pub fn mark_safe(text: impl Into<String>) -> Markup {
    Markup(text.into())
}

/// Escapes markup-sensitive characters.
///
/// Only `&`, `<`, `>`, `"` and `'` are replaced. Everything else, slashes
/// included, is kept verbatim.
pub fn escape(raw: &str) -> Markup {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    Markup(out)
}

/// Escapes a value unless it is already flagged as safe.
///
/// Applying this to its own output is a no-op.
pub fn conditional_escape(value: &Value) -> Markup {
    if value.is_safe() {
        return Markup(value.to_string());
    }
    match value.as_str() {
        Some(text) => escape(text),
        None => escape(&value.to_string()),
    }
}

/// Turns every line break into `<br>`.
///
/// `\r\n` and lone `\r` count as one break each.
pub fn linebreaksbr(markup: &Markup) -> Markup {
    let normalized = markup.0.replace("\r\n", "\n").replace('\r', "\n");
    Markup(normalized.replace('\n', "<br>"))
}
