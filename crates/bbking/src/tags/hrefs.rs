//! Hyperlink tags: `url` and `img`.
//!
//! Both tags take their target from markup, so both refuse targets with a
//! scheme outside [`SAFE_SCHEMES`]. Relative targets are allowed. A refused
//! link renders its contents as plain text; a refused image renders nothing.

use minijinja::Value;

use crate::context::RenderContext;
use crate::error::{CompilationError, RenderError};
use crate::node::TagNode;
use crate::tag::{ArgContract, TagDefinition, TagLibrary};

/// URL schemes a link or image may use.
pub const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "ftp"];

pub fn library() -> Result<TagLibrary, CompilationError> {
    let url = TagDefinition::new("url", ArgContract::Positional)?
        .with_hook(bind_href)
        .with_usage([
            "[url]http://example.com[/url]",
            "[url=http://example.com]Example Text[/url]",
        ]);
    let img = TagDefinition::new("img", ArgContract::Keywords)?
        .with_hook(bind_src)
        .with_usage([
            "[img]http://example.com/image.png[/img]",
            "[img width=100 height=50 alt=\"Example\"]http://example.com/image.png[/img]",
        ]);
    Ok(TagLibrary::new("hrefs").export(url).export(img))
}

/// Returns the trimmed target if it is relative or uses a safe scheme.
pub fn safe_target(target: &str) -> Option<&str> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    match scheme(target) {
        Some(scheme) => SAFE_SCHEMES
            .iter()
            .any(|safe| safe.eq_ignore_ascii_case(scheme))
            .then_some(target),
        None => Some(target),
    }
}

/// The scheme of an absolute URL, if the target has one.
fn scheme(target: &str) -> Option<&str> {
    let end = target.find(|c: char| matches!(c, ':' | '/' | '?' | '#'))?;
    if target[end..].starts_with(':') {
        Some(&target[..end])
    } else {
        None
    }
}

fn bind_href(node: &TagNode, ctx: &mut RenderContext) -> Result<(), RenderError> {
    let target = match node.arg() {
        Some(arg) => arg.to_string(),
        None => node.contents().plain_text(),
    };
    match safe_target(&target) {
        Some(href) => ctx.insert("href", Value::from(href)),
        None => log::debug!("[url] dropping unsafe target '{}'", target),
    }
    Ok(())
}

fn bind_src(node: &TagNode, ctx: &mut RenderContext) -> Result<(), RenderError> {
    let target = node.contents().plain_text();
    match safe_target(&target) {
        Some(src) => ctx.insert("src", Value::from(src)),
        None => log::debug!("[img] dropping unsafe source '{}'", target),
    }
    for key in ["width", "height"] {
        let numeric = node
            .kwargs()
            .and_then(|kwargs| kwargs.get(key))
            .is_some_and(|value| value.parse::<u32>().is_ok());
        if !numeric {
            ctx.remove(key);
        }
    }
    Ok(())
}
