//! Text formatting tags: `b`, `i`, `u`, `s`, `code` and `color`.

use minijinja::Value;

use crate::context::RenderContext;
use crate::error::{CompilationError, RenderError};
use crate::node::TagNode;
use crate::tag::{ArgContract, TagDefinition, TagLibrary};

pub fn library() -> Result<TagLibrary, CompilationError> {
    let mut library = TagLibrary::new("text");
    for name in ["b", "i", "u", "s", "code"] {
        library = library.export(TagDefinition::new(name, ArgContract::None)?);
    }
    let color = TagDefinition::new("color", ArgContract::Positional)?
        .with_hook(bind_color)
        .with_usage([
            "[color=red]Example Text[/color]",
            "[color=#ff0000]Example Text[/color]",
        ]);
    Ok(library.export(color))
}

fn bind_color(node: &TagNode, ctx: &mut RenderContext) -> Result<(), RenderError> {
    match node.arg().map(str::trim) {
        Some(color) if is_color(color) => ctx.insert("color", Value::from(color)),
        Some(color) => log::debug!("[color] ignoring invalid color '{}'", color),
        None => {}
    }
    Ok(())
}

/// `#rgb`, `#rrggbb`, or a bare colour name such as `red`.
fn is_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => (1..=32).contains(&value.len()) && value.chars().all(|c| c.is_ascii_alphabetic()),
    }
}
