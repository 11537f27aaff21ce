//! Quotation tag: `[quote]` and `[quote=author]`.

use crate::error::CompilationError;
use crate::tag::{ArgContract, TagDefinition, TagLibrary};

pub fn library() -> Result<TagLibrary, CompilationError> {
    let quote = TagDefinition::new("quote", ArgContract::Positional)?.with_usage([
        "[quote]Example Text[/quote]",
        "[quote=Author]Example Text[/quote]",
    ]);
    Ok(TagLibrary::new("quote").export(quote))
}
