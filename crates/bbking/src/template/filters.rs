//! MiniJinja filter registration.

use minijinja::{Environment, Value};

use crate::markup;

/// Registers the tag template filters on a minijinja environment.
///
/// - `linebreaksbr`: escapes its input unless already safe, then turns line
///   breaks into `<br>`. Usage: `{{ title | linebreaksbr }}`
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("linebreaksbr", |value: Value| -> Value {
        markup::linebreaksbr(&markup::conditional_escape(&value)).to_value()
    });
}
