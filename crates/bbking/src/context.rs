//! Scoped template context.
//!
//! Every tag renders its template against a fresh frame layered on top of
//! whatever the enclosing tags (and the caller) have bound. Frames nest
//! strictly: a tag pushes exactly one frame on entry and pops it on exit.
//!
//! # Overview
//!
//! - [`RenderContext`]: a stack of frames. Lookups walk from the innermost
//!   frame outwards, so inner bindings shadow outer ones without destroying
//!   them.
//! - [`FrameGuard`]: returned by [`RenderContext::push`]. The frame is popped
//!   when the guard is dropped, which covers early returns through `?` and
//!   unwinding as well as normal exit.
//!
//! # Example
//!
//! ```rust
//! use bbking::RenderContext;
//! use minijinja::Value;
//!
//! let mut ctx = RenderContext::new().with("site", "example.org");
//! {
//!     let mut frame = ctx.push();
//!     frame.insert("arg", "Alice");
//!     assert_eq!(frame.get("arg"), Some(&Value::from("Alice")));
//!     assert_eq!(frame.get("site"), Some(&Value::from("example.org")));
//! }
//! assert_eq!(ctx.get("arg"), None);
//! assert_eq!(ctx.depth(), 1);
//! ```

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use minijinja::Value;

/// One scope of named values.
pub type Frame = BTreeMap<String, Value>;

/// A stack of context frames for a single render call.
///
/// A context is never shared between concurrent renders; each render of a
/// tree uses its own. The bottom frame holds caller-supplied bindings and is
/// never popped.
#[derive(Debug, Clone)]
pub struct RenderContext {
    frames: Vec<Frame>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Creates a context with a single, empty base frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    /// Adds a binding to the current frame, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Opens a new frame on top of the stack.
    ///
    /// The frame lives as long as the returned guard.
    pub fn push(&mut self) -> FrameGuard<'_> {
        self.frames.push(Frame::new());
        FrameGuard { ctx: self }
    }

    /// Binds a value in the innermost frame.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(key.into(), value.into());
        }
    }

    /// Removes a binding from the innermost frame only.
    ///
    /// Outer bindings of the same key become visible again.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.frames.last_mut().and_then(|frame| frame.remove(key))
    }

    /// Looks a key up, innermost frame first.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(key))
    }

    /// Number of frames, including the base frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Merges all frames into the single view handed to a template.
    pub fn flatten(&self) -> Frame {
        let mut merged = Frame::new();
        for frame in &self.frames {
            for (key, value) in frame {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    fn pop(&mut self) {
        // The base frame stays
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }
}

/// Keeps a pushed frame alive; pops it when dropped.
#[derive(Debug)]
pub struct FrameGuard<'a> {
    ctx: &'a mut RenderContext,
}

impl Deref for FrameGuard<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        self.ctx
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut RenderContext {
        self.ctx
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.ctx.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_base_frame() {
        let ctx = RenderContext::new();
        assert_eq!(ctx.depth(), 1);
        assert!(ctx.flatten().is_empty());
    }

    #[test]
    fn push_shadows_without_destroying() {
        let mut ctx = RenderContext::new().with("arg", "outer");
        {
            let mut frame = ctx.push();
            frame.insert("arg", "inner");
            assert_eq!(frame.get("arg"), Some(&Value::from("inner")));
            assert_eq!(frame.depth(), 2);
        }
        assert_eq!(ctx.get("arg"), Some(&Value::from("outer")));
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut ctx = RenderContext::new();
        {
            let mut outer = ctx.push();
            outer.insert("contents", "a");
            {
                let mut inner = outer.push();
                inner.insert("contents", "b");
                assert_eq!(inner.depth(), 3);
                assert_eq!(inner.get("contents"), Some(&Value::from("b")));
            }
            assert_eq!(outer.depth(), 2);
            assert_eq!(outer.get("contents"), Some(&Value::from("a")));
        }
        assert_eq!(ctx.get("contents"), None);
    }

    #[test]
    fn guard_pops_on_early_return() {
        fn fails(ctx: &mut RenderContext) -> Result<i32, String> {
            let mut frame = ctx.push();
            frame.insert("arg", "x");
            let width = "wide".parse::<i32>().map_err(|e| e.to_string())?;
            Ok(width)
        }

        let mut ctx = RenderContext::new();
        assert!(fails(&mut ctx).is_err());
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.get("arg"), None);
    }

    #[test]
    fn flatten_prefers_inner_frames() {
        let mut ctx = RenderContext::new().with("a", 1).with("b", 2);
        let mut frame = ctx.push();
        frame.insert("b", 3);
        let merged = frame.flatten();
        assert_eq!(merged.get("a"), Some(&Value::from(1)));
        assert_eq!(merged.get("b"), Some(&Value::from(3)));
    }

    #[test]
    fn remove_uncovers_outer_binding() {
        let mut ctx = RenderContext::new().with("width", "10");
        let mut frame = ctx.push();
        frame.insert("width", "wide");
        assert_eq!(frame.remove("width"), Some(Value::from("wide")));
        assert_eq!(frame.get("width"), Some(&Value::from("10")));
        assert_eq!(frame.remove("width"), None);
    }
}
