//! Per-pass shared state.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::block::Block;
use crate::extension::Extensions;

/// Shared mutable state for one render pass.
///
/// The namespace is visible to every nested component and deferred segment in
/// the same pass, and to nothing outside it. The context also holds the bound
/// inner block that [`Renderer::emit_yield`](crate::Renderer::emit_yield)
/// splices in, and the extension registry.
///
/// # Example
///
/// ```
/// use rw_markup::RenderContext;
///
/// let mut ctx = RenderContext::new(None);
/// ctx.set("title", "Home");
/// assert_eq!(ctx.get("title").and_then(|v| v.as_str()), Some("Home"));
/// ```
#[derive(Debug, Default)]
pub struct RenderContext {
    namespace: Map<String, Value>,
    inner: Option<Block>,
    extensions: Arc<Extensions>,
}

impl RenderContext {
    /// Create a context with an optional inner block.
    #[must_use]
    pub fn new(inner: Option<Block>) -> Self {
        Self {
            namespace: Map::new(),
            inner,
            extensions: Arc::default(),
        }
    }

    /// Attach an extension registry.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Arc<Extensions>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Read a namespace value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.namespace.get(key)
    }

    /// Set a namespace value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.namespace.insert(key.into(), value.into())
    }

    /// Remove a namespace value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.namespace.shift_remove(key)
    }

    /// Whether `key` is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.namespace.contains_key(key)
    }

    /// The whole namespace, in insertion order.
    #[must_use]
    pub fn namespace(&self) -> &Map<String, Value> {
        &self.namespace
    }

    /// Mutable access to the namespace.
    pub fn namespace_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.namespace
    }

    /// The currently bound inner block.
    #[must_use]
    pub fn inner_block(&self) -> Option<&Block> {
        self.inner.as_ref()
    }

    /// The extension registry.
    #[must_use]
    pub fn extensions(&self) -> &Arc<Extensions> {
        &self.extensions
    }

    /// Swap the bound inner block, returning the previous one.
    pub(crate) fn replace_inner(&mut self, inner: Option<Block>) -> Option<Block> {
        std::mem::replace(&mut self.inner, inner)
    }
}
