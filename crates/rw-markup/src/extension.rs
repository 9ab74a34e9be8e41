//! Named capability registry.
//!
//! Extensions are blocks registered under a name and invoked from inside a
//! render pass with [`Renderer::extension`](crate::Renderer::extension). They
//! run in the caller's pass, so they share its buffer and namespace.

use std::collections::BTreeMap;

use crate::block::Block;

/// Registry of named extension blocks.
///
/// # Example
///
/// ```
/// use rw_markup::{Args, Block, Component, Extensions, MarkupMode};
///
/// let extensions = Extensions::new().register(
///     "badge",
///     Block::new(|r, args| {
///         r.raw("<b>");
///         r.text(args.str(0).unwrap_or_default());
///         r.raw("</b>");
///         Ok(())
///     }),
/// );
///
/// let page = Component::new(
///     Block::new(|r, _| r.extension("badge", &Args::new().arg("new"))),
///     MarkupMode::Html,
/// )
/// .with_extensions(extensions);
///
/// assert_eq!(page.render(&Args::new())?, "<b>new</b>");
/// # Ok::<(), rw_markup::RenderError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Extensions {
    entries: BTreeMap<String, Block>,
}

impl Extensions {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, block: Block) -> Self {
        self.insert(name, block);
        self
    }

    /// Register `block` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, block: Block) -> Option<Block> {
        self.entries.insert(name.into(), block)
    }

    /// Look up an extension.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.entries.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
