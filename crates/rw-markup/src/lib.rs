//! Component-based HTML/XML markup generation.
//!
//! This crate renders trees of [`Component`]s into a single markup string.
//! Template logic is ordinary Rust code operating on an explicit [`Renderer`].
//!
//! # Architecture
//!
//! - [`Component`]: immutable template + [`MarkupMode`] + optional bound slot.
//!   Each render pass allocates a fresh [`Renderer`] and [`RenderContext`].
//! - [`Renderer`]: text buffer plus an optional segment list. Nested
//!   components run in the same renderer and share its buffer and namespace.
//! - [`Renderer::defer`]: postpones a callable until the end of the pass while
//!   keeping its position, so content can depend on state set later.
//! - [`Renderer::emit_yield`]: splices the caller-supplied inner block.
//! - Escaping: text is escaped once, as it enters the buffer; URI-bearing
//!   attributes are percent-encoded.
//!
//! # Example
//!
//! ```
//! use rw_markup::{Args, Attributes, Block, Component, MarkupMode};
//!
//! let page = Component::new(
//!     Block::new(|r, _args| {
//!         r.tag_with("ul", &Attributes::new(), |r| {
//!             r.li("first", &Attributes::new())?;
//!             r.defer(|r| {
//!                 let count = r.get("count").cloned().unwrap_or_default();
//!                 r.li(format!("count: {count}"), &Attributes::new())
//!             });
//!             r.set("count", 2);
//!             Ok(())
//!         })
//!     }),
//!     MarkupMode::Html,
//! );
//!
//! assert_eq!(
//!     page.render(&Args::new())?,
//!     "<ul><li>first</li><li>count: 2</li></ul>"
//! );
//! # Ok::<(), rw_markup::RenderError>(())
//! ```

mod attributes;
mod block;
mod component;
mod config;
mod content;
mod context;
mod error;
mod escape;
mod extension;
mod renderer;
mod tags;

pub use attributes::{AttrValue, Attributes};
pub use block::{Args, Block, Signature, value_text};
pub use component::Component;
pub use config::MarkupConfig;
pub use content::{Content, Emit};
pub use context::RenderContext;
pub use error::{ParameterKind, RenderError, Result};
pub use escape::{MarkupMode, escape_html, escape_uri, escape_xml};
pub use extension::Extensions;
pub use renderer::Renderer;
