//! Buffer and segment execution model.
//!
//! A [`Renderer`] accumulates markup in a single text buffer. The first call to
//! [`defer`](Renderer::defer) switches it to a segment list of literal text and
//! postponed callables; [`finish`](Renderer::finish) resolves that list in
//! registration order. Deferred callables run against the same
//! [`RenderContext`], so they observe namespace writes made after they were
//! registered.

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::attributes::{Attributes, encode_attributes, hyphenate};
use crate::block::{Args, Block, value_text};
use crate::config::MarkupConfig;
use crate::content::{Content, Emit};
use crate::context::RenderContext;
use crate::error::{RenderError, Result};
use crate::escape::MarkupMode;

/// Postponed callable together with the slot active when it was registered.
struct Deferred {
    body: Box<dyn FnOnce(&mut Renderer) -> Result<()>>,
    inner: Option<Block>,
}

/// Entry of the segment list.
enum Segment {
    /// Markup produced before a deferral.
    Literal(String),
    /// Callable resolved during [`Renderer::finish`].
    Deferred(Deferred),
}

/// Segment list being resolved, with the text that followed it.
struct Frame {
    pending: std::vec::IntoIter<Segment>,
    trailing: String,
    out: String,
}

impl Frame {
    fn new(segments: Vec<Segment>, trailing: String) -> Self {
        Self {
            pending: segments.into_iter(),
            trailing,
            out: String::new(),
        }
    }

    fn resolve(mut self) -> String {
        self.out.push_str(&self.trailing);
        self.out
    }
}

/// Precomputed `<name` and `</name>` fragments.
struct TagFragments {
    open: String,
    close: String,
}

impl TagFragments {
    fn new(name: &str) -> Self {
        let name = hyphenate(name);
        Self {
            open: format!("<{name}"),
            close: format!("</{name}>"),
        }
    }
}

/// Executes template logic for one render pass.
///
/// Every template, slot and deferred callable receives the active renderer
/// explicitly; nested components write into the same buffer.
///
/// # Example
///
/// ```
/// use rw_markup::{Attributes, MarkupConfig, MarkupMode, RenderContext, Renderer};
/// use std::sync::Arc;
///
/// let mut r = Renderer::new(
///     MarkupMode::Html,
///     RenderContext::new(None),
///     Arc::new(MarkupConfig::default()),
/// );
/// r.text("a ");
/// r.defer(|r| {
///     let who = r.get("who").and_then(|v| v.as_str()).unwrap_or("nobody").to_owned();
///     r.text(who);
///     Ok(())
/// });
/// r.tag("br", None::<&str>, &Attributes::new())?;
/// r.set("who", "<you>");
///
/// assert_eq!(r.finish()?, "a &lt;you&gt;<br/>");
/// # Ok::<(), rw_markup::RenderError>(())
/// ```
pub struct Renderer {
    mode: MarkupMode,
    buffer: String,
    segments: Option<Vec<Segment>>,
    context: RenderContext,
    config: Arc<MarkupConfig>,
    tag_cache: HashMap<String, TagFragments>,
}

impl Renderer {
    /// Create a renderer for one pass.
    #[must_use]
    pub fn new(mode: MarkupMode, context: RenderContext, config: Arc<MarkupConfig>) -> Self {
        Self {
            mode,
            buffer: String::with_capacity(config.buffer_capacity),
            segments: None,
            context,
            config,
            tag_cache: HashMap::new(),
        }
    }

    /// Active markup mode.
    #[must_use]
    pub fn mode(&self) -> MarkupMode {
        self.mode
    }

    /// Shared state of this pass.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Mutable shared state of this pass.
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    /// The namespace of this pass.
    #[must_use]
    pub fn namespace(&self) -> &Map<String, Value> {
        self.context.namespace()
    }

    /// Mutable access to the namespace of this pass.
    pub fn namespace_mut(&mut self) -> &mut Map<String, Value> {
        self.context.namespace_mut()
    }

    /// Read a namespace value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Set a namespace value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.context.set(key, value)
    }

    /// Append text, escaped per the active mode.
    pub fn text(&mut self, text: impl AsRef<str>) {
        let escaped = self.mode.escape_text(text.as_ref());
        self.buffer.push_str(&escaped);
    }

    /// Append the text form of a namespace value, escaped. Unset keys emit nothing.
    pub fn text_var(&mut self, key: &str) {
        if let Some(value) = self.context.get(key) {
            let text = value_text(value);
            self.buffer.push_str(&self.mode.escape_text(&text));
        }
    }

    /// Append trusted markup verbatim.
    pub fn raw(&mut self, markup: impl AsRef<str>) {
        self.buffer.push_str(markup.as_ref());
    }

    /// Emit a callable, raw text, or nothing.
    ///
    /// Callables are checked against `args` and run in this renderer, writing
    /// directly into the current buffer. Text is appended without escaping.
    pub fn emit(&mut self, value: impl Into<Emit>, args: &Args) -> Result<()> {
        match value.into() {
            Emit::Nothing => Ok(()),
            Emit::Raw(markup) => {
                self.buffer.push_str(&markup);
                Ok(())
            }
            Emit::Block(block) => block.call(self, args),
            Emit::Component(component) => component.run(self, args),
        }
    }

    /// Short alias for [`emit`](Self::emit).
    pub fn e(&mut self, value: impl Into<Emit>, args: &Args) -> Result<()> {
        self.emit(value, args)
    }

    /// Run the bound inner block in this renderer.
    pub fn emit_yield(&mut self, args: &Args) -> Result<()> {
        let inner = self
            .context
            .inner_block()
            .cloned()
            .ok_or(RenderError::NoInnerBlock)?;
        inner.call(self, args)
    }

    /// Run a registered extension in this renderer.
    pub fn extension(&mut self, name: &str, args: &Args) -> Result<()> {
        let Some(block) = self.context.extensions().get(name).cloned() else {
            tracing::warn!(extension = name, "Unknown extension requested");
            return Err(RenderError::UnknownExtension(name.to_owned()));
        };
        block.call(self, args)
    }

    /// Emit an element.
    ///
    /// Underscores in `name` become hyphens. Empty content self-closes the
    /// element; text is escaped; callables run between the open and close tags.
    pub fn tag(
        &mut self,
        name: &str,
        content: impl Into<Content>,
        attrs: &Attributes,
    ) -> Result<()> {
        self.write_open(name, attrs);
        match content.into() {
            Content::Empty => {
                self.buffer.push_str("/>");
                return Ok(());
            }
            Content::Text(text) => {
                self.buffer.push('>');
                self.text(text);
            }
            Content::Emit(value) => {
                self.buffer.push('>');
                self.emit(value, &Args::new())?;
            }
        }
        self.write_close(name);
        Ok(())
    }

    /// Emit an element whose body is produced by `block`, run immediately.
    pub fn tag_with<F>(&mut self, name: &str, attrs: &Attributes, block: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.write_open(name, attrs);
        self.buffer.push('>');
        block(self)?;
        self.write_close(name);
        Ok(())
    }

    /// Postpone `block` until [`finish`](Self::finish), keeping its position.
    ///
    /// Content written after the call is ordered after the block's output.
    /// The block sees the namespace as it stands when it runs, and the slot
    /// that is bound now.
    pub fn defer<F>(&mut self, block: F)
    where
        F: FnOnce(&mut Self) -> Result<()> + 'static,
    {
        let pending = mem::take(&mut self.buffer);
        let deferred = Deferred {
            body: Box::new(block),
            inner: self.context.inner_block().cloned(),
        };
        tracing::trace!(pending = pending.len(), "Deferring segment");

        if let Some(segments) = self.segments.as_mut() {
            if !pending.is_empty() {
                segments.push(Segment::Literal(pending));
            }
            segments.push(Segment::Deferred(deferred));
        } else {
            self.segments = Some(vec![
                Segment::Literal(pending),
                Segment::Deferred(deferred),
            ]);
        }
    }

    /// Resolve buffered and deferred segments into the final string.
    ///
    /// Without deferrals the buffer is returned as-is. Otherwise segments are
    /// walked in order with an explicit stack, so chains of nested deferrals do
    /// not grow the native call stack.
    pub fn finish(mut self) -> Result<String> {
        let trailing = mem::take(&mut self.buffer);
        let Some(segments) = self.segments.take() else {
            return Ok(trailing);
        };
        tracing::debug!(segments = segments.len(), "Resolving deferred segments");

        let mut stack: Vec<Frame> = Vec::new();
        let mut current = Frame::new(segments, trailing);
        loop {
            match current.pending.next() {
                Some(Segment::Literal(text)) => current.out.push_str(&text),
                Some(Segment::Deferred(deferred)) => {
                    let (output, nested) = self.run_deferred(deferred)?;
                    match nested {
                        None => current.out.push_str(&output),
                        Some(nested) => {
                            let parent = mem::replace(&mut current, Frame::new(nested, output));
                            stack.push(parent);
                        }
                    }
                }
                None => {
                    let resolved = current.resolve();
                    match stack.pop() {
                        Some(parent) => {
                            current = parent;
                            current.out.push_str(&resolved);
                        }
                        None => return Ok(resolved),
                    }
                }
            }
        }
    }

    /// Run a deferred callable into a fresh buffer/segment pair and take it.
    fn run_deferred(&mut self, deferred: Deferred) -> Result<(String, Option<Vec<Segment>>)> {
        tracing::trace!("Running deferred segment");
        let slot = self.context.replace_inner(deferred.inner);
        let result = (deferred.body)(self);
        self.context.replace_inner(slot);
        result?;
        Ok((mem::take(&mut self.buffer), self.segments.take()))
    }

    fn write_open(&mut self, name: &str, attrs: &Attributes) {
        if self.config.tag_cache {
            if let Some(fragments) = self.tag_cache.get(name) {
                self.buffer.push_str(&fragments.open);
            } else {
                let fragments = TagFragments::new(name);
                self.buffer.push_str(&fragments.open);
                self.tag_cache.insert(name.to_owned(), fragments);
            }
        } else {
            self.buffer.push_str(&TagFragments::new(name).open);
        }
        encode_attributes(attrs, &self.config.uri_attributes, &mut self.buffer);
    }

    fn write_close(&mut self, name: &str) {
        match self.tag_cache.get(name) {
            Some(fragments) => self.buffer.push_str(&fragments.close),
            None => self.buffer.push_str(&TagFragments::new(name).close),
        }
    }
}
