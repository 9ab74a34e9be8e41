//! Immutable, reusable components.

use std::sync::Arc;

use crate::block::{Args, Block};
use crate::config::MarkupConfig;
use crate::context::RenderContext;
use crate::error::Result;
use crate::escape::MarkupMode;
use crate::extension::Extensions;
use crate::renderer::Renderer;

/// A template plus its markup mode and optional bound slot.
///
/// Components are never mutated by rendering: each [`render`](Self::render)
/// allocates its own [`Renderer`] and [`RenderContext`], so one component can
/// be rendered repeatedly and from several threads at once.
///
/// # Example
///
/// ```
/// use rw_markup::{Args, Attributes, Block, Component, MarkupMode, Signature};
///
/// let card = Component::new(
///     Block::with_signature(Signature::new().required("title"), |r, args| {
///         r.tag_with("section", &Attributes::new(), |r| {
///             r.h2(args.str(0).unwrap_or_default(), &Attributes::new())?;
///             r.emit_yield(&Args::new())
///         })
///     }),
///     MarkupMode::Html,
/// );
///
/// let filled = card.apply(Block::new(|r, _| {
///     r.text("Body & more");
///     Ok(())
/// }));
///
/// assert_eq!(
///     filled.render(&Args::new().arg("Card"))?,
///     "<section><h2>Card</h2>Body &amp; more</section>"
/// );
/// assert!(card.render(&Args::new()).is_err());
/// # Ok::<(), rw_markup::RenderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Component {
    template: Block,
    mode: MarkupMode,
    inner: Option<Block>,
    config: Arc<MarkupConfig>,
    extensions: Arc<Extensions>,
}

impl Component {
    /// Create a component from a template and mode.
    #[must_use]
    pub fn new(template: Block, mode: MarkupMode) -> Self {
        Self {
            template,
            mode,
            inner: None,
            config: Arc::default(),
            extensions: Arc::default(),
        }
    }

    /// Create a component from a mode name (`"html"` or `"xml"`).
    ///
    /// Fails with [`RenderError::InvalidMode`](crate::RenderError::InvalidMode)
    /// for any other name.
    pub fn create(template: Block, mode: &str) -> Result<Self> {
        Ok(Self::new(template, mode.parse()?))
    }

    /// HTML component.
    #[must_use]
    pub fn html(template: Block) -> Self {
        Self::new(template, MarkupMode::Html)
    }

    /// XML component.
    #[must_use]
    pub fn xml(template: Block) -> Self {
        Self::new(template, MarkupMode::Xml)
    }

    /// Component using the mode and settings of `config`.
    #[must_use]
    pub fn from_config(template: Block, config: Arc<MarkupConfig>) -> Self {
        Self::new(template, config.mode).with_config(config)
    }

    /// Replace the render configuration.
    #[must_use]
    pub fn with_config(mut self, config: Arc<MarkupConfig>) -> Self {
        self.config = config;
        self
    }

    /// Attach an extension registry, available to every pass of this component.
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl Into<Arc<Extensions>>) -> Self {
        self.extensions = extensions.into();
        self
    }

    /// Markup mode.
    #[must_use]
    pub fn mode(&self) -> MarkupMode {
        self.mode
    }

    /// Bound inner block, if any.
    #[must_use]
    pub fn inner_block(&self) -> Option<&Block> {
        self.inner.as_ref()
    }

    /// Return a new component with `inner` bound as its slot.
    ///
    /// Nothing runs until the result is rendered; `self` is left unchanged.
    #[must_use]
    pub fn apply(&self, inner: Block) -> Self {
        Self {
            inner: Some(inner),
            ..self.clone()
        }
    }

    /// Render with the bound inner block.
    pub fn render(&self, args: &Args) -> Result<String> {
        self.render_pass(args, self.inner.clone())
    }

    /// Render with `inner` as the slot, overriding any bound one.
    pub fn render_with(&self, args: &Args, inner: Block) -> Result<String> {
        self.render_pass(args, Some(inner))
    }

    fn render_pass(&self, args: &Args, inner: Option<Block>) -> Result<String> {
        tracing::debug!(mode = %self.mode, "Starting render pass");
        let context = RenderContext::new(inner).with_extensions(Arc::clone(&self.extensions));
        let mut renderer = Renderer::new(self.mode, context, Arc::clone(&self.config));
        self.template.call(&mut renderer, args)?;
        let output = renderer.finish()?;
        tracing::debug!(len = output.len(), "Render pass finished");
        Ok(output)
    }

    /// Run the template inside an existing pass.
    ///
    /// A bound inner block becomes the slot for the duration of the call and
    /// the previous slot is restored afterwards. Without one, the template
    /// yields to the caller's slot.
    pub(crate) fn run(&self, renderer: &mut Renderer, args: &Args) -> Result<()> {
        let Some(inner) = &self.inner else {
            return self.template.call(renderer, args);
        };
        let slot = renderer.context_mut().replace_inner(Some(inner.clone()));
        let result = self.template.call(renderer, args);
        renderer.context_mut().replace_inner(slot);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::attributes::Attributes;
    use crate::block::Signature;
    use crate::error::{ParameterKind, RenderError};

    fn heading(text: &'static str) -> Component {
        Component::html(Block::new(move |r, _| r.h1(text, &Attributes::new())))
    }

    #[test]
    fn test_create_invalid_mode() {
        let err = Component::create(Block::new(|_, _| Ok(())), "json").unwrap_err();
        assert!(matches!(err, RenderError::InvalidMode(ref mode) if mode == "json"));
    }

    #[test]
    fn test_create_valid_mode() {
        let component = Component::create(Block::new(|_, _| Ok(())), "xml").unwrap();
        assert_eq!(component.mode(), MarkupMode::Xml);
    }

    #[test]
    fn test_render_missing_positional() {
        let component = Component::html(Block::with_signature(
            Signature::new().required("name"),
            |_, _| Ok(()),
        ));
        let err = component.render(&Args::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingArgument { ref name, kind: ParameterKind::Positional } if name == "name"
        ));
    }

    #[test]
    fn test_render_missing_keyword() {
        let component = Component::html(Block::with_signature(
            Signature::new().keyword("lang"),
            |_, _| Ok(()),
        ));
        let err = component.render(&Args::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingArgument { kind: ParameterKind::Keyword, .. }
        ));
    }

    #[test]
    fn test_render_is_repeatable() {
        let component = Component::html(Block::new(|r, args| {
            r.set("count", args.positional().len());
            r.text_var("count");
            Ok(())
        }));
        let args = Args::new().arg(1).arg(2);
        assert_eq!(component.render(&args).unwrap(), "2");
        assert_eq!(component.render(&args).unwrap(), "2");
    }

    #[test]
    fn test_namespace_does_not_leak_between_passes() {
        let component = Component::html(Block::new(|r, _| {
            r.text_var("seen");
            r.set("seen", "yes");
            Ok(())
        }));
        assert_eq!(component.render(&Args::new()).unwrap(), "");
        assert_eq!(component.render(&Args::new()).unwrap(), "");
    }

    #[test]
    fn test_apply_does_not_mutate_original() {
        let layout = Component::html(Block::new(|r, _| {
            r.tag_with("main", &Attributes::new(), |r| r.emit_yield(&Args::new()))
        }));
        let filled = layout.apply(Block::new(|r, _| {
            r.text("hi");
            Ok(())
        }));
        assert!(layout.inner_block().is_none());
        assert_eq!(filled.render(&Args::new()).unwrap(), "<main>hi</main>");
        assert!(matches!(
            layout.render(&Args::new()),
            Err(RenderError::NoInnerBlock)
        ));
    }

    #[test]
    fn test_render_with_overrides_bound_inner() {
        let layout = Component::html(Block::new(|r, _| r.emit_yield(&Args::new())))
            .apply(Block::new(|r, _| {
                r.raw("bound");
                Ok(())
            }));
        let out = layout
            .render_with(
                &Args::new(),
                Block::new(|r, _| {
                    r.raw("override");
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(out, "override");
    }

    #[test]
    fn test_nested_component_shares_namespace() {
        let child = Component::html(Block::new(|r, _| {
            r.set("from_child", "c");
            r.text_var("from_parent");
            Ok(())
        }));
        let parent = Component::html(Block::new(move |r, _| {
            r.set("from_parent", "p");
            r.emit(&child, &Args::new())?;
            r.text_var("from_child");
            Ok(())
        }));
        assert_eq!(parent.render(&Args::new()).unwrap(), "pc");
    }

    #[test]
    fn test_emitted_component_uses_its_own_slot() {
        let frame = Component::html(Block::new(|r, _| {
            r.raw("(");
            r.emit_yield(&Args::new())?;
            r.raw(")");
            Ok(())
        }))
        .apply(Block::new(|r, _| {
            r.raw("inner");
            Ok(())
        }));
        let page = Component::html(Block::new(move |r, _| {
            r.emit(&frame, &Args::new())?;
            r.emit_yield(&Args::new())
        }));
        let out = page
            .render_with(
                &Args::new(),
                Block::new(|r, _| {
                    r.raw("outer");
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(out, "(inner)outer");
    }

    #[test]
    fn test_emitted_component_without_slot_yields_to_caller() {
        let layout = Block::new(|r, _| {
            r.tag_with("main", &Attributes::new(), |r| r.emit_yield(&Args::new()))
        });
        let content = Block::new(|r, _| {
            r.raw("content");
            Ok(())
        });

        let as_block = {
            let layout = layout.clone();
            Component::html(Block::new(move |r, _| r.emit(&layout, &Args::new())))
        };
        let as_component = {
            let layout = Component::html(layout);
            Component::html(Block::new(move |r, _| r.emit(&layout, &Args::new())))
        };

        let expected = "<main>content</main>";
        assert_eq!(
            as_block.render_with(&Args::new(), content.clone()).unwrap(),
            expected
        );
        assert_eq!(
            as_component.render_with(&Args::new(), content).unwrap(),
            expected
        );
    }

    #[test]
    fn test_emitted_component_restores_caller_slot() {
        let frame = Component::html(Block::new(|r, _| r.emit_yield(&Args::new()))).apply(
            Block::new(|r, _| {
                r.raw("[frame]");
                Ok(())
            }),
        );
        let page = Component::html(Block::new(move |r, _| {
            r.emit(&frame, &Args::new())?;
            r.emit_yield(&Args::new())
        }));
        let out = page
            .render_with(
                &Args::new(),
                Block::new(|r, _| {
                    r.raw("[page]");
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(out, "[frame][page]");
    }

    #[test]
    fn test_emitted_component_checks_arguments() {
        let child = Component::html(Block::with_signature(
            Signature::new().required("x"),
            |_, _| Ok(()),
        ));
        let parent = Component::html(Block::new(move |r, _| r.emit(&child, &Args::new())));
        assert!(matches!(
            parent.render(&Args::new()),
            Err(RenderError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_deferred_components_interleave() {
        let foo = Component::html(Block::new(|r, _| {
            r.text_var("foo");
            r.defer(|r| {
                r.text_var("baz");
                Ok(())
            });
            r.raw("!");
            Ok(())
        }));
        let bar = Component::html(Block::new(|r, _| {
            r.text_var("bar");
            Ok(())
        }));
        let page = Component::html(Block::new(move |r, _| {
            r.raw("<h1>foo</h1>");
            let foo = foo.clone();
            r.defer(move |r| r.emit(&foo, &Args::new()));
            r.raw("<h1>bar</h1>");
            let bar = bar.clone();
            r.defer(move |r| r.emit(&bar, &Args::new()));
            r.set("foo", "FOO");
            r.set("bar", "BAR");
            r.set("baz", "BAZ");
            Ok(())
        }));
        assert_eq!(
            page.render(&Args::new()).unwrap(),
            "<h1>foo</h1>FOOBAZ!<h1>bar</h1>BAR"
        );
    }

    #[test]
    fn test_deferred_keeps_registration_slot() {
        let frame = Component::html(Block::new(|r, _| {
            r.defer(|r| r.emit_yield(&Args::new()));
            Ok(())
        }))
        .apply(Block::new(|r, _| {
            r.raw("frame-slot");
            Ok(())
        }));
        let page = Component::html(Block::new(move |r, _| r.emit(&frame, &Args::new())));
        assert_eq!(page.render(&Args::new()).unwrap(), "frame-slot");
    }

    #[test]
    fn test_concurrent_passes() {
        let component = Component::html(Block::with_signature(
            Signature::new().required("n"),
            |r, args| {
                let n = args.get(0).and_then(serde_json::Value::as_u64).unwrap_or_default();
                r.set("n", n * 2);
                r.defer(|r| {
                    r.text_var("n");
                    Ok(())
                });
                r.raw(":");
                Ok(())
            },
        ));

        thread::scope(|scope| {
            let handles: Vec<_> = (0..8_u64)
                .map(|n| {
                    let component = &component;
                    scope.spawn(move || component.render(&Args::new().arg(n)).unwrap())
                })
                .collect();
            for (n, handle) in handles.into_iter().enumerate() {
                assert_eq!(handle.join().unwrap(), format!("{}:", n * 2));
            }
        });
    }

    #[test]
    fn test_from_config() {
        let config = Arc::new(MarkupConfig {
            mode: MarkupMode::Xml,
            uri_attributes: vec!["ref".to_owned()],
            ..MarkupConfig::default()
        });
        let component = Component::from_config(
            Block::new(|r, _| {
                r.tag(
                    "item",
                    "'a'",
                    &Attributes::new().with("ref", "x y").with("href", "x y"),
                )
            }),
            config,
        );
        assert_eq!(component.mode(), MarkupMode::Xml);
        assert_eq!(
            component.render(&Args::new()).unwrap(),
            r#"<item ref="x%20y" href="x y">&apos;a&apos;</item>"#
        );
    }

    #[test]
    fn test_heading_helper_component() {
        assert_eq!(heading("A & B").render(&Args::new()).unwrap(), "<h1>A &amp; B</h1>");
    }
}
