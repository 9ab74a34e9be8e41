//! Document, stylesheet and script helpers for `rw-markup`.
//!
//! Everything here is built from the public renderer primitives: the helpers
//! are plain functions over [`Renderer`], and [`standard_extensions`] exposes
//! them by name for templates that only hold an extension registry.
//!
//! # Example
//!
//! ```
//! use rw_markup::{Args, Attributes, Block, MarkupMode};
//! use rw_markup_helpers::{document, stylesheet};
//!
//! let page = document(MarkupMode::Html).apply(Block::new(|r, _| {
//!     r.head(Block::new(|r, _| stylesheet(r, "/site.css")), &Attributes::new())?;
//!     r.body("Hello", &Attributes::new())
//! }));
//!
//! assert_eq!(
//!     page.render(&Args::new().kwarg("lang", "en"))?,
//!     concat!(
//!         "<!DOCTYPE html>",
//!         r#"<html lang="en"><head><link rel="stylesheet" href="/site.css"/></head>"#,
//!         "<body>Hello</body></html>",
//!     )
//! );
//! # Ok::<(), rw_markup::RenderError>(())
//! ```

use rw_markup::{
    Args, Attributes, Block, Component, Extensions, MarkupMode, Renderer, Result, Signature,
};

/// HTML5 doctype declaration.
pub const HTML_DOCTYPE: &str = "<!DOCTYPE html>";

/// XML declaration.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Document wrapper component in `mode`.
///
/// HTML mode emits the doctype and an `<html>` element around the slot; the
/// optional `lang` keyword argument becomes the `lang` attribute. XML mode
/// emits the XML declaration followed by the slot.
#[must_use]
pub fn document(mode: MarkupMode) -> Component {
    let template = Block::new(move |r, args| match mode {
        MarkupMode::Html => {
            r.raw(HTML_DOCTYPE);
            let mut attrs = Attributes::new();
            if let Some(lang) = args.keyword("lang").and_then(|v| v.as_str()) {
                attrs.set("lang", lang);
            }
            r.tag_with("html", &attrs, |r| r.emit_yield(&Args::new()))
        }
        MarkupMode::Xml => {
            r.raw(XML_DECLARATION);
            r.emit_yield(&Args::new())
        }
    });
    Component::new(template, mode)
}

/// Emit `<link rel="stylesheet" href="…"/>`.
pub fn stylesheet(r: &mut Renderer, href: &str) -> Result<()> {
    let attrs = Attributes::new().with("rel", "stylesheet").with("href", href);
    r.tag("link", None::<&str>, &attrs)
}

/// Emit an inline `<style>` element. The CSS is written verbatim.
pub fn style(r: &mut Renderer, css: &str) -> Result<()> {
    r.tag_with("style", &Attributes::new(), |r| {
        r.raw(css);
        Ok(())
    })
}

/// Emit `<script src="…"></script>`.
pub fn script_src(r: &mut Renderer, src: &str) -> Result<()> {
    r.tag_with("script", &Attributes::new().with("src", src), |_| Ok(()))
}

/// Emit an inline `<script>` element. The code is written verbatim.
pub fn script(r: &mut Renderer, code: &str) -> Result<()> {
    r.tag_with("script", &Attributes::new(), |r| {
        r.raw(code);
        Ok(())
    })
}

/// Registry exposing the helpers as extensions.
///
/// | name         | argument |
/// |--------------|----------|
/// | `stylesheet` | `href`   |
/// | `style`      | `css`    |
/// | `script_src` | `src`    |
/// | `script`     | `code`   |
#[must_use]
pub fn standard_extensions() -> Extensions {
    Extensions::new()
        .register("stylesheet", single_argument("href", stylesheet))
        .register("style", single_argument("css", style))
        .register("script_src", single_argument("src", script_src))
        .register("script", single_argument("code", script))
}

/// Wrap a one-string helper as a block requiring that argument.
fn single_argument(name: &str, helper: fn(&mut Renderer, &str) -> Result<()>) -> Block {
    Block::with_signature(Signature::new().required(name), move |r, args| {
        let value = args.get(0).map(rw_markup::value_text).unwrap_or_default();
        helper(r, &value)
    })
}
