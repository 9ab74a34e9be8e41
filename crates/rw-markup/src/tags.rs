//! Named element methods.
//!
//! Each method is shorthand for [`Renderer::tag`] with a fixed name. Any other
//! name, including custom elements, goes through [`Renderer::tag`] directly.

use crate::attributes::Attributes;
use crate::content::Content;
use crate::error::Result;
use crate::renderer::Renderer;

macro_rules! named_tags {
    ($($method:ident => $name:literal),* $(,)?) => {
        impl Renderer {
            $(
                #[doc = concat!("Emit a `<", $name, ">` element; see [`tag`](Self::tag).")]
                pub fn $method(&mut self, content: impl Into<Content>, attrs: &Attributes) -> Result<()> {
                    self.tag($name, content, attrs)
                }
            )*
        }
    };
}

named_tags! {
    html => "html",
    head => "head",
    title => "title",
    meta => "meta",
    link => "link",
    body => "body",
    header => "header",
    footer => "footer",
    nav => "nav",
    main => "main",
    section => "section",
    article => "article",
    aside => "aside",
    div => "div",
    span => "span",
    p => "p",
    a => "a",
    h1 => "h1",
    h2 => "h2",
    h3 => "h3",
    h4 => "h4",
    h5 => "h5",
    h6 => "h6",
    em => "em",
    strong => "strong",
    code => "code",
    pre => "pre",
    blockquote => "blockquote",
    ul => "ul",
    ol => "ol",
    li => "li",
    dl => "dl",
    dt => "dt",
    dd => "dd",
    table => "table",
    thead => "thead",
    tbody => "tbody",
    tr => "tr",
    th => "th",
    td => "td",
    form => "form",
    label => "label",
    input => "input",
    button => "button",
    select => "select",
    option => "option",
    textarea => "textarea",
    img => "img",
    br => "br",
    hr => "hr",
}
