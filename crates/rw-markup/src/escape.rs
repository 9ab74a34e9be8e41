//! Escaping policies for text content and URI-bearing attributes.
//!
//! Escaping happens exactly once, when text enters the render buffer. Raw
//! emission and deferred segments splice already-produced markup untouched.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::RenderError;

/// Characters left untouched in URI attribute values.
///
/// Unreserved and reserved URI characters pass through, so already-structured
/// URLs keep their query and fragment syntax. `%` also passes through to avoid
/// double-encoding.
const URI_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'[')
    .remove(b']')
    .remove(b'#')
    .remove(b'%');

/// Markup flavor of a component, selecting the text escaping policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkupMode {
    /// HTML entity escaping (`&#39;` for apostrophes).
    #[default]
    Html,
    /// XML entity escaping (`&apos;` for apostrophes).
    Xml,
}

impl MarkupMode {
    /// Escape text content according to this mode.
    ///
    /// # Example
    ///
    /// ```
    /// use rw_markup::MarkupMode;
    ///
    /// assert_eq!(MarkupMode::Html.escape_text("a < b"), "a &lt; b");
    /// assert_eq!(MarkupMode::Xml.escape_text("it's"), "it&apos;s");
    /// ```
    #[must_use]
    pub fn escape_text(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Html => escape_html(text),
            Self::Xml => escape_xml(text),
        }
    }

    /// Lowercase name of the mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for MarkupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkupMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("html") {
            Ok(Self::Html)
        } else if s.eq_ignore_ascii_case("xml") {
            Ok(Self::Xml)
        } else {
            Err(RenderError::InvalidMode(s.to_owned()))
        }
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape_with(text, |byte| match byte {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&#39;"),
        _ => None,
    })
}

/// Escape the five predefined XML entities.
#[must_use]
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    escape_with(text, |byte| match byte {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&apos;"),
        _ => None,
    })
}

/// Percent-encode characters that are not valid in a URI.
///
/// # Example
///
/// ```
/// use rw_markup::escape_uri;
///
/// assert_eq!(escape_uri("/?q=a b"), "/?q=a%20b");
/// assert_eq!(escape_uri("/docs#intro"), "/docs#intro");
/// ```
#[must_use]
pub fn escape_uri(uri: &str) -> Cow<'_, str> {
    utf8_percent_encode(uri, URI_ESCAPE_SET).into()
}

/// Replace bytes mapped by `entity` with their replacement.
///
/// Only ASCII bytes are ever mapped, so slicing at their offsets stays on
/// char boundaries.
fn escape_with(text: &str, entity: fn(u8) -> Option<&'static str>) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = bytes.iter().position(|&b| entity(b).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut offset = 0;
    for (i, &byte) in bytes.iter().enumerate().skip(first) {
        if let Some(replacement) = entity(byte) {
            out.push_str(&text[offset..i]);
            out.push_str(replacement);
            offset = i + 1;
        }
    }
    out.push_str(&text[offset..]);
    Cow::Owned(out)
}
