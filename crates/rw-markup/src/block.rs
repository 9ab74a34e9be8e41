//! Callables and their arguments.
//!
//! A [`Block`] is the unit of template logic: component templates, slot
//! content and extension capabilities are all blocks. Each block declares a
//! [`Signature`] that is checked against the supplied [`Args`] before the body
//! runs, no matter how the block is reached.

use std::borrow::Cow;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{ParameterKind, RenderError, Result};
use crate::renderer::Renderer;

/// Positional and keyword arguments passed to a block.
///
/// # Example
///
/// ```
/// use rw_markup::Args;
///
/// let args = Args::new().arg("Home").kwarg("active", true);
/// assert_eq!(args.str(0), Some("Home"));
/// assert_eq!(args.keyword("active"), Some(&serde_json::Value::Bool(true)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keywords: Map<String, Value>,
}

impl Args {
    /// Create an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Positional argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Positional argument at `index`, if it is a string.
    #[must_use]
    pub fn str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Value::as_str)
    }

    /// Keyword argument by name.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    /// All positional arguments.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// All keyword arguments, in insertion order.
    #[must_use]
    pub fn keywords(&self) -> &Map<String, Value> {
        &self.keywords
    }
}

/// Declared parameters of a block.
///
/// Required positional parameters are named; optional ones are only counted.
/// Extra positional or keyword arguments are accepted and ignored.
///
/// # Example
///
/// ```
/// use rw_markup::{Args, Signature};
///
/// let sig = Signature::new().required("title").optional(1).keyword("lang");
/// assert_eq!(sig.arity(), 1..=2);
/// assert!(sig.check(&Args::new().arg("Hi").kwarg("lang", "en")).is_ok());
/// assert!(sig.check(&Args::new().arg("Hi")).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    required: Vec<String>,
    optional: usize,
    keywords: Vec<String>,
}

impl Signature {
    /// Signature with no requirements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the next required positional parameter.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Declare `count` more optional positional parameters after the required ones.
    #[must_use]
    pub fn optional(mut self, count: usize) -> Self {
        self.optional += count;
        self
    }

    /// Declare a required keyword parameter.
    #[must_use]
    pub fn keyword(mut self, name: impl Into<String>) -> Self {
        self.keywords.push(name.into());
        self
    }

    /// Declared positional parameter count: required through required plus optional.
    #[must_use]
    pub fn arity(&self) -> RangeInclusive<usize> {
        self.required.len()..=self.required.len() + self.optional
    }

    /// Verify `args` satisfy every requirement.
    ///
    /// Reports the first missing positional parameter, then the first missing
    /// keyword.
    pub fn check(&self, args: &Args) -> Result<()> {
        if let Some(name) = self.required.get(args.positional.len()) {
            return Err(RenderError::MissingArgument {
                name: name.clone(),
                kind: ParameterKind::Positional,
            });
        }
        if let Some(name) = self
            .keywords
            .iter()
            .find(|name| !args.keywords.contains_key(name.as_str()))
        {
            return Err(RenderError::MissingArgument {
                name: name.clone(),
                kind: ParameterKind::Keyword,
            });
        }
        Ok(())
    }
}

type BlockFn = dyn Fn(&mut Renderer, &Args) -> Result<()> + Send + Sync;

struct BlockInner {
    signature: Signature,
    body: Box<BlockFn>,
}

/// Shareable template callable with a declared [`Signature`].
///
/// Cloning is cheap; clones share the same body. Blocks are `Send + Sync`, so
/// components built from them can be rendered from several threads.
#[derive(Clone)]
pub struct Block(Arc<BlockInner>);

impl Block {
    /// Wrap a closure with no declared requirements.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut Renderer, &Args) -> Result<()> + Send + Sync + 'static,
    {
        Self::with_signature(Signature::new(), body)
    }

    /// Wrap a closure with the given signature.
    pub fn with_signature<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&mut Renderer, &Args) -> Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(BlockInner {
            signature,
            body: Box::new(body),
        }))
    }

    /// Declared parameters.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.0.signature
    }

    /// Check `args` against the signature, then run the body in `renderer`.
    pub fn call(&self, renderer: &mut Renderer, args: &Args) -> Result<()> {
        self.0.signature.check(args)?;
        (self.0.body)(renderer, args)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("signature", &self.0.signature)
            .finish_non_exhaustive()
    }
}

/// Text form of a value for emission: strings unquoted, `null` empty.
#[must_use]
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(text) => Cow::Borrowed(text),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_check_missing_positional() {
        let sig = Signature::new().required("title").required("body");
        let err = sig.check(&Args::new().arg("t")).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingArgument { ref name, kind: ParameterKind::Positional } if name == "body"
        ));
    }

    #[test]
    fn test_check_missing_keyword() {
        let sig = Signature::new().keyword("lang");
        let err = sig.check(&Args::new().kwarg("dir", "rtl")).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingArgument { ref name, kind: ParameterKind::Keyword } if name == "lang"
        ));
    }

    #[test]
    fn test_check_extra_arguments_accepted() {
        let sig = Signature::new().required("a");
        assert!(sig.check(&Args::new().arg(1).arg(2).kwarg("x", 3)).is_ok());
    }

    #[test]
    fn test_arity_counts_optional_positionals() {
        let sig = Signature::new().required("a").required("b").optional(2);
        assert_eq!(sig.arity(), 2..=4);
        assert_eq!(Signature::new().arity(), 0..=0);
        assert_eq!(Signature::new().optional(1).optional(1).arity(), 0..=2);
    }

    #[test]
    fn test_optional_positionals_may_be_omitted() {
        let sig = Signature::new().required("title").optional(1);
        assert!(sig.check(&Args::new().arg("t")).is_ok());
        assert!(sig.check(&Args::new().arg("t").arg("sub")).is_ok());
        assert!(sig.check(&Args::new()).is_err());
    }

    #[test]
    fn test_args_accessors() {
        let args = Args::new().arg("x").arg(2).kwarg("k", json!({"n": 1}));
        assert_eq!(args.str(0), Some("x"));
        assert_eq!(args.str(1), None);
        assert_eq!(args.positional().len(), 2);
        assert_eq!(args.keyword("k"), Some(&json!({"n": 1})));
        assert_eq!(args.keywords().len(), 1);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&Value::Null), "");
        assert_eq!(value_text(&json!("hi")), "hi");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(true)), "true");
    }

    #[test]
    fn test_block_debug_shows_signature() {
        let block = Block::with_signature(Signature::new().required("x"), |_, _| Ok(()));
        assert!(format!("{block:?}").contains("\"x\""));
    }
}
