//! Ordered attribute maps and their serialization.

use std::borrow::Cow;

use crate::escape::escape_uri;

/// Value of a single attribute.
///
/// # Example
///
/// ```
/// use rw_markup::AttrValue;
///
/// assert_eq!(AttrValue::from(true), AttrValue::Flag(true));
/// assert_eq!(AttrValue::from("text"), AttrValue::Text("text".to_owned()));
/// assert_eq!(AttrValue::from(None::<&str>), AttrValue::Absent);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// Presence flag: `true` writes a valueless attribute, `false` omits it.
    Flag(bool),
    /// Attribute content, written as `name="value"`.
    Text(String),
    /// No value; the attribute is omitted.
    Absent,
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

macro_rules! attr_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

attr_value_from_number!(i32, i64, u8, u16, u32, u64, usize, f64);

/// Insertion-ordered attribute map.
///
/// Setting a name that is already present replaces its value in place, so the
/// attribute keeps its original position.
///
/// # Example
///
/// ```
/// use rw_markup::{AttrValue, Attributes};
///
/// let attrs = Attributes::new()
///     .with("type", "checkbox")
///     .with("checked", true)
///     .with("type", "radio");
///
/// let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["type", "checked"]);
/// assert_eq!(attrs.get("type"), Some(&AttrValue::Text("radio".to_owned())));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an attribute, keeping the position of an existing entry.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of entries, including flags and absent values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

/// Build an [`Attributes`] map from `name => value` pairs.
///
/// ```
/// use rw_markup::attrs;
///
/// let attrs = attrs! { "type" => "checkbox", "checked" => true };
/// assert_eq!(attrs.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Attributes::new()$(.with($name, $value))+
    };
}

/// Replace underscores with hyphens in tag and attribute names.
pub(crate) fn hyphenate(name: &str) -> Cow<'_, str> {
    if name.contains('_') {
        Cow::Owned(name.replace('_', "-"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Append `attrs` to `out`, one leading space per written attribute.
///
/// Names listed in `uri_attributes` have their text percent-encoded. Other
/// text values are written verbatim.
pub(crate) fn encode_attributes(attrs: &Attributes, uri_attributes: &[String], out: &mut String) {
    for (name, value) in attrs.iter() {
        match value {
            AttrValue::Flag(false) | AttrValue::Absent => {}
            AttrValue::Flag(true) => {
                out.push(' ');
                out.push_str(&hyphenate(name));
            }
            AttrValue::Text(text) => {
                out.push(' ');
                out.push_str(&hyphenate(name));
                out.push_str("=\"");
                if uri_attributes.iter().any(|uri| uri == name) {
                    out.push_str(&escape_uri(text));
                } else {
                    out.push_str(text);
                }
                out.push('"');
            }
        }
    }
}
