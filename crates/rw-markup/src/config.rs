//! Render configuration.
//!
//! Parses the `[markup]` table of a TOML document:
//!
//! ```toml
//! [markup]
//! mode = "xml"
//! buffer_capacity = 4096
//! uri_attributes = ["href", "src"]
//! tag_cache = true
//! ```

use serde::Deserialize;

use crate::error::{RenderError, Result};
use crate::escape::MarkupMode;

/// Attributes percent-encoded by default.
const DEFAULT_URI_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "cite", "poster"];

/// Raw configuration file as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    markup: MarkupConfigRaw,
}

/// Raw `[markup]` table (mode as an unvalidated string).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MarkupConfigRaw {
    mode: Option<String>,
    buffer_capacity: Option<usize>,
    uri_attributes: Option<Vec<String>>,
    tag_cache: Option<bool>,
}

/// Resolved render configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupConfig {
    /// Mode for components built with [`Component::from_config`](crate::Component::from_config).
    pub mode: MarkupMode,
    /// Initial capacity of the render buffer.
    pub buffer_capacity: usize,
    /// Attribute names whose values are percent-encoded.
    pub uri_attributes: Vec<String>,
    /// Cache open/close fragments per tag name within a pass.
    pub tag_cache: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            mode: MarkupMode::Html,
            buffer_capacity: 1024,
            uri_attributes: DEFAULT_URI_ATTRIBUTES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            tag_cache: true,
        }
    }
}

impl MarkupConfig {
    /// Parse a TOML document, applying defaults for missing keys.
    ///
    /// # Example
    ///
    /// ```
    /// use rw_markup::{MarkupConfig, MarkupMode};
    ///
    /// let config = MarkupConfig::from_toml_str("[markup]\nmode = \"xml\"")?;
    /// assert_eq!(config.mode, MarkupMode::Xml);
    /// assert!(config.is_uri_attribute("href"));
    /// # Ok::<(), rw_markup::RenderError>(())
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|e| RenderError::Config(e.to_string()))?;
        Self::resolve(file.markup)
    }

    fn resolve(raw: MarkupConfigRaw) -> Result<Self> {
        let defaults = Self::default();
        let mode = match raw.mode {
            Some(name) => name.parse()?,
            None => defaults.mode,
        };
        Ok(Self {
            mode,
            buffer_capacity: raw.buffer_capacity.unwrap_or(defaults.buffer_capacity),
            uri_attributes: raw.uri_attributes.unwrap_or(defaults.uri_attributes),
            tag_cache: raw.tag_cache.unwrap_or(defaults.tag_cache),
        })
    }

    /// Whether `name` is percent-encoded as a URI.
    #[must_use]
    pub fn is_uri_attribute(&self, name: &str) -> bool {
        self.uri_attributes.iter().any(|uri| uri == name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MarkupConfig::from_toml_str("").unwrap();
        assert_eq!(config, MarkupConfig::default());
    }

    #[test]
    fn test_full_table() {
        let config = MarkupConfig::from_toml_str(
            r#"
[markup]
mode = "xml"
buffer_capacity = 64
uri_attributes = ["href", "data-url"]
tag_cache = false
"#,
        )
        .unwrap();
        assert_eq!(config.mode, MarkupMode::Xml);
        assert_eq!(config.buffer_capacity, 64);
        assert_eq!(config.uri_attributes, ["href", "data-url"]);
        assert!(!config.tag_cache);
        assert!(!config.is_uri_attribute("src"));
    }

    #[test]
    fn test_invalid_mode() {
        let err = MarkupConfig::from_toml_str("[markup]\nmode = \"svg\"").unwrap_err();
        assert!(matches!(err, RenderError::InvalidMode(ref name) if name == "svg"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = MarkupConfig::from_toml_str("[markup\nmode =").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_wrong_type() {
        let err = MarkupConfig::from_toml_str("[markup]\nbuffer_capacity = \"big\"").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }
}
