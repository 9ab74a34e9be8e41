//! Error types for markup rendering.

use std::fmt;

/// Kind of parameter a template declared but did not receive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    /// Required positional parameter.
    Positional,
    /// Required keyword parameter.
    Keyword,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => f.write_str("positional"),
            Self::Keyword => f.write_str("keyword"),
        }
    }
}

/// Error returned when a render pass fails.
///
/// Errors unwind the whole pass: a failed render never yields partial output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template invoked without one of its required arguments.
    #[error("missing {kind} argument `{name}`")]
    MissingArgument {
        /// Declared name of the missing parameter.
        name: String,
        /// Whether the parameter is positional or keyword.
        kind: ParameterKind,
    },
    /// `emit_yield` called while no inner block is bound.
    #[error("no inner block bound to yield to")]
    NoInnerBlock,
    /// Unsupported markup mode name.
    #[error("invalid markup mode: {0}")]
    InvalidMode(String),
    /// Extension name not present in the registry.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),
    /// Configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = RenderError> = std::result::Result<T, E>;
