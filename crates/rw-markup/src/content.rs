//! Inputs accepted by `emit` and `tag`.

use crate::block::Block;
use crate::component::Component;

/// Value accepted by [`Renderer::emit`](crate::Renderer::emit).
///
/// Callables run inside the current pass; raw text is appended verbatim,
/// without escaping.
#[derive(Clone, Debug)]
pub enum Emit {
    /// Nothing to emit.
    Nothing,
    /// Trusted markup, appended as-is.
    Raw(String),
    /// A block, run after its signature check.
    Block(Block),
    /// A component, run with its bound inner block as the slot.
    Component(Component),
}

impl From<&str> for Emit {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_owned())
    }
}

impl From<String> for Emit {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<Block> for Emit {
    fn from(value: Block) -> Self {
        Self::Block(value)
    }
}

impl From<&Block> for Emit {
    fn from(value: &Block) -> Self {
        Self::Block(value.clone())
    }
}

impl From<Component> for Emit {
    fn from(value: Component) -> Self {
        Self::Component(value)
    }
}

impl From<&Component> for Emit {
    fn from(value: &Component) -> Self {
        Self::Component(value.clone())
    }
}

impl<T: Into<Emit>> From<Option<T>> for Emit {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nothing, Into::into)
    }
}

/// Body of an element emitted by [`Renderer::tag`](crate::Renderer::tag).
#[derive(Clone, Debug)]
pub enum Content {
    /// No body: the element self-closes.
    Empty,
    /// Text, escaped per the active mode.
    Text(String),
    /// A callable body, emitted like [`Renderer::emit`](crate::Renderer::emit).
    Emit(Emit),
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Content {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Block> for Content {
    fn from(value: Block) -> Self {
        Self::Emit(Emit::Block(value))
    }
}

impl From<&Block> for Content {
    fn from(value: &Block) -> Self {
        Self::Emit(Emit::Block(value.clone()))
    }
}

impl From<Component> for Content {
    fn from(value: Component) -> Self {
        Self::Emit(Emit::Component(value))
    }
}

impl From<&Component> for Content {
    fn from(value: &Component) -> Self {
        Self::Emit(Emit::Component(value.clone()))
    }
}

impl From<Emit> for Content {
    fn from(value: Emit) -> Self {
        Self::Emit(value)
    }
}

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}
