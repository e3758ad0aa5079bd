//! Document tree model shared by every pipeline stage.

pub mod attributes;
pub mod kind;
pub mod node;
#[cfg(feature = "serde")]
mod serialize;
pub mod tokens;

pub use attributes::{AttributeValue, Attributes, parse_attributes};
pub use kind::{BlockKind, InlineKind, NodeKind};
pub use node::{Document, Node, NodeId};
pub use tokens::{InlineToken, Positions, TokenKind};
