//! From matches to canonical nodes, and back to text
//!
//! [`builder`] turns the matcher's winning result into a [`SemanticNode`],
//! lifting a captured event into an event handler. [`render`] walks a
//! language's highest-priority pattern to write a node back out as native
//! text.
//!
//! [`SemanticNode`]: crate::types::SemanticNode

pub mod builder;
pub mod render;

pub use builder::{build_node, parse, ParseOutcome};
pub use render::render;
