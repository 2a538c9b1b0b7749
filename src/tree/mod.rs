//! Tree module: the arena-backed box tree.
//!
//! Nodes are addressed by [`NodeId`]. Ownership flows from parent to
//! children through the child list; the parent link is a plain index.

mod box_tree;
mod error;
mod node;

pub use box_tree::BoxTree;
pub use error::TreeError;
pub use node::{BoxNode, NodeId, NodeKind};
