//! Tree contract violations.

use super::NodeId;
use thiserror::Error;

/// A mutation that is inconsistent with the current tree.
///
/// These are the only failures the pipeline reports to callers; the tree is
/// left unchanged when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The id does not name a node of this tree.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// `child` is not currently a child of `parent`.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Claimed parent.
        parent: NodeId,
        /// Node to detach.
        child: NodeId,
    },
    /// Inserting `child` under `parent` would make a node its own ancestor.
    #[error("inserting {child} under {parent} would create a cycle")]
    Cycle {
        /// Target parent.
        parent: NodeId,
        /// Node being inserted.
        child: NodeId,
    },
    /// Text runs and comments cannot have children.
    #[error("node {0} cannot have children")]
    LeafParent(NodeId),
    /// The insertion anchor is not a child of the target parent.
    #[error("reference node {reference} is not a child of {parent}")]
    BadReference {
        /// Target parent.
        parent: NodeId,
        /// Anchor sibling.
        reference: NodeId,
    },
    /// `set_text` on a container.
    #[error("node {0} does not hold text")]
    NotText(NodeId),
}
