//! Node types stored in the [`BoxTree`](super::BoxTree) arena.

use crate::layout::LayoutSnapshot;
use crate::style::Style;

/// Stable handle of a node in a [`BoxTree`](super::BoxTree).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a node id from a raw arena index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node represents.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NodeKind {
    /// A box that can hold children.
    Container {
        /// Element tag, informational only.
        tag: String,
    },
    /// A run of text painted inside its own content box.
    Text(String),
    /// A placeholder that never paints and takes no space.
    Comment(String),
}

impl NodeKind {
    /// Whether children may be inserted under this node.
    #[inline]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Container { .. })
    }

    /// Text content of a text run.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One node of the box tree.
#[derive(Clone, Debug)]
pub struct BoxNode {
    /// Node variant and its payload.
    pub kind: NodeKind,
    /// Closed style, updated through [`BoxTree::set_style`](super::BoxTree::set_style).
    pub style: Style,
    /// Result of the last layout pass.
    pub layout: LayoutSnapshot,
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
}

impl BoxNode {
    pub(super) fn new(kind: NodeKind) -> Self {
        let mut style = Style::default();
        if matches!(kind, NodeKind::Comment(_)) {
            style.flex.hidden = true;
        }
        Self {
            kind,
            style,
            layout: LayoutSnapshot::default(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// Children in paint order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Owning parent, if attached.
    #[inline]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}
