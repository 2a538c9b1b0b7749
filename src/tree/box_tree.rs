//! BoxTree: arena of [`BoxNode`]s driven by the tree mutation protocol.
//!
//! Every mutation is validated before anything is touched, so a returned
//! [`TreeError`] always leaves the tree exactly as it was. A removed subtree
//! stays in the arena, detached, and can be re-inserted later; only
//! [`destroy`](BoxTree::destroy) frees slots, and freed ids are handed out
//! again by the next `create_*` call.

use log::debug;

use super::error::TreeError;
use super::node::{BoxNode, NodeId, NodeKind};
use crate::layout::LayoutSnapshot;
use crate::style::{ColorSpec, Style, StylePatch};

/// Arena of box nodes.
#[derive(Clone, Debug, Default)]
pub struct BoxTree {
    /// `None` marks a destroyed slot waiting in `free`.
    nodes: Vec<Option<BoxNode>>,
    free: Vec<NodeId>,
}

impl BoxTree {
    /// Create an empty tree.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Whether the tree holds no live node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Some(BoxNode::new(kind));
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached container.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeKind::Container { tag: tag.into() })
    }

    /// Create a detached container with `patch` applied.
    pub fn create_styled(&mut self, tag: impl Into<String>, patch: &StylePatch) -> NodeId {
        let id = self.create_element(tag);
        if let Some(node) = self.slot_mut(id) {
            node.style.apply(patch);
        }
        id
    }

    /// Create a detached text run.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    /// Create a detached comment. Comments never paint.
    pub fn create_comment(&mut self, data: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(data.into()))
    }

    /// Look up a node.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&BoxNode> {
        self.nodes.get(id.index())?.as_ref()
    }

    /// Look up a node, failing on unknown ids.
    pub fn node(&self, id: NodeId) -> Result<&BoxNode, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut BoxNode> {
        self.nodes.get_mut(id.index())?.as_mut()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut BoxNode, TreeError> {
        self.slot_mut(id).ok_or(TreeError::UnknownNode(id))
    }

    /// Owning parent of `id`, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(BoxNode::parent)
    }

    /// Children of `id` in paint order (empty for unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[][..], BoxNode::children)
    }

    /// The sibling painted right after `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Insert `child` under `parent`, before `before` or at the end.
    ///
    /// A child that is attached elsewhere is moved.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids, non-container parents, cycles, and anchors that
    /// are not children of `parent`.
    pub fn insert(
        &mut self,
        child: NodeId,
        parent: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.node(child)?;
        if !self.node(parent)?.kind.is_container() {
            return Err(TreeError::LeafParent(parent));
        }
        if self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        if let Some(reference) = before {
            if reference != child && !self.children(parent).contains(&reference) {
                return Err(TreeError::BadReference { parent, reference });
            }
        }

        self.detach(child);
        let siblings = &mut self.node_mut(parent)?.children;
        let at = before
            .and_then(|reference| siblings.iter().position(|&c| c == reference))
            .unwrap_or(siblings.len());
        siblings.insert(at, child);
        self.node_mut(child)?.parent = Some(parent);

        debug!("insert {child} under {parent} at {at}");
        Ok(())
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.insert(child, parent, None)
    }

    /// Detach `id` and its subtree from its parent. Detached nodes are left
    /// as they are.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.node(id)?;
        if let Some(parent) = self.detach(id) {
            debug!("remove {id} from {parent}");
        }
        Ok(())
    }

    /// Detach `child`, which must currently be a child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids or when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.detach(child);
        debug!("remove {child} from {parent}");
        Ok(())
    }

    /// Unlink `id` from its parent, returning the former parent.
    fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.slot_mut(id)?.parent.take()?;
        if let Some(node) = self.slot_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        Some(parent)
    }

    /// Detach `id` and free it together with its whole subtree.
    ///
    /// The freed ids become unknown and are reused by later `create_*`
    /// calls, so callers must drop every handle into the subtree.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.node(id)?;
        self.detach(id);
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(next.index()).and_then(Option::take) {
                stack.extend(node.children);
                self.free.push(next);
                freed += 1;
            }
        }
        debug!("destroy {id} ({freed} nodes)");
        Ok(())
    }

    /// Replace the text of a text run or comment.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids and containers.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), TreeError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(current) | NodeKind::Comment(current) => *current = text.into(),
            NodeKind::Container { .. } => return Err(TreeError::NotText(id)),
        }
        debug!("set text of {id}");
        Ok(())
    }

    /// Replace every child of a container by a single text run, or by
    /// nothing when `text` is empty.
    ///
    /// A lone text run is updated in place. Otherwise the replaced children
    /// are destroyed, so repeated calls never grow the arena.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids and non-containers.
    pub fn set_element_text(&mut self, id: NodeId, text: &str) -> Result<(), TreeError> {
        let node = self.node(id)?;
        if !node.kind.is_container() {
            return Err(TreeError::LeafParent(id));
        }
        let lone = match node.children() {
            &[only] => Some(only),
            _ => None,
        };
        if let Some(run) = lone {
            if !text.is_empty() && self.node(run)?.kind.text().is_some() {
                return self.set_text(run, text);
            }
        }

        let children = self.children(id).to_vec();
        for child in children {
            self.destroy(child)?;
        }
        if !text.is_empty() {
            let run = self.create_text(text);
            self.insert(run, id, None)?;
        }
        Ok(())
    }

    /// Apply a style patch to a node.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn set_style(&mut self, id: NodeId, patch: &StylePatch) -> Result<(), TreeError> {
        self.node_mut(id)?.style.apply(patch);
        Ok(())
    }

    /// Closed style of a node.
    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.get(id).map(|node| &node.style)
    }

    /// Store the result of a layout pass.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn set_layout(&mut self, id: NodeId, layout: LayoutSnapshot) -> Result<(), TreeError> {
        self.node_mut(id)?.layout = layout;
        Ok(())
    }

    /// Text color of `id`: its own, else the nearest ancestor's.
    pub fn inherited_color(&self, id: NodeId) -> Option<&ColorSpec> {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.get(c)) {
            if let Some(color) = &node.style.color {
                return Some(color);
            }
            current = node.parent;
        }
        None
    }

    /// Nodes reachable from `root`, depth first, in paint order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }
}
