//! Tree operations: insert, mount, remove, reparent, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use super::node::{Node, NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// Structural misuse of the widget tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("cannot move node {node:?} under {new_parent:?}: it would become its own ancestor")]
    Cycle { node: NodeId, new_parent: NodeId },
    #[error("no widget with id `{0}`")]
    UnknownId(String),
}

/// The widget tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Every non-root node has exactly one parent; the only way to move a node is
/// [`reparent`](Dom::reparent), which refuses to create cycles.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a parentless node. The first one inserted becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        Ok(id)
    }

    /// Mount a declarative subtree as the root of an empty tree (or as a new
    /// parentless node). Returns the id of the subtree's top node.
    pub fn mount(&mut self, node: Node) -> NodeId {
        let Node { data, children } = node;
        let id = self.insert(data);
        for child in children {
            self.mount_under(id, child);
        }
        id
    }

    /// Mount a declarative subtree as the last child of `parent`.
    pub fn mount_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        Ok(self.mount_under(parent, node))
    }

    fn mount_under(&mut self, parent: NodeId, node: Node) -> NodeId {
        let Node { data, children } = node;
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        for child in children {
            self.mount_under(id, child);
        }
        id
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::from([id]);
        let mut removed = None;
        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }
        removed
    }

    /// Move `node` (with its subtree) to the end of `new_parent`'s children.
    ///
    /// Fails with [`TreeError::Cycle`] if `new_parent` is `node` itself or one
    /// of its descendants.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(node) {
            return Err(TreeError::UnknownNode(node));
        }
        if !self.nodes.contains_key(new_parent) {
            return Err(TreeError::UnknownNode(new_parent));
        }
        if node == new_parent || self.ancestors(new_parent).contains(&node) {
            return Err(TreeError::Cycle { node, new_parent });
        }

        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }
        if self.root == Some(node) {
            // The moved root now hangs under new_parent's own tree.
            let top = self.ancestors(new_parent).last().copied().unwrap_or(new_parent);
            self.root = Some(top);
        }
        self.parent.insert(node, new_parent);
        if let Some(siblings) = self.children.get_mut(new_parent) {
            siblings.push(node);
        }
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of a node in declaration order. Empty if the node has none
    /// or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Number of ancestors (the root has depth 0).
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `id` and all of its ancestors are visible.
    pub fn is_shown(&self, id: NodeId) -> bool {
        let visible = |n: NodeId| self.nodes.get(n).is_some_and(|d| d.visible);
        visible(id) && self.ancestors(id).into_iter().all(visible)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dom")
            .field("len", &self.nodes.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
