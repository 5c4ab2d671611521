//! Deferred structural edits.
//!
//! Handlers and update hooks never touch the tree structure directly while a
//! pass may be in flight. They queue [`TreeOp`]s, and the app applies them in
//! order at the safe point before the next layout.

use std::fmt;

use super::node::{Node, NodeData, NodeId};
use super::tree::{Dom, TreeError};

/// How an op names the node it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    Id(String),
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Target::Node(id)
    }
}

impl From<&str> for Target {
    fn from(id: &str) -> Self {
        Target::Id(id.to_owned())
    }
}

impl From<String> for Target {
    fn from(id: String) -> Self {
        Target::Id(id)
    }
}

/// A mutation applied to a node's data at the safe point.
pub type NodeUpdate = Box<dyn FnOnce(&mut NodeData) + Send>;

/// One queued edit.
pub enum TreeOp {
    /// Mount a subtree as the last child of `parent`.
    Append { parent: Target, node: Node },
    /// Remove a node and its subtree.
    Remove(Target),
    /// Move a node under a new parent.
    Reparent { node: Target, new_parent: Target },
    SetVisible(Target, bool),
    SetDisabled(Target, bool),
    /// Arbitrary in-place change to a node (widget state, variant, size).
    Update(Target, NodeUpdate),
}

impl fmt::Debug for TreeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append { parent, node } => {
                write!(f, "Append({parent:?}, {})", node.data.widget_type())
            }
            Self::Remove(t) => write!(f, "Remove({t:?})"),
            Self::Reparent { node, new_parent } => write!(f, "Reparent({node:?} -> {new_parent:?})"),
            Self::SetVisible(t, v) => write!(f, "SetVisible({t:?}, {v})"),
            Self::SetDisabled(t, v) => write!(f, "SetDisabled({t:?}, {v})"),
            Self::Update(t, _) => write!(f, "Update({t:?}, <fn>)"),
        }
    }
}

impl Dom {
    fn resolve_target(&self, target: &Target) -> Result<NodeId, TreeError> {
        match target {
            Target::Node(id) if self.contains(*id) => Ok(*id),
            Target::Node(id) => Err(TreeError::UnknownNode(*id)),
            Target::Id(name) => self
                .query_by_id(name)
                .ok_or_else(|| TreeError::UnknownId(name.clone())),
        }
    }

    /// Apply a single queued edit.
    pub fn apply(&mut self, op: TreeOp) -> Result<(), TreeError> {
        match op {
            TreeOp::Append { parent, node } => {
                let parent = self.resolve_target(&parent)?;
                self.mount_child(parent, node)?;
            }
            TreeOp::Remove(target) => {
                let id = self.resolve_target(&target)?;
                self.remove(id);
            }
            TreeOp::Reparent { node, new_parent } => {
                let node = self.resolve_target(&node)?;
                let new_parent = self.resolve_target(&new_parent)?;
                self.reparent(node, new_parent)?;
            }
            TreeOp::SetVisible(target, visible) => {
                let id = self.resolve_target(&target)?;
                if let Some(data) = self.get_mut(id) {
                    data.visible = visible;
                }
            }
            TreeOp::SetDisabled(target, disabled) => {
                let id = self.resolve_target(&target)?;
                if let Some(data) = self.get_mut(id) {
                    data.disabled = disabled;
                }
            }
            TreeOp::Update(target, update) => {
                let id = self.resolve_target(&target)?;
                if let Some(data) = self.get_mut(id) {
                    update(data);
                }
            }
        }
        Ok(())
    }
}
