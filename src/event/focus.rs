//! Tab-order focus chain.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Maintains an ordered list of focusable nodes for tab navigation.
///
/// The chain is rebuilt from the DOM whenever the tree changes. Focus cycles
/// through the chain in forward (Tab) or backward (Shift+Tab) order.
#[derive(Debug, Default)]
pub struct FocusChain {
    /// Focusable nodes in tab order (depth-first).
    nodes: Vec<NodeId>,
    current: Option<usize>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the chain from the DOM.
    ///
    /// Collects, depth-first from the root, every node that is focusable,
    /// enabled and shown (itself and all ancestors visible). The previously
    /// focused node keeps focus if it is still in the chain.
    pub fn rebuild(&mut self, dom: &Dom) {
        let old_focused = self.current_node();

        self.nodes.clear();
        self.current = None;

        let Some(root) = dom.root() else {
            return;
        };

        self.nodes.extend(dom.walk_depth_first(root).into_iter().filter(|&id| {
            dom.get(id).is_some_and(|data| data.can_take_focus()) && dom.is_shown(id)
        }));

        if let Some(old_id) = old_focused {
            self.current = self.nodes.iter().position(|&n| n == old_id);
        }
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current.and_then(|idx| self.nodes.get(idx).copied())
    }

    /// Move focus to the next node in the chain. Wraps around.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.current = Some(next);
        self.nodes.get(next).copied()
    }

    /// Move focus to the previous node in the chain. Wraps around.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.nodes.len() - 1,
            Some(idx) => idx - 1,
        };
        self.current = Some(prev);
        self.nodes.get(prev).copied()
    }

    /// Focus a specific node. Returns `false` if it is not in the chain.
    pub fn focus_node(&mut self, id: NodeId) -> bool {
        match self.nodes.iter().position(|&n| n == id) {
            Some(pos) => {
                self.current = Some(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the chain entirely (used when the active screen changes).
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::Node;
    use crate::widgets::{Button, Container, Label};

    fn sample() -> (Dom, [NodeId; 3]) {
        let mut dom = Dom::new();
        dom.mount(
            Node::new(Container::new())
                .child(Node::new(Button::new("A")).id("a"))
                .child(Node::new(Label::new("not focusable")))
                .child(
                    Node::new(Container::new())
                        .id("group")
                        .child(Node::new(Button::new("B")).id("b")),
                )
                .child(Node::new(Button::new("C")).id("c")),
        );
        let ids = ["a", "b", "c"].map(|id| dom.query_by_id(id).unwrap());
        (dom, ids)
    }

    #[test]
    fn new_chain_is_empty() {
        let chain = FocusChain::new();
        assert!(chain.is_empty());
        assert!(chain.current_node().is_none());
    }

    #[test]
    fn rebuild_collects_focusable_in_tree_order() {
        let (dom, [a, b, c]) = sample();
        let mut chain = FocusChain::new();
        chain.rebuild(&dom);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.focus_next(), Some(a));
        assert_eq!(chain.focus_next(), Some(b));
        assert_eq!(chain.focus_next(), Some(c));
        assert_eq!(chain.focus_next(), Some(a));
    }

    #[test]
    fn focus_previous_wraps() {
        let (dom, [a, _, c]) = sample();
        let mut chain = FocusChain::new();
        chain.rebuild(&dom);
        assert_eq!(chain.focus_previous(), Some(c));
        chain.focus_node(a);
        assert_eq!(chain.focus_previous(), Some(c));
    }

    #[test]
    fn rebuild_skips_hidden_subtrees_and_disabled() {
        let (mut dom, [a, _, c]) = sample();
        let group = dom.query_by_id("group").unwrap();
        dom.get_mut(group).unwrap().visible = false;
        dom.get_mut(c).unwrap().disabled = true;

        let mut chain = FocusChain::new();
        chain.rebuild(&dom);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.focus_next(), Some(a));
    }

    #[test]
    fn rebuild_preserves_or_clears_focus() {
        let (mut dom, [_, b, c]) = sample();
        let mut chain = FocusChain::new();
        chain.rebuild(&dom);
        assert!(chain.focus_node(b));

        dom.get_mut(c).unwrap().disabled = true;
        chain.rebuild(&dom);
        assert_eq!(chain.current_node(), Some(b));

        dom.remove(b);
        chain.rebuild(&dom);
        assert!(chain.current_node().is_none());
    }

    #[test]
    fn focus_node_not_in_chain() {
        let (dom, _) = sample();
        let label = dom.query_by_type("Label")[0];
        let mut chain = FocusChain::new();
        chain.rebuild(&dom);
        assert!(!chain.focus_node(label));
        assert!(chain.current_node().is_none());
    }

    #[test]
    fn empty_chain_navigation() {
        let mut chain = FocusChain::new();
        assert!(chain.focus_next().is_none());
        assert!(chain.focus_previous().is_none());
    }
}
