//! Tree queries: by id, by widget type, by predicate.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::widget::traits::Widget;

impl Dom {
    /// Find the node whose `id` matches.
    ///
    /// Searches the whole arena, so detached subtrees are found too.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// All nodes under the root whose widget type matches, in tree order.
    pub fn query_by_type(&self, widget_type: &str) -> Vec<NodeId> {
        self.query_all(|data| data.widget_type() == widget_type)
    }

    /// All nodes under the root matching `predicate`, in tree order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    /// Borrow the widget behind `id` as a concrete type.
    pub fn widget<W: Widget + 'static>(&self, id: &str) -> Option<&W> {
        let node = self.query_by_id(id)?;
        self.get(node)?.widget_as::<W>()
    }

    /// Mutably borrow the widget behind `id` as a concrete type.
    pub fn widget_mut<W: Widget + 'static>(&mut self, id: &str) -> Option<&mut W> {
        let node = self.query_by_id(id)?;
        self.get_mut(node)?.widget_as_mut::<W>()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::Node;
    use crate::dom::tree::Dom;
    use crate::widgets::{Button, Container, Label};

    fn build() -> Dom {
        let mut dom = Dom::new();
        dom.mount(
            Node::new(Container::new())
                .id("root")
                .child(Node::new(Label::new("title")).id("title"))
                .child(
                    Node::new(Container::new())
                        .id("row")
                        .child(Node::new(Button::new("OK")).id("ok"))
                        .child(Node::new(Button::new("Cancel")).id("cancel")),
                ),
        );
        dom
    }

    #[test]
    fn by_id() {
        let dom = build();
        let ok = dom.query_by_id("ok").unwrap();
        assert_eq!(dom.get(ok).unwrap().widget_type(), "Button");
        assert!(dom.query_by_id("missing").is_none());
    }

    #[test]
    fn by_type_in_tree_order() {
        let dom = build();
        let buttons = dom.query_by_type("Button");
        let ids: Vec<_> = buttons
            .iter()
            .map(|&b| dom.get(b).unwrap().id.clone().unwrap())
            .collect();
        assert_eq!(ids, ["ok", "cancel"]);
    }

    #[test]
    fn by_predicate() {
        let dom = build();
        assert_eq!(dom.query_all(|d| d.focusable).len(), 2);
    }

    #[test]
    fn typed_widget_access() {
        let mut dom = build();
        dom.widget_mut::<Label>("title").unwrap().set_text("changed");
        assert_eq!(dom.widget::<Label>("title").unwrap().text(), "changed");
        assert!(dom.widget::<Label>("ok").is_none());
    }
}
