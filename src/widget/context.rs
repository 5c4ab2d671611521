//! Side-effect collector handed to handlers, widgets and update hooks.

use crate::dom::node::NodeId;
use crate::dom::ops::{Target, TreeOp};
use crate::event::message::Command;

use super::traits::Widget;

/// Collects the effects of handling an event or a tick.
///
/// Nothing here touches the tree directly: structural edits are queued as
/// [`TreeOp`]s and commands are forwarded to the app loop, both applied at
/// the next safe point.
#[derive(Debug, Default)]
pub struct EventCtx {
    node: Option<NodeId>,
    ops: Vec<TreeOp>,
    commands: Vec<Command>,
    redraw: bool,
}

impl EventCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node currently being called, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub(crate) fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }

    /// Queue a structural edit.
    pub fn queue(&mut self, op: TreeOp) {
        self.ops.push(op);
        self.redraw = true;
    }

    /// Queue an in-place change to a widget of concrete type `W`.
    ///
    /// Silently does nothing if the target turns out to be another type.
    pub fn update<W, F>(&mut self, target: impl Into<Target>, f: F)
    where
        W: Widget + 'static,
        F: FnOnce(&mut W) + Send + 'static,
    {
        self.queue(TreeOp::Update(
            target.into(),
            Box::new(move |data| {
                if let Some(widget) = data.widget_as_mut::<W>() {
                    f(widget);
                }
            }),
        ));
    }

    /// Send a command to the app loop.
    pub fn post(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn quit(&mut self) {
        self.post(Command::Quit);
    }

    pub fn show_screen(&mut self, name: impl Into<String>) {
        self.post(Command::ShowScreen(name.into()));
    }

    /// Ask for a repaint after this event.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Whether nothing was queued, posted or requested.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.commands.is_empty() && !self.redraw
    }

    pub fn take_ops(&mut self) -> Vec<TreeOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::widgets::Label;

    #[test]
    fn starts_empty() {
        let ctx = EventCtx::new();
        assert!(ctx.is_empty());
        assert!(ctx.node().is_none());
    }

    #[test]
    fn commands_are_collected_in_order() {
        let mut ctx = EventCtx::new();
        ctx.show_screen("help");
        ctx.quit();
        assert_eq!(
            ctx.take_commands(),
            vec![Command::ShowScreen("help".into()), Command::Quit]
        );
        assert!(ctx.take_commands().is_empty());
    }

    #[test]
    fn typed_update_applies_to_matching_widget() {
        let mut ctx = EventCtx::new();
        ctx.update::<Label, _>("count", |label| label.set_text("1"));
        assert!(ctx.needs_redraw());

        let mut ops = ctx.take_ops();
        assert_eq!(ops.len(), 1);
        let mut data = NodeData::new(Label::new("0"));
        if let TreeOp::Update(_, apply) = ops.remove(0) {
            apply(&mut data);
        }
        assert_eq!(data.widget_as::<Label>().unwrap().text(), "1");
    }
}
