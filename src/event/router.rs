//! Input routing: global bindings, focus, hover and hit-tested delivery.
//!
//! Routing order for one event:
//!
//! - **Key**: a global binding wins; otherwise the focused node gets it.
//! - **Mouse**: the target is the deepest interactive node under the pointer
//!   in the last layout. A move that changes the target fires
//!   `on_hover(false)` on the old one and `on_hover(true)` on the new one. A
//!   left press on a focusable target focuses it.
//! - **Paste**: the focused node.
//!
//! Delivery calls the node's handler closure first and, if that does not
//! consume the event, [`Widget::on_event`](crate::widget::Widget::on_event).
//! Events do not bubble. Anything without a target is dropped.

use tracing::{debug, trace};

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::Offset;
use crate::layout::spatial::SpatialMap;
use crate::theme::Interaction;
use crate::widget::context::EventCtx;

use super::binding::{BindingAction, KeyBindingRegistry};
use super::focus::FocusChain;
use super::input::{InputEvent, MouseAction, MouseBtn};

// ---------------------------------------------------------------------------
// InteractionState
// ---------------------------------------------------------------------------

/// Focus and hover for the active screen.
///
/// Owned by the app, passed by reference into routing and painting, and
/// reset whenever the active screen changes.
#[derive(Debug, Default)]
pub struct InteractionState {
    pub focus: FocusChain,
    hovered: Option<NodeId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.current_node()
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Style-relevant flags for one node.
    pub fn interaction_for(&self, dom: &Dom, id: NodeId) -> Interaction {
        Interaction {
            hovered: self.hovered == Some(id),
            focused: self.focused() == Some(id),
            disabled: dom.get(id).is_some_and(|d| d.disabled),
        }
    }

    /// Re-derive the focus chain after structural edits and forget a hovered
    /// node that no longer exists or is no longer shown.
    pub fn sync(&mut self, dom: &Dom) {
        self.focus.rebuild(dom);
        if let Some(id) = self.hovered {
            if !dom.contains(id) || !dom.is_shown(id) {
                self.hovered = None;
            }
        }
    }

    /// Forget everything (screen switch).
    pub fn reset(&mut self) {
        self.focus.reset();
        self.hovered = None;
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// What happened to a routed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A global key binding matched; its command was posted to the context.
    Bound(BindingAction),
    /// Delivered to a node; `handled` is what the node reported.
    Delivered { node: NodeId, handled: bool },
    /// Terminal size changed; the caller resizes the renderer.
    Resized { width: u16, height: u16 },
    /// No target. Not an error.
    Dropped,
}

/// Everything the router reads or mutates for one event.
pub struct Router<'a> {
    pub dom: &'a mut Dom,
    pub spatial: &'a SpatialMap,
    pub bindings: &'a KeyBindingRegistry,
    pub state: &'a mut InteractionState,
}

impl Router<'_> {
    /// Route one event, collecting side effects in `ctx`.
    pub fn route(&mut self, event: &InputEvent, ctx: &mut EventCtx) -> RouteOutcome {
        match event {
            InputEvent::Key(key) => {
                if let Some(action) = self.bindings.resolve(key) {
                    trace!(?key, ?action, "global binding");
                    ctx.post(action.to_command());
                    return RouteOutcome::Bound(action.clone());
                }
                self.deliver_to_focused(event, ctx)
            }
            InputEvent::Paste(_) => self.deliver_to_focused(event, ctx),
            InputEvent::Mouse(mouse) => {
                let target = self.spatial.hit_test(Offset::new(i32::from(mouse.x), i32::from(mouse.y)));
                if mouse.kind == MouseAction::Moved {
                    self.update_hover(target, ctx);
                }
                let Some(node) = target else {
                    trace!(x = mouse.x, y = mouse.y, "no mouse target");
                    return RouteOutcome::Dropped;
                };
                if mouse.kind == MouseAction::Down(MouseBtn::Left) {
                    self.focus_on_click(node, ctx);
                }
                self.deliver(node, event, ctx)
            }
            InputEvent::Resize { width, height } => RouteOutcome::Resized { width: *width, height: *height },
            InputEvent::FocusGained | InputEvent::FocusLost => RouteOutcome::Dropped,
        }
    }

    fn deliver_to_focused(&mut self, event: &InputEvent, ctx: &mut EventCtx) -> RouteOutcome {
        match self.state.focused() {
            Some(node) => self.deliver(node, event, ctx),
            None => {
                debug!("no focused node; event dropped");
                RouteOutcome::Dropped
            }
        }
    }

    fn update_hover(&mut self, target: Option<NodeId>, ctx: &mut EventCtx) {
        let previous = self.state.hovered;
        if previous == target {
            return;
        }
        if let Some(data) = previous.and_then(|id| self.dom.get_mut(id)) {
            data.widget.on_hover(false);
        }
        if let Some(data) = target.and_then(|id| self.dom.get_mut(id)) {
            data.widget.on_hover(true);
        }
        debug!(?previous, ?target, "hover changed");
        self.state.hovered = target;
        ctx.request_redraw();
    }

    fn focus_on_click(&mut self, node: NodeId, ctx: &mut EventCtx) {
        let focusable = self.dom.get(node).is_some_and(|d| d.can_take_focus());
        if !focusable || self.state.focused() == Some(node) {
            return;
        }
        if !self.state.focus.focus_node(node) {
            // The chain can lag behind a just-applied edit.
            self.state.focus.rebuild(self.dom);
            self.state.focus.focus_node(node);
        }
        debug!(?node, "focus set by click");
        ctx.request_redraw();
    }

    fn deliver(&mut self, node: NodeId, event: &InputEvent, ctx: &mut EventCtx) -> RouteOutcome {
        let Some(data) = self.dom.get_mut(node) else {
            return RouteOutcome::Dropped;
        };
        if data.disabled || !data.visible {
            debug!(?node, "target disabled; event dropped");
            return RouteOutcome::Dropped;
        }
        ctx.set_node(Some(node));
        let mut handled = data.handler.as_mut().is_some_and(|handler| handler(event, ctx));
        if !handled {
            handled = data.widget.on_event(event, ctx);
        }
        ctx.set_node(None);
        if !handled {
            trace!(?node, "event not handled");
        }
        RouteOutcome::Delivered { node, handled }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
