//! Widget trait: measure, paint, handle events.
//!
//! The tree, layout engine, renderer and input router only ever talk to a
//! widget through this trait. Concrete kinds (labels, buttons, containers,
//! user widgets) plug in by implementing it.

use std::any::Any;

use crate::event::input::InputEvent;
use crate::geometry::Size;
use crate::render::canvas::Canvas;
use crate::style::StyleResolved;

use super::context::EventCtx;

/// Core trait implemented by all widgets.
///
/// Widget is object-safe and stored as `Box<dyn Widget>` in the tree. It is
/// `Send` so the whole app state can move between the app loops.
pub trait Widget: Send {
    /// Type name used by queries and debug output (e.g. "Button").
    fn widget_type(&self) -> &str;

    /// Desired size given the space the parent can offer.
    ///
    /// Only consulted for content-sized children and auto grid tracks. The
    /// answer is clamped by the layout engine, so it may exceed `available`.
    fn measure(&self, available: Size) -> Size {
        let _ = available;
        Size::ZERO
    }

    /// Draw into the node's rectangle.
    ///
    /// `canvas` is already clipped to the assigned rectangle and the renderer
    /// has filled it with `style`'s background when the node has a variant.
    /// Children are painted afterwards by the renderer.
    fn paint(&self, canvas: &mut Canvas<'_>, style: &StyleResolved) {
        let _ = (canvas, style);
    }

    /// Handle an event routed to this node. Returns whether it was consumed.
    fn on_event(&mut self, event: &InputEvent, ctx: &mut EventCtx) -> bool {
        let _ = (event, ctx);
        false
    }

    /// Whether the widget can receive keyboard focus. Defaults to `false`.
    fn can_focus(&self) -> bool {
        false
    }

    /// Whether hit-testing should consider this widget a mouse target.
    fn is_interactive(&self) -> bool {
        self.can_focus()
    }

    /// Called when the pointer enters (`true`) or leaves (`false`) the node.
    fn on_hover(&mut self, hovered: bool) {
        let _ = hovered;
    }

    /// Called once per update-loop tick.
    fn on_tick(&mut self, ctx: &mut EventCtx) {
        let _ = ctx;
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
