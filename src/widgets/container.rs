//! Container widget: groups children and arranges them.
//!
//! Container paints nothing itself. Its background comes from the node's
//! variant (filled by the renderer) and its arrangement from the node's
//! layout settings.

use std::any::Any;

use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A layout container.
///
/// # Examples
///
/// ```ignore
/// use termui::dom::Node;
/// use termui::widgets::{Button, Container};
///
/// let row = Node::new(Container::new())
///     .horizontal()
///     .spacing(1)
///     .child(Node::new(Button::new("OK")))
///     .child(Node::new(Button::new("Cancel")));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Container;

impl Container {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Container {
    fn widget_type(&self) -> &str {
        "Container"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
