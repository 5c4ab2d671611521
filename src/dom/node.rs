//! Node types: NodeId, NodeData, and the declarative [`Node`] builder.

use std::fmt;

use slotmap::new_key_type;

use crate::event::input::InputEvent;
use crate::geometry::{Region, Spacing};
use crate::layout::constraint::{Arrangement, GridPlacement, GridSpec, LayoutSpec, SizeHint};
use crate::widget::context::EventCtx;
use crate::widget::traits::Widget;

new_key_type! {
    /// Unique identifier for a node in the widget tree. Copy, lightweight (u64).
    pub struct NodeId;
}

/// A handler closure attached to a node.
///
/// Returns `true` when the event was consumed; otherwise the widget's own
/// [`Widget::on_event`] gets a turn.
pub type EventHandler = Box<dyn FnMut(&InputEvent, &mut EventCtx) -> bool + Send>;

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Everything stored for one node in the arena.
pub struct NodeData {
    /// The widget implementation.
    pub widget: Box<dyn Widget>,
    /// Optional unique id, used by queries and the test pilot.
    pub id: Option<String>,
    /// Theme variant token. `None` inherits the parent's style.
    pub variant: Option<String>,
    pub visible: bool,
    pub focusable: bool,
    pub disabled: bool,
    /// How this node arranges its own children.
    pub layout: LayoutSpec,
    /// How this node asks for space in its parent.
    pub size: SizeHint,
    /// Cross-axis size override in a linear parent.
    pub cross: Option<i32>,
    /// Cell placement in a grid parent.
    pub placement: GridPlacement,
    /// Rectangle from the most recent successful layout pass.
    pub rect: Region,
    pub(crate) handler: Option<EventHandler>,
}

impl NodeData {
    /// Wrap a widget with default layout settings.
    ///
    /// Focusability is taken from [`Widget::can_focus`].
    pub fn new(widget: impl Widget + 'static) -> Self {
        let focusable = widget.can_focus();
        Self {
            widget: Box::new(widget),
            id: None,
            variant: None,
            visible: true,
            focusable,
            disabled: false,
            layout: LayoutSpec::default(),
            size: SizeHint::default(),
            cross: None,
            placement: GridPlacement::default(),
            rect: Region::EMPTY,
            handler: None,
        }
    }

    /// The widget's type name.
    pub fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    /// Whether hit-testing may select this node.
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.disabled && (self.focusable || self.widget.is_interactive())
    }

    /// Whether the node belongs in the Tab focus chain.
    pub fn can_take_focus(&self) -> bool {
        self.focusable && self.visible && !self.disabled
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Downcast the widget to a concrete type.
    pub fn widget_as<W: Widget + 'static>(&self) -> Option<&W> {
        self.widget.as_any().downcast_ref::<W>()
    }

    /// Mutably downcast the widget to a concrete type.
    pub fn widget_as_mut<W: Widget + 'static>(&mut self) -> Option<&mut W> {
        self.widget.as_any_mut().downcast_mut::<W>()
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeData")
            .field("widget", &self.widget.widget_type())
            .field("id", &self.id)
            .field("variant", &self.variant)
            .field("visible", &self.visible)
            .field("focusable", &self.focusable)
            .field("disabled", &self.disabled)
            .field("size", &self.size)
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Node builder
// ---------------------------------------------------------------------------

/// An owned, not-yet-mounted subtree.
///
/// Screens are declared as a `Node` tree and mounted into a
/// [`Dom`](super::tree::Dom) in one go.
///
/// ```ignore
/// Node::new(Container::new())
///     .horizontal()
///     .child(Node::new(Label::new("Name")).fixed(10))
///     .child(Node::new(Button::new("OK")).variant("primary"))
/// ```
#[derive(Debug)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) children: Vec<Node>,
}

impl Node {
    pub fn new(widget: impl Widget + 'static) -> Self {
        Self { data: NodeData::new(widget), children: Vec::new() }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.data.id = Some(id.into());
        self
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.data.variant = Some(variant.into());
        self
    }

    pub fn size(mut self, hint: SizeHint) -> Self {
        self.data.size = hint;
        self
    }

    pub fn fixed(self, cells: i32) -> Self {
        self.size(SizeHint::Fixed(cells))
    }

    pub fn flex(self, weight: u32) -> Self {
        self.size(SizeHint::Flex(weight))
    }

    pub fn content(self) -> Self {
        self.size(SizeHint::Content)
    }

    /// Fix the cross-axis extent inside a linear parent.
    pub fn cross(mut self, cells: i32) -> Self {
        self.data.cross = Some(cells);
        self
    }

    pub fn vertical(mut self) -> Self {
        self.data.layout.arrangement = Arrangement::Vertical;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.data.layout.arrangement = Arrangement::Horizontal;
        self
    }

    pub fn grid(mut self, spec: GridSpec) -> Self {
        self.data.layout.arrangement = Arrangement::Grid(spec);
        self
    }

    pub fn spacing(mut self, cells: i32) -> Self {
        self.data.layout.spacing = cells;
        self
    }

    pub fn padding(mut self, padding: Spacing) -> Self {
        self.data.layout.padding = padding;
        self
    }

    /// Place this node in a grid parent.
    pub fn place(mut self, placement: GridPlacement) -> Self {
        self.data.placement = placement;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.data.visible = false;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.data.disabled = disabled;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.data.focusable = focusable;
        self
    }

    /// Attach an event handler closure.
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&InputEvent, &mut EventCtx) -> bool + Send + 'static,
    {
        self.data.handler = Some(Box::new(handler));
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
