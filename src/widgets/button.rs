//! Button widget: an interactive, focusable button.
//!
//! Renders its label centered within its region. Enter, Space or a left
//! click activates it, posting the button's action as a custom command.

use std::any::Any;

use crate::event::input::{InputEvent, Key, MouseAction, MouseBtn};
use crate::event::message::Command;
use crate::geometry::Size;
use crate::render::canvas::Canvas;
use crate::style::{Attributes, StyleResolved};
use crate::widget::context::EventCtx;
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// An interactive button widget with a centered label.
///
/// Disabling is a node flag (`Node::disabled`): the router never delivers
/// to a disabled node, the focus chain skips it and it paints dimmed.
/// A hovered button underlines its label.
///
/// # Examples
///
/// ```ignore
/// let save = Node::new(Button::new("Save").action("save"));
/// let locked = Node::new(Button::new("Locked")).disabled(true);
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    action: Option<String>,
    hovered: bool,
    presses: u32,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
            hovered: false,
            presses: 0,
        }
    }

    /// Command name posted as [`Command::Custom`] on activation.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// How many times the button has been activated.
    pub fn presses(&self) -> u32 {
        self.presses
    }

    fn activate(&mut self, ctx: &mut EventCtx) {
        self.presses += 1;
        if let Some(action) = &self.action {
            ctx.post(Command::Custom(action.clone()));
        }
        ctx.request_redraw();
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    /// Label plus two cells of padding on each side, one row.
    fn measure(&self, _available: Size) -> Size {
        Size::new(self.label.chars().count() as i32 + 4, 1)
    }

    fn paint(&self, canvas: &mut Canvas<'_>, style: &StyleResolved) {
        let width = canvas.width();
        let height = canvas.height();
        if width == 0 || height == 0 {
            return;
        }
        let label_len = self.label.chars().count() as i32;
        let x = ((width - label_len) / 2).max(0);
        let style = if self.hovered { style.with_attrs(Attributes::UNDERLINE) } else { *style };
        canvas.put_str(x, height / 2, &self.label, &style);
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut EventCtx) -> bool {
        let activated = match event {
            InputEvent::Key(key) => {
                matches!(key.code, Key::Enter | Key::Char(' ')) && key.modifiers.is_empty()
            }
            InputEvent::Mouse(mouse) => mouse.kind == MouseAction::Down(MouseBtn::Left),
            _ => false,
        };
        if activated {
            self.activate(ctx);
        }
        activated
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn on_hover(&mut self, hovered: bool) {
        self.hovered = hovered;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::{KeyEvent, Modifiers};
    use crate::geometry::Region;
    use crate::render::frame::Frame;

    #[test]
    fn disabled_node_is_not_focusable() {
        assert!(Button::new("OK").can_focus());
        let data = crate::dom::node::Node::new(Button::new("OK")).disabled(true).data;
        assert!(!data.can_take_focus());
        assert!(!data.is_interactive());
    }

    #[test]
    fn measure_adds_padding() {
        assert_eq!(Button::new("OK").measure(Size::new(80, 24)), Size::new(6, 1));
    }

    #[test]
    fn paint_centers_label() {
        let mut frame = Frame::new(10, 3);
        Button::new("OK").paint(
            &mut Canvas::new(&mut frame, Region::new(0, 0, 10, 3)),
            &StyleResolved::default(),
        );
        assert_eq!(frame.row_text(0), "");
        assert_eq!(frame.row_text(1), "    OK");
    }

    #[test]
    fn paint_clips_long_label() {
        let mut frame = Frame::new(4, 1);
        Button::new("Submit").paint(
            &mut Canvas::new(&mut frame, Region::new(0, 0, 4, 1)),
            &StyleResolved::default(),
        );
        assert_eq!(frame.row_text(0), "Subm");
    }

    #[test]
    fn enter_posts_action() {
        let mut button = Button::new("Save").action("save");
        let mut ctx = EventCtx::new();
        let enter = InputEvent::Key(KeyEvent::new(Key::Enter, Modifiers::NONE));
        assert!(button.on_event(&enter, &mut ctx));
        assert_eq!(button.presses(), 1);
        assert_eq!(ctx.take_commands(), vec![Command::custom("save")]);
    }

    #[test]
    fn click_activates_without_action() {
        let mut button = Button::new("Plain");
        let mut ctx = EventCtx::new();
        let click = InputEvent::mouse(MouseAction::Down(MouseBtn::Left), 0, 0);
        assert!(button.on_event(&click, &mut ctx));
        assert!(ctx.take_commands().is_empty());
        assert!(ctx.needs_redraw());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut button = Button::new("X").action("x");
        let mut ctx = EventCtx::new();
        assert!(!button.on_event(&InputEvent::key(Key::Char('a')), &mut ctx));
        assert!(!button.on_event(&InputEvent::Key(KeyEvent::new(Key::Enter, Modifiers::CTRL)), &mut ctx));
        assert!(ctx.is_empty());
    }

    #[test]
    fn hover_tracking() {
        let mut button = Button::new("X");
        button.on_hover(true);
        assert!(button.is_hovered());
        button.on_hover(false);
        assert!(!button.is_hovered());
    }

    #[test]
    fn hovered_label_is_underlined() {
        let mut button = Button::new("Go");
        let mut frame = Frame::new(6, 1);
        button.on_hover(true);
        button.paint(&mut Canvas::new(&mut frame, Region::new(0, 0, 6, 1)), &StyleResolved::default());
        assert!(frame.get(2, 0).unwrap().attrs.contains(Attributes::UNDERLINE));
        assert!(frame.get(0, 0).unwrap().attrs.is_empty());

        button.on_hover(false);
        button.paint(&mut Canvas::new(&mut frame, Region::new(0, 0, 6, 1)), &StyleResolved::default());
        assert!(frame.get(2, 0).unwrap().attrs.is_empty());
    }
}
