//! Label widget: static, possibly multi-line text.

use std::any::Any;

use crate::geometry::Size;
use crate::render::canvas::Canvas;
use crate::style::StyleResolved;
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Displays text, one line per `\n`. Lines longer than the assigned width
/// are clipped.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    /// Longest line by width, number of lines by height.
    fn measure(&self, _available: Size) -> Size {
        if self.text.is_empty() {
            return Size::ZERO;
        }
        let (width, height) = self
            .text
            .lines()
            .fold((0, 0), |(w, h), line| (w.max(line.chars().count() as i32), h + 1));
        Size::new(width, height)
    }

    fn paint(&self, canvas: &mut Canvas<'_>, style: &StyleResolved) {
        for (row, line) in self.text.lines().enumerate().take(canvas.height() as usize) {
            canvas.put_str(0, row as i32, line, style);
        }
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
