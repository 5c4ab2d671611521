//! Snapshot helpers: frames as plain text.

use crate::dom::node::Node;
use crate::event::router::InteractionState;
use crate::geometry::Region;
use crate::render::frame::Frame;
use crate::render::renderer::{RenderError, Renderer};
use crate::screen::Screen;
use crate::theme::Theme;

/// The characters of `frame`, one line per row.
///
/// Trailing spaces on each row are trimmed; rows are joined with `'\n'` and
/// the last row has no trailing newline.
pub fn frame_to_string(frame: &Frame) -> String {
    (0..frame.height()).map(|row| frame.row_text(row)).collect::<Vec<_>>().join("\n")
}

/// The characters inside `region`, clipped to the frame, one line per row.
pub fn region_to_string(frame: &Frame, region: Region) -> String {
    let frame_area = Region::new(0, 0, i32::from(frame.width()), i32::from(frame.height()));
    let area = region.intersection(frame_area);
    (area.y..area.bottom())
        .map(|row| {
            let line: String = (area.x..area.right())
                .filter_map(|col| frame.get(col as u16, row as u16))
                .map(|cell| if cell.ch == '\0' { ' ' } else { cell.ch })
                .collect();
            line.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lay out and paint `root` into a `width` x `height` frame with the
/// default theme and no focus or hover.
pub fn render_node(root: Node, width: u16, height: u16) -> Result<Frame, RenderError> {
    let mut screen = Screen::new("snapshot", root);
    let mut renderer = Renderer::new(width, height);
    renderer.render(&mut screen, &Theme::default(), &InteractionState::new())?;
    Ok(renderer.previous().clone())
}

/// [`render_node`] followed by [`frame_to_string`].
pub fn render_to_string(root: Node, width: u16, height: u16) -> Result<String, RenderError> {
    render_node(root, width, height).map(|frame| frame_to_string(&frame))
}

// ===========================================================================
// Tests
// ===========================================================================
