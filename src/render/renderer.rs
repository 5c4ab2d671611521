//! The render pass: layout, paint, diff, encode.
//!
//! [`Renderer`] owns the two frames. A pass resolves the active screen's
//! layout against the frame size, paints the tree into `next`, diffs it
//! against `previous`, encodes the changes and swaps the frames. Writing the
//! bytes is left to the caller so the pass itself never waits on I/O.

use std::io;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::router::InteractionState;
use crate::geometry::Region;
use crate::layout::engine::{resolve, LayoutError};
use crate::screen::Screen;
use crate::style::StyleResolved;
use crate::theme::{Interaction, Theme};

use super::canvas::Canvas;
use super::diff::diff;
use super::frame::Frame;
use super::output::encode;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The pass was abandoned; `previous` is still what the terminal shows.
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
    #[error("output encoding failed: {0}")]
    Io(#[from] io::Error),
}

/// Result of one successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Terminal bytes for the changed cells. Empty when nothing changed.
    pub bytes: Vec<u8>,
    /// Number of cells that changed.
    pub changes: usize,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Double-buffered frame owner.
#[derive(Debug)]
pub struct Renderer {
    previous: Frame,
    next: Frame,
}

impl Renderer {
    /// A renderer for a `width` x `height` terminal.
    ///
    /// The terminal contents are unknown at startup, so the first pass
    /// repaints every cell.
    pub fn new(width: u16, height: u16) -> Self {
        Self { previous: Frame::invalidated(width, height), next: Frame::new(width, height) }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.next.width(), self.next.height())
    }

    /// Resize both frames. The next pass is a full repaint.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "renderer resized");
        self.previous = Frame::invalidated(width, height);
        self.next = Frame::new(width, height);
    }

    /// Forget what the terminal shows, forcing a full repaint.
    pub fn invalidate(&mut self) {
        let (width, height) = self.size();
        self.previous = Frame::invalidated(width, height);
    }

    /// The frame the terminal currently shows (after the last pass).
    pub fn previous(&self) -> &Frame {
        &self.previous
    }

    /// Run one pass over `screen`.
    ///
    /// On a [`LayoutError`] nothing is painted, both frames are left as they
    /// were and the screen keeps its previous rectangles and spatial map.
    pub fn render(
        &mut self,
        screen: &mut Screen,
        theme: &Theme,
        interaction: &InteractionState,
    ) -> Result<Rendered, RenderError> {
        if let Err(err) = self.compose(screen, theme, interaction) {
            warn!(screen = screen.name(), error = %err, "layout failed; keeping previous frame");
            return Err(err.into());
        }

        let changes = diff(&self.previous, &self.next);
        let mut bytes = Vec::with_capacity(changes.len() * 2);
        encode(&changes, &mut bytes)?;
        std::mem::swap(&mut self.previous, &mut self.next);
        trace!(changes = changes.len(), bytes = bytes.len(), "render pass");
        Ok(Rendered { bytes, changes: changes.len() })
    }

    /// Lay out and paint `screen` into `next`.
    fn compose(&mut self, screen: &mut Screen, theme: &Theme, interaction: &InteractionState) -> Result<(), LayoutError> {
        let (width, height) = self.size();
        let area = Region::new(0, 0, i32::from(width), i32::from(height));

        match screen.root() {
            Some(root) => {
                let layout = resolve(&screen.dom, root, area)?;
                layout.apply(&mut screen.dom);
                screen.spatial.rebuild(&screen.dom, &layout);
            }
            None => screen.spatial.clear(),
        }

        let base = theme.resolve(&screen.background, Interaction::default());
        self.next.fill(&base);
        if let Some(root) = screen.root() {
            paint_tree(&mut self.next, &screen.dom, root, base, theme, interaction);
        }
        Ok(())
    }
}

/// Paint `root` and its shown descendants, parents before children.
///
/// A node with a variant resolves its own style and fills its rectangle with
/// it; a node without one paints with its parent's style plus its own
/// interaction attributes.
fn paint_tree(
    frame: &mut Frame,
    dom: &Dom,
    root: NodeId,
    base: StyleResolved,
    theme: &Theme,
    interaction: &InteractionState,
) {
    let mut stack = vec![(root, base)];
    while let Some((id, inherited)) = stack.pop() {
        let Some(data) = dom.get(id) else {
            continue;
        };
        if !data.visible {
            continue;
        }
        let flags = interaction.interaction_for(dom, id);
        let style = match &data.variant {
            Some(variant) => theme.resolve(variant, flags),
            None => inherited.with_attrs(flags.attrs()),
        };

        let mut canvas = Canvas::new(frame, data.rect);
        if !canvas.is_empty() {
            if data.variant.is_some() {
                canvas.fill(&style);
            }
            data.widget.paint(&mut canvas, &style);
        }
        stack.extend(dom.children(id).iter().rev().map(|&child| (child, style)));
    }
}

// ===========================================================================
// Tests
// ===========================================================================
