//! Canvas: a frame view clipped to one node's rectangle.
//!
//! Widgets paint in local coordinates; anything outside the rectangle (or
//! the frame) is dropped, which is how oversized content gets clipped.

use crate::geometry::Region;
use crate::style::{Cell, StyleResolved};

use super::frame::Frame;

/// A clipped, locally-addressed view into a [`Frame`].
pub struct Canvas<'a> {
    frame: &'a mut Frame,
    /// Assigned rectangle, in frame coordinates.
    area: Region,
    /// `area` intersected with the frame bounds.
    clip: Region,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut Frame, area: Region) -> Self {
        let bounds = Region::new(0, 0, frame.width() as i32, frame.height() as i32);
        let clip = area.intersection(bounds);
        Self { frame, area, clip }
    }

    /// Width of the assigned rectangle.
    pub fn width(&self) -> i32 {
        self.area.width.max(0)
    }

    /// Height of the assigned rectangle.
    pub fn height(&self) -> i32 {
        self.area.height.max(0)
    }

    /// The assigned rectangle in frame coordinates.
    pub fn area(&self) -> Region {
        self.area
    }

    /// Whether nothing drawn here can become visible.
    pub fn is_empty(&self) -> bool {
        self.clip.is_empty()
    }

    /// Put one character at local (x, y).
    ///
    /// Control characters are stored as spaces: a cell holds exactly one
    /// printable column, and nothing painted may reach the terminal as a
    /// control sequence.
    pub fn put(&mut self, x: i32, y: i32, ch: char, style: &StyleResolved) {
        let (fx, fy) = (self.area.x.saturating_add(x), self.area.y.saturating_add(y));
        if self.clip.contains(fx, fy) {
            let ch = if ch.is_control() { ' ' } else { ch };
            self.frame.set(fx as u16, fy as u16, Cell::new(ch, style));
        }
    }

    /// Write a string starting at local (x, y). Returns the cells consumed,
    /// including clipped ones.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: &StyleResolved) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            if ch == '\n' {
                break;
            }
            self.put(col, y, ch, style);
            col = col.saturating_add(1);
        }
        col - x
    }

    /// Fill the whole rectangle with styled spaces.
    pub fn fill(&mut self, style: &StyleResolved) {
        for y in self.clip.y..self.clip.bottom() {
            for x in self.clip.x..self.clip.right() {
                self.frame.set(x as u16, y as u16, Cell::new(' ', style));
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
