//! Frame: a full grid snapshot of terminal cell contents.

use crate::style::{Cell, StyleResolved};

/// A `width` x `height` grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    /// A blank frame (spaces in default colors).
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::BLANK)
    }

    /// A frame whose contents are unknown.
    ///
    /// Every cell is [`Cell::VOID`], so diffing any painted frame against it
    /// reports every cell. Used as "previous" after a resize.
    pub fn invalidated(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::VOID)
    }

    fn filled(width: u16, height: u16, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.width && row < self.height)
            .then(|| row as usize * self.width as usize + col as usize)
    }

    /// The cell at (col, row), or `None` when out of bounds.
    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at (col, row). Out-of-bounds writes are ignored.
    pub fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to a styled space.
    pub fn fill(&mut self, style: &StyleResolved) {
        self.cells.fill(Cell::new(' ', style));
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// One row of cells.
    pub fn row(&self, row: u16) -> &[Cell] {
        if row >= self.height {
            return &[];
        }
        let start = row as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Row-major iteration over `(col, row, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width) as u16, (i / width) as u16, cell))
    }

    /// The characters of one row as a string, trailing spaces trimmed.
    pub fn row_text(&self, row: u16) -> String {
        let text: String = self.row(row).iter().map(|c| c.ch).collect();
        text.trim_end().to_owned()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn new_frame_is_blank() {
        let f = Frame::new(10, 3);
        assert_eq!((f.width(), f.height()), (10, 3));
        assert!(f.iter().all(|(_, _, c)| *c == Cell::BLANK));
        assert_eq!(f.iter().count(), 30);
    }

    #[test]
    fn invalidated_frame_is_void() {
        let f = Frame::invalidated(4, 2);
        assert!(f.iter().all(|(_, _, c)| *c == Cell::VOID));
    }

    #[test]
    fn get_and_set_bounds() {
        let mut f = Frame::new(3, 2);
        let style = StyleResolved::default();
        f.set(2, 1, Cell::new('x', &style));
        assert_eq!(f.get(2, 1).unwrap().ch, 'x');
        f.set(3, 0, Cell::new('y', &style));
        assert!(f.get(3, 0).is_none());
        assert!(f.get(0, 2).is_none());
    }

    #[test]
    fn iter_is_row_major() {
        let f = Frame::new(2, 2);
        let coords: Vec<_> = f.iter().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(coords, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn fill_and_row_text() {
        let mut f = Frame::new(5, 1);
        let style = StyleResolved { bg: Color::Ansi(4), ..StyleResolved::default() };
        f.fill(&style);
        assert_eq!(f.get(0, 0).unwrap().bg, Color::Ansi(4));
        f.set(1, 0, Cell::new('h', &style));
        f.set(2, 0, Cell::new('i', &style));
        assert_eq!(f.row_text(0), " hi");
        assert!(f.row(7).is_empty());
    }
}
