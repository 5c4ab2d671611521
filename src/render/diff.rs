//! Frame differ: the minimal, row-major list of changed cells.

use crate::style::Cell;

use super::frame::Frame;

/// A single cell that changed between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub row: u16,
    pub col: u16,
    pub cell: Cell,
}

/// Compare `previous` with `next` and return every cell that differs, in
/// row-major order.
///
/// Frames of different dimensions are not comparable; in that case every
/// cell of `next` is reported.
pub fn diff(previous: &Frame, next: &Frame) -> Vec<CellChange> {
    let comparable = previous.width() == next.width() && previous.height() == next.height();
    next.iter()
        .filter(|&(col, row, cell)| !comparable || previous.get(col, row) != Some(cell))
        .map(|(col, row, cell)| CellChange { row, col, cell: *cell })
        .collect()
}

/// Apply a change list to `frame` in place.
pub fn apply(frame: &mut Frame, changes: &[CellChange]) {
    for change in changes {
        frame.set(change.col, change.row, change.cell);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Attributes, Color, StyleResolved};

    fn scribble(frame: &mut Frame, seed: u32) {
        // Deterministic pseudo-random content.
        let mut state = seed.wrapping_mul(2_654_435_761).max(1);
        for row in 0..frame.height() {
            for col in 0..frame.width() {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                if state % 3 == 0 {
                    let style = StyleResolved::new(
                        Color::Ansi((state % 16) as u8),
                        Color::Default,
                        Attributes::from_bits_truncate((state >> 8) as u8),
                    );
                    let ch = char::from(b'a' + (state % 26) as u8);
                    frame.set(col, row, Cell::new(ch, &style));
                }
            }
        }
    }

    #[test]
    fn diff_against_self_is_empty() {
        for seed in 0..20 {
            let mut f = Frame::new(17, 9);
            scribble(&mut f, seed);
            assert!(diff(&f, &f).is_empty());
        }
    }

    #[test]
    fn applying_diff_reproduces_next() {
        for seed in 0..20 {
            let mut a = Frame::new(23, 7);
            let mut b = Frame::new(23, 7);
            scribble(&mut a, seed);
            scribble(&mut b, seed + 100);
            let changes = diff(&a, &b);
            let mut patched = a.clone();
            apply(&mut patched, &changes);
            assert_eq!(patched, b);
        }
    }

    #[test]
    fn changes_are_row_major() {
        let mut a = Frame::new(5, 5);
        let b = Frame::new(5, 5);
        let style = StyleResolved::default();
        a.set(4, 0, Cell::new('x', &style));
        a.set(0, 3, Cell::new('y', &style));
        a.set(2, 1, Cell::new('z', &style));
        let order: Vec<_> = diff(&b, &a).iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(order, [(0, 4), (1, 2), (3, 0)]);
    }

    #[test]
    fn style_only_change_is_reported() {
        let a = Frame::new(2, 1);
        let mut b = Frame::new(2, 1);
        let bold = StyleResolved::default().with_attrs(Attributes::BOLD);
        b.set(1, 0, Cell::new(' ', &bold));
        let changes = diff(&a, &b);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].cell.attrs, Attributes::BOLD);
    }

    #[test]
    fn invalidated_previous_means_full_repaint() {
        let prev = Frame::invalidated(80, 25);
        let next = Frame::new(80, 25);
        let changes = diff(&prev, &next);
        assert_eq!(changes.len(), 80 * 25);
    }

    #[test]
    fn size_mismatch_reports_every_cell() {
        let prev = Frame::new(80, 24);
        let next = Frame::new(80, 25);
        assert_eq!(diff(&prev, &next).len(), 80 * 25);
    }
}
