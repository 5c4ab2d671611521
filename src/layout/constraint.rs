//! Layout inputs: arrangement, sizing hints, grid tracks and placements.

use crate::geometry::{Region, Size, Spacing};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Main axis of a linear container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    /// Extent of `size` along the main axis.
    #[inline]
    pub fn main(self, size: Size) -> i32 {
        match self {
            Direction::Vertical => size.height,
            Direction::Horizontal => size.width,
        }
    }

    /// Extent of `size` across the main axis.
    #[inline]
    pub fn cross(self, size: Size) -> i32 {
        match self {
            Direction::Vertical => size.width,
            Direction::Horizontal => size.height,
        }
    }

    /// Build a region from main/cross coordinates relative to `area`.
    #[inline]
    pub fn region(self, area: Region, main_pos: i32, main_len: i32, cross_len: i32) -> Region {
        match self {
            Direction::Vertical => Region::new(area.x, area.y.saturating_add(main_pos), cross_len, main_len),
            Direction::Horizontal => Region::new(area.x.saturating_add(main_pos), area.y, main_len, cross_len),
        }
    }
}

// ---------------------------------------------------------------------------
// SizeHint
// ---------------------------------------------------------------------------

/// How a child asks for space along its parent's main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeHint {
    /// Exactly this many cells.
    Fixed(i32),
    /// A weighted share of whatever the fixed and content children left over.
    Flex(u32),
    /// Whatever the widget measures, clamped to the remaining space.
    Content,
}

impl Default for SizeHint {
    fn default() -> Self {
        SizeHint::Flex(1)
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Size declaration for a grid column or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Fixed(i32),
    Flex(u32),
    /// The largest measured size of the single-span children in the track.
    Auto,
}

/// Column and row tracks of a grid container.
///
/// Rows beyond the declared ones are created on demand as [`Track::Auto`].
/// An empty column list means a single flexible column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: Vec<Track>,
    pub rows: Vec<Track>,
}

impl GridSpec {
    pub fn new(columns: impl IntoIterator<Item = Track>) -> Self {
        Self { columns: columns.into_iter().collect(), rows: Vec::new() }
    }

    /// Declare explicit row tracks (builder).
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Track>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }
}

/// Where a child sits in its parent grid.
///
/// `row`/`column` left as `None` are filled by row-major auto-placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPlacement {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub row_span: usize,
    pub column_span: usize,
}

impl GridPlacement {
    /// Pin to a specific cell.
    pub fn at(row: usize, column: usize) -> Self {
        Self { row: Some(row), column: Some(column), row_span: 1, column_span: 1 }
    }

    /// Span several rows and columns (builder).
    pub fn span(mut self, rows: usize, columns: usize) -> Self {
        self.row_span = rows;
        self.column_span = columns;
        self
    }

    pub fn is_auto(&self) -> bool {
        self.row.is_none() || self.column.is_none()
    }
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self { row: None, column: None, row_span: 1, column_span: 1 }
    }
}

// ---------------------------------------------------------------------------
// Arrangement / LayoutSpec
// ---------------------------------------------------------------------------

/// How a container arranges its children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Arrangement {
    #[default]
    Vertical,
    Horizontal,
    Grid(GridSpec),
}

/// Per-container layout declaration stored on each node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutSpec {
    pub arrangement: Arrangement,
    /// Gap in cells between adjacent children (and grid tracks).
    pub spacing: i32,
    pub padding: Spacing,
}

// ---------------------------------------------------------------------------
// LayoutConstraint
// ---------------------------------------------------------------------------

/// Sizing input for one child, gathered per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildHint {
    pub size: SizeHint,
    /// Cross-axis override for linear layouts.
    pub cross: Option<i32>,
    /// The child's measured content size, used by `Content` hints and
    /// `Auto` tracks.
    pub measured: Size,
    pub placement: GridPlacement,
}

/// Everything a container strategy needs to place its children.
///
/// Built fresh for every container on every pass and dropped afterwards.
#[derive(Debug, Clone)]
pub struct LayoutConstraint {
    /// Area available to the children (padding already removed).
    pub available: Region,
    pub spacing: i32,
    pub children: Vec<ChildHint>,
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_axes() {
        let s = Size::new(30, 10);
        assert_eq!(Direction::Vertical.main(s), 10);
        assert_eq!(Direction::Vertical.cross(s), 30);
        assert_eq!(Direction::Horizontal.main(s), 30);
        assert_eq!(Direction::Horizontal.cross(s), 10);
    }

    #[test]
    fn direction_region_builds_along_axis() {
        let area = Region::new(2, 3, 20, 10);
        assert_eq!(Direction::Vertical.region(area, 4, 2, 20), Region::new(2, 7, 20, 2));
        assert_eq!(Direction::Horizontal.region(area, 4, 2, 10), Region::new(6, 3, 2, 10));
    }

    #[test]
    fn defaults() {
        assert_eq!(SizeHint::default(), SizeHint::Flex(1));
        assert_eq!(Arrangement::default(), Arrangement::Vertical);
        let placement = GridPlacement::default();
        assert!(placement.is_auto());
        assert_eq!((placement.row_span, placement.column_span), (1, 1));
    }

    #[test]
    fn placement_builder() {
        let p = GridPlacement::at(1, 2).span(2, 3);
        assert!(!p.is_auto());
        assert_eq!(p.row, Some(1));
        assert_eq!(p.column_span, 3);
    }
}
