//! Core geometry types: Offset, Size, Region, Spacing.
//!
//! Everything is measured in whole terminal cells. Regions use signed
//! coordinates so intermediate layout arithmetic can go negative before it is
//! clamped back into the parent rectangle.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A cell position (column `x`, row `y`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[inline]
    pub const fn area(self) -> i32 {
        self.width * self.height
    }

    /// A region of this size anchored at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }

    /// Component-wise minimum, never below zero.
    #[inline]
    pub fn min_clamped(self, other: Size) -> Size {
        Size {
            width: self.width.min(other.width).max(0),
            height: self.height.min(other.height).max(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle in terminal cells: top-left corner plus extent.
///
/// Right and bottom edges are exclusive. A region with zero width or height
/// has no area: it contains no points and overlaps nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// The bottom edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the cell (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` lies entirely within this region.
    ///
    /// Zero-area regions count as contained when their position sits inside
    /// (or on the far edge of) this region.
    #[inline]
    pub const fn contains_region(self, other: Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the two regions share at least one cell.
    #[inline]
    pub const fn overlaps(self, other: Region) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The shared area of two regions, or [`Region::EMPTY`] when disjoint.
    #[inline]
    pub fn intersection(self, other: Region) -> Region {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }
        }
    }

    /// Clip this region so it lies inside `parent`.
    ///
    /// Unlike [`intersection`](Self::intersection) the result keeps a position
    /// inside the parent even when nothing is left, so a fully overflowed child
    /// becomes a zero-sized region on the parent's edge rather than jumping to
    /// the origin.
    #[inline]
    pub fn clamp_within(self, parent: Region) -> Region {
        let px2 = parent.right().max(parent.x);
        let py2 = parent.bottom().max(parent.y);
        let x = self.x.clamp(parent.x, px2);
        let y = self.y.clamp(parent.y, py2);
        let right = self.right().clamp(x, px2);
        let bottom = self.bottom().clamp(y, py2);
        Region { x, y, width: right - x, height: bottom - y }
    }

    /// Contract the region inward by `spacing`, clamping the extent to zero.
    #[inline]
    pub fn shrink(self, spacing: Spacing) -> Region {
        Region {
            x: self.x.saturating_add(spacing.left),
            y: self.y.saturating_add(spacing.top),
            width: (self.width - spacing.width()).max(0),
            height: (self.height - spacing.height()).max(0),
        }
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.width * self.height
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Padding around the four sides of a rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same spacing on every side.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Offset / Size
    // -----------------------------------------------------------------------

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(1, 2);
        let b = Offset::new(3, 4);
        assert_eq!(a + b, Offset::new(4, 6));
        assert_eq!(b - a, Offset::new(2, 2));
    }

    #[test]
    fn size_area_and_region() {
        assert_eq!(Size::new(80, 24).area(), 1920);
        assert_eq!(Size::new(80, 24).to_region(), Region::new(0, 0, 80, 24));
    }

    #[test]
    fn size_min_clamped_never_negative() {
        let s = Size::new(-3, 10).min_clamped(Size::new(5, 4));
        assert_eq!(s, Size::new(0, 4));
    }

    // -----------------------------------------------------------------------
    // Region
    // -----------------------------------------------------------------------

    #[test]
    fn region_edges() {
        let r = Region::new(5, 10, 20, 30);
        assert_eq!(r.right(), 25);
        assert_eq!(r.bottom(), 40);
        assert_eq!(r.offset(), Offset::new(5, 10));
        assert_eq!(r.size(), Size::new(20, 30));
    }

    #[test]
    fn region_contains_point_is_exclusive_on_far_edges() {
        let r = Region::new(2, 2, 3, 3);
        assert!(r.contains(2, 2));
        assert!(r.contains(4, 4));
        assert!(!r.contains(5, 4));
        assert!(!r.contains(4, 5));
        assert!(!r.contains(1, 2));
    }

    #[test]
    fn zero_area_region_contains_nothing() {
        let r = Region::new(3, 3, 0, 5);
        assert!(r.is_empty());
        assert!(!r.contains(3, 3));
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn region_contains_region() {
        let outer = Region::new(0, 0, 10, 10);
        assert!(outer.contains_region(Region::new(2, 2, 8, 8)));
        assert!(!outer.contains_region(Region::new(2, 2, 9, 8)));
        assert!(outer.contains_region(Region::new(10, 0, 0, 10)));
    }

    #[test]
    fn adjacent_regions_do_not_overlap() {
        let a = Region::new(0, 0, 5, 5);
        let b = Region::new(5, 0, 5, 5);
        assert!(!a.overlaps(b));
        assert!(a.overlaps(Region::new(4, 4, 2, 2)));
        assert!(!a.overlaps(Region::new(2, 2, 0, 0)));
    }

    #[test]
    fn intersection_of_overlapping_and_disjoint() {
        let a = Region::new(0, 0, 10, 10);
        assert_eq!(a.intersection(Region::new(5, 5, 10, 10)), Region::new(5, 5, 5, 5));
        assert_eq!(a.intersection(Region::new(20, 20, 1, 1)), Region::EMPTY);
    }

    #[test]
    fn clamp_within_trims_overflow() {
        let parent = Region::new(0, 0, 25, 1);
        let child = Region::new(20, 0, 10, 1);
        assert_eq!(child.clamp_within(parent), Region::new(20, 0, 5, 1));
    }

    #[test]
    fn clamp_within_keeps_position_when_fully_outside() {
        let parent = Region::new(0, 0, 10, 3);
        let child = Region::new(14, 0, 4, 3);
        let clamped = child.clamp_within(parent);
        assert_eq!(clamped, Region::new(10, 0, 0, 3));
        assert!(parent.contains_region(clamped));
    }

    #[test]
    fn shrink_by_spacing() {
        let r = Region::new(0, 0, 10, 6).shrink(Spacing::symmetric(1, 2));
        assert_eq!(r, Region::new(2, 1, 6, 4));
        let tiny = Region::new(0, 0, 2, 2).shrink(Spacing::all(3));
        assert_eq!(tiny.size(), Size::ZERO);
    }

    // -----------------------------------------------------------------------
    // Spacing
    // -----------------------------------------------------------------------

    #[test]
    fn spacing_totals() {
        let s = Spacing::new(1, 2, 3, 4);
        assert_eq!(s.width(), 6);
        assert_eq!(s.height(), 4);
        assert_eq!(Spacing::default(), Spacing::ZERO);
    }
}
