//! Vertical and horizontal arrangement.
//!
//! A single pass along the main axis:
//!
//! 1. `Fixed` children get their declared extent, even past the end.
//! 2. `Content` children, in declaration order, get their measured extent
//!    clamped to what is left.
//! 3. `Flex` children split the remainder by weight. The floor of each share
//!    is assigned first; leftover cells go one each to the earliest flex
//!    children.
//!
//! Spacing between children is reserved before any of the above. Rectangles
//! are clamped into the available area, so overflow never escapes the parent
//! and siblings never overlap. Positions saturate rather than wrap, so huge
//! declared sizes only push later siblings to the far edge.

use crate::geometry::Region;

use super::constraint::{Direction, LayoutConstraint, SizeHint};
use super::engine::LayoutError;

/// Assign a rectangle to every child of a linear container, in order.
pub fn arrange(direction: Direction, constraint: &LayoutConstraint) -> Result<Vec<Region>, LayoutError> {
    let area = constraint.available;
    let spacing = constraint.spacing;
    if spacing < 0 {
        return Err(LayoutError::InvalidSize(spacing));
    }
    let count = constraint.children.len() as i32;
    if count == 0 {
        return Ok(Vec::new());
    }

    let main = direction.main(area.size()).max(0);
    let cross = direction.cross(area.size()).max(0);
    let mut remaining = main.saturating_sub(spacing.saturating_mul(count - 1)).max(0);
    let mut extents = vec![0; constraint.children.len()];

    for (extent, child) in extents.iter_mut().zip(&constraint.children) {
        if let SizeHint::Fixed(cells) = child.size {
            if cells < 0 {
                return Err(LayoutError::InvalidSize(cells));
            }
            *extent = cells;
            remaining = (remaining - cells).max(0);
        }
    }

    for (extent, child) in extents.iter_mut().zip(&constraint.children) {
        if child.size == SizeHint::Content {
            let wanted = direction.main(child.measured).max(0);
            *extent = wanted.min(remaining);
            remaining -= *extent;
        }
    }

    let flex: Vec<(usize, u32)> = constraint
        .children
        .iter()
        .enumerate()
        .filter_map(|(i, child)| match child.size {
            SizeHint::Flex(weight) => Some((i, weight)),
            _ => None,
        })
        .collect();
    distribute_flex(remaining, &flex, &mut extents);

    let mut pos = 0;
    let mut regions = Vec::with_capacity(extents.len());
    for (extent, child) in extents.iter().zip(&constraint.children) {
        let cross_len = match child.cross {
            Some(cells) if cells < 0 => return Err(LayoutError::InvalidSize(cells)),
            Some(cells) => cells.min(cross),
            None => cross,
        };
        let region = direction.region(area, pos, *extent, cross_len);
        regions.push(region.clamp_within(area));
        pos = pos.saturating_add(*extent).saturating_add(spacing);
    }
    Ok(regions)
}

/// Split `space` among `(index, weight)` entries, writing into `extents`.
///
/// Floors first, then one leftover cell per entry in declaration order.
/// Zero-weight entries get nothing.
pub(crate) fn distribute_flex(space: i32, flex: &[(usize, u32)], extents: &mut [i32]) {
    let total: i64 = flex.iter().map(|&(_, w)| i64::from(w)).sum();
    if total == 0 || space <= 0 {
        return;
    }
    let mut assigned = 0;
    for &(i, weight) in flex {
        let share = (i64::from(space) * i64::from(weight) / total) as i32;
        extents[i] = share;
        assigned += share;
    }
    let mut leftover = space - assigned;
    for &(i, weight) in flex {
        if leftover == 0 {
            break;
        }
        if weight > 0 {
            extents[i] += 1;
            leftover -= 1;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
