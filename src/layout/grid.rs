//! Grid arrangement.
//!
//! Two passes: first every child gets a cell (explicit placements, then
//! row-major auto-placement into the first free cells), then column and row
//! tracks are sized and each child receives the union of its spanned tracks.
//!
//! Track sizing along an axis mirrors the linear strategy: gaps are reserved,
//! `Fixed` tracks take their size, `Auto` tracks take the largest measured
//! size of the single-span children in them (clamped to what is left), and
//! `Flex` tracks share the remainder.

use crate::geometry::{Region, Size};

use super::constraint::{GridPlacement, GridSpec, LayoutConstraint, Track};
use super::engine::LayoutError;
use super::linear::distribute_flex;

/// Highest row index (exclusive) a child may occupy. Keeps a stray explicit
/// placement from allocating an enormous occupancy table.
pub const MAX_GRID_ROWS: usize = 4096;

/// A resolved cell assignment for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Occupancy {
    columns: usize,
    rows: Vec<Vec<bool>>,
}

impl Occupancy {
    fn new(columns: usize) -> Self {
        Self { columns, rows: Vec::new() }
    }

    fn is_free(&self, cell: &GridCell) -> bool {
        (cell.row..cell.row + cell.row_span).all(|r| {
            self.rows.get(r).is_none_or(|row| {
                row[cell.column..cell.column + cell.column_span]
                    .iter()
                    .all(|taken| !taken)
            })
        })
    }

    fn take(&mut self, cell: &GridCell) {
        let needed = cell.row + cell.row_span;
        if self.rows.len() < needed {
            self.rows.resize(needed, vec![false; self.columns]);
        }
        for row in &mut self.rows[cell.row..needed] {
            row[cell.column..cell.column + cell.column_span].fill(true);
        }
    }
}

/// Resolve every child's cell. Explicit placements first, in order, then
/// auto placements in order.
pub fn place(columns: usize, placements: &[GridPlacement]) -> Result<Vec<GridCell>, LayoutError> {
    let mut occupancy = Occupancy::new(columns);
    let mut cells: Vec<Option<GridCell>> = vec![None; placements.len()];

    for (index, p) in placements.iter().enumerate() {
        if p.row_span == 0 || p.column_span == 0 {
            return Err(LayoutError::ZeroSpan { child: index });
        }
        let column_end = p.column.map_or(Some(p.column_span), |c| c.checked_add(p.column_span));
        if p.column_span > columns || column_end.is_none_or(|end| end > columns) {
            return Err(LayoutError::GridPlacementOutOfBounds { child: index, columns });
        }
        let row_end = p.row.map_or(Some(p.row_span), |r| r.checked_add(p.row_span));
        if row_end.is_none_or(|end| end > MAX_GRID_ROWS) {
            return Err(LayoutError::GridPlacementOutOfBounds { child: index, columns });
        }
    }

    for (index, p) in placements.iter().enumerate() {
        let (Some(row), Some(column)) = (p.row, p.column) else {
            continue;
        };
        let cell = GridCell { row, column, row_span: p.row_span, column_span: p.column_span };
        if !occupancy.is_free(&cell) {
            return Err(LayoutError::GridCellOccupied { row, column });
        }
        occupancy.take(&cell);
        cells[index] = Some(cell);
    }

    // Fully automatic children advance a shared cursor; partially pinned ones
    // search from the top of their row or column.
    let mut cursor = (0, 0);
    for (index, p) in placements.iter().enumerate() {
        if !p.is_auto() {
            continue;
        }
        let start = if p.row.is_none() && p.column.is_none() { cursor } else { (0, 0) };
        let cell = find_slot(&occupancy, p, start)
            .filter(|cell| cell.row + cell.row_span <= MAX_GRID_ROWS)
            .ok_or(LayoutError::GridPlacementOutOfBounds { child: index, columns })?;
        occupancy.take(&cell);
        if p.row.is_none() && p.column.is_none() {
            cursor = (cell.row, cell.column + cell.column_span);
        }
        cells[index] = Some(cell);
    }

    Ok(cells.into_iter().flatten().collect())
}

fn find_slot(occupancy: &Occupancy, p: &GridPlacement, start: (usize, usize)) -> Option<GridCell> {
    let columns = occupancy.columns;
    // Any row past the occupied ones is free, so the search is bounded.
    let last_row = occupancy.rows.len() + 1;
    let rows = match p.row {
        Some(row) => row..row + 1,
        None => start.0..last_row.max(start.0 + 1),
    };
    for row in rows {
        let first_col = if p.row.is_none() && row == start.0 { start.1 } else { 0 };
        let cols = match p.column {
            Some(column) => column..column + 1,
            None => first_col..(columns + 1).saturating_sub(p.column_span),
        };
        for column in cols {
            let cell = GridCell { row, column, row_span: p.row_span, column_span: p.column_span };
            if occupancy.is_free(&cell) {
                return Some(cell);
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Track sizing
// ---------------------------------------------------------------------------

/// Size tracks along one axis. `auto` holds each track's content size.
fn size_tracks(tracks: &[Track], available: i32, gap: i32, auto: &[i32]) -> Result<Vec<i32>, LayoutError> {
    let count = tracks.len() as i32;
    let mut remaining = available.saturating_sub(gap.saturating_mul((count - 1).max(0))).max(0);
    let mut sizes = vec![0; tracks.len()];

    for (size, track) in sizes.iter_mut().zip(tracks) {
        if let Track::Fixed(cells) = *track {
            if cells < 0 {
                return Err(LayoutError::InvalidSize(cells));
            }
            *size = cells;
            remaining = (remaining - cells).max(0);
        }
    }
    for (i, track) in tracks.iter().enumerate() {
        if *track == Track::Auto {
            sizes[i] = auto[i].max(0).min(remaining);
            remaining -= sizes[i];
        }
    }
    let flex: Vec<(usize, u32)> = tracks
        .iter()
        .enumerate()
        .filter_map(|(i, t)| match t {
            Track::Flex(w) => Some((i, *w)),
            _ => None,
        })
        .collect();
    distribute_flex(remaining, &flex, &mut sizes);
    Ok(sizes)
}

/// Start offsets of each track, gaps included.
fn track_starts(sizes: &[i32], gap: i32) -> Vec<i32> {
    sizes
        .iter()
        .scan(0i32, |pos, size| {
            let start = *pos;
            *pos = pos.saturating_add(*size).saturating_add(gap);
            Some(start)
        })
        .collect()
}

fn span_extent(sizes: &[i32], start: usize, span: usize, gap: i32) -> i32 {
    let spanned = &sizes[start..start + span];
    let gaps = gap.saturating_mul((spanned.len() as i32 - 1).max(0));
    spanned.iter().fold(gaps, |total, size| total.saturating_add(*size))
}

// ---------------------------------------------------------------------------
// Arrangement
// ---------------------------------------------------------------------------

/// Assign a rectangle to every child of a grid container, in order.
///
/// `measure(child, available)` answers a child's content size for `Auto` row
/// sizing, given the width of the columns it spans.
pub fn arrange(
    spec: &GridSpec,
    constraint: &LayoutConstraint,
    mut measure: impl FnMut(usize, Size) -> Size,
) -> Result<Vec<Region>, LayoutError> {
    let area = constraint.available;
    let gap = constraint.spacing;
    if gap < 0 {
        return Err(LayoutError::InvalidSize(gap));
    }
    if constraint.children.is_empty() {
        return Ok(Vec::new());
    }

    let column_tracks: Vec<Track> = if spec.columns.is_empty() {
        vec![Track::Flex(1)]
    } else {
        spec.columns.clone()
    };
    let placements: Vec<GridPlacement> = constraint.children.iter().map(|c| c.placement).collect();
    let cells = place(column_tracks.len(), &placements)?;

    let row_count = cells
        .iter()
        .map(|c| c.row + c.row_span)
        .max()
        .unwrap_or(0)
        .max(spec.rows.len());
    let row_tracks: Vec<Track> = (0..row_count)
        .map(|r| spec.rows.get(r).copied().unwrap_or(Track::Auto))
        .collect();

    let mut auto_columns = vec![0; column_tracks.len()];
    for (cell, child) in cells.iter().zip(&constraint.children) {
        if cell.column_span == 1 {
            let slot = &mut auto_columns[cell.column];
            *slot = (*slot).max(child.measured.width);
        }
    }
    let widths = size_tracks(&column_tracks, area.width, gap, &auto_columns)?;

    let mut auto_rows = vec![0; row_tracks.len()];
    for (index, cell) in cells.iter().enumerate() {
        if cell.row_span == 1 && row_tracks[cell.row] == Track::Auto {
            let width = span_extent(&widths, cell.column, cell.column_span, gap);
            let wanted = measure(index, Size::new(width, area.height)).height;
            let slot = &mut auto_rows[cell.row];
            *slot = (*slot).max(wanted);
        }
    }
    let heights = size_tracks(&row_tracks, area.height, gap, &auto_rows)?;

    let xs = track_starts(&widths, gap);
    let ys = track_starts(&heights, gap);
    Ok(cells
        .iter()
        .map(|cell| {
            Region::new(
                area.x.saturating_add(xs[cell.column]),
                area.y.saturating_add(ys[cell.row]),
                span_extent(&widths, cell.column, cell.column_span, gap),
                span_extent(&heights, cell.row, cell.row_span, gap),
            )
            .clamp_within(area)
        })
        .collect())
}

// ===========================================================================
// Tests
// ===========================================================================
