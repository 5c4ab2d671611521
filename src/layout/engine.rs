//! Layout resolution over the widget tree.
//!
//! [`resolve`] walks the tree top-down. Each container's padding is removed
//! from its rectangle, its visible children are measured, and the container's
//! arrangement ([`linear`](super::linear) or [`grid`](super::grid)) assigns
//! their rectangles. Hidden nodes (and everything under them) get an empty
//! rectangle at their parent's content origin.

use slotmap::SecondaryMap;
use thiserror::Error;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::{Region, Size};

use super::constraint::{Arrangement, ChildHint, Direction, LayoutConstraint, SizeHint, Track};
use super::{grid, linear};

/// A malformed constraint. Fatal to the current render pass only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("negative available extent {width}x{height}")]
    NegativeExtent { width: i32, height: i32 },
    #[error("invalid size {0}: sizes, spacing and cross overrides must not be negative")]
    InvalidSize(i32),
    #[error("grid child {child} does not fit in {columns} columns")]
    GridPlacementOutOfBounds { child: usize, columns: usize },
    #[error("grid cell ({row}, {column}) is already occupied")]
    GridCellOccupied { row: usize, column: usize },
    #[error("grid child {child} has a zero span")]
    ZeroSpan { child: usize },
    #[error("layout root {0:?} does not exist")]
    UnknownRoot(NodeId),
}

// ---------------------------------------------------------------------------
// LayoutResult
// ---------------------------------------------------------------------------

/// Rectangles for every live node under the root, in depth-first order.
#[derive(Debug, Default, Clone)]
pub struct LayoutResult {
    rects: SecondaryMap<NodeId, Region>,
    order: Vec<NodeId>,
}

impl LayoutResult {
    fn insert(&mut self, id: NodeId, rect: Region) {
        self.rects.insert(id, rect);
        self.order.push(id);
    }

    pub fn get(&self, id: NodeId) -> Option<Region> {
        self.rects.get(id).copied()
    }

    /// `(node, rect)` pairs in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Region)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.rects.get(id).map(|&rect| (id, rect)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Store each rectangle on its node.
    pub fn apply(&self, dom: &mut Dom) {
        for (id, rect) in self.iter() {
            if let Some(data) = dom.get_mut(id) {
                data.rect = rect;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Assign a rectangle to `root` and every node under it.
///
/// Deterministic for a given tree and area. Children are always contained in
/// their parent's rectangle, and siblings in a linear container never
/// overlap.
pub fn resolve(dom: &Dom, root: NodeId, available: Region) -> Result<LayoutResult, LayoutError> {
    if available.width < 0 || available.height < 0 {
        return Err(LayoutError::NegativeExtent {
            width: available.width,
            height: available.height,
        });
    }
    let Some(data) = dom.get(root) else {
        return Err(LayoutError::UnknownRoot(root));
    };

    let mut result = LayoutResult::default();
    if data.visible {
        place_subtree(dom, root, available, &mut result)?;
    } else {
        hide_subtree(dom, root, available, &mut result);
    }
    Ok(result)
}

fn place_subtree(dom: &Dom, id: NodeId, rect: Region, out: &mut LayoutResult) -> Result<(), LayoutError> {
    out.insert(id, rect);
    let children = dom.children(id);
    if children.is_empty() {
        return Ok(());
    }
    let Some(data) = dom.get(id) else {
        return Ok(());
    };

    let inner = rect.shrink(data.layout.padding);
    let shown: Vec<NodeId> = children
        .iter()
        .copied()
        .filter(|&c| dom.get(c).is_some_and(|d| d.visible))
        .collect();

    let hints: Vec<ChildHint> = shown
        .iter()
        .filter_map(|&c| dom.get(c).map(|d| (c, d)))
        .map(|(c, d)| ChildHint {
            size: d.size,
            cross: d.cross,
            measured: measure(dom, c, inner.size()),
            placement: d.placement,
        })
        .collect();
    let constraint = LayoutConstraint { available: inner, spacing: data.layout.spacing, children: hints };

    let rects = match &data.layout.arrangement {
        Arrangement::Vertical => linear::arrange(Direction::Vertical, &constraint)?,
        Arrangement::Horizontal => linear::arrange(Direction::Horizontal, &constraint)?,
        Arrangement::Grid(spec) => {
            grid::arrange(spec, &constraint, |i, space| measure(dom, shown[i], space))?
        }
    };

    let mut placed = shown.iter().copied().zip(rects);
    let mut next = placed.next();
    for &child in children {
        match next {
            Some((id, child_rect)) if id == child => {
                place_subtree(dom, child, child_rect, out)?;
                next = placed.next();
            }
            _ => hide_subtree(dom, child, inner, out),
        }
    }
    Ok(())
}

fn hide_subtree(dom: &Dom, id: NodeId, parent: Region, out: &mut LayoutResult) {
    let empty = Region::new(parent.x, parent.y, 0, 0);
    for node in dom.walk_depth_first(id) {
        out.insert(node, empty);
    }
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// Content size of a node given the space on offer.
///
/// Leaves answer through [`Widget::measure`](crate::widget::Widget::measure).
/// Containers aggregate their visible children according to their
/// arrangement, plus padding; the larger of that and the widget's own answer
/// wins.
pub fn measure(dom: &Dom, id: NodeId, available: Size) -> Size {
    let Some(data) = dom.get(id) else {
        return Size::ZERO;
    };
    let own = data.widget.measure(available);
    let children: Vec<NodeId> = dom
        .children(id)
        .iter()
        .copied()
        .filter(|&c| dom.get(c).is_some_and(|d| d.visible))
        .collect();
    if children.is_empty() {
        return own;
    }

    let padding = data.layout.padding;
    let inner = Size::new(
        (available.width - padding.width()).max(0),
        (available.height - padding.height()).max(0),
    );
    let spacing = data.layout.spacing.max(0);
    let gaps = spacing * (children.len() as i32 - 1);

    let aggregate = match &data.layout.arrangement {
        Arrangement::Vertical | Arrangement::Horizontal => {
            let direction = match data.layout.arrangement {
                Arrangement::Horizontal => Direction::Horizontal,
                _ => Direction::Vertical,
            };
            let (mut main, mut cross) = (gaps, 0);
            for &child in &children {
                let size = measure(dom, child, inner);
                let child_main = match dom.get(child).map(|d| d.size) {
                    Some(SizeHint::Fixed(cells)) => cells.max(0),
                    _ => direction.main(size),
                };
                main += child_main;
                cross = cross.max(direction.cross(size));
            }
            match direction {
                Direction::Vertical => Size::new(cross, main),
                Direction::Horizontal => Size::new(main, cross),
            }
        }
        Arrangement::Grid(spec) => {
            let columns = spec.columns.len().max(1) as i32;
            let (mut cell_w, mut cell_h) = (0, 0);
            for &child in &children {
                let size = measure(dom, child, inner);
                cell_w = cell_w.max(size.width);
                cell_h = cell_h.max(size.height);
            }
            let fixed_width: i32 = spec
                .columns
                .iter()
                .map(|t| match t {
                    Track::Fixed(cells) => (*cells).max(0),
                    _ => cell_w,
                })
                .sum();
            let rows = (children.len() as i32 + columns - 1) / columns;
            Size::new(
                fixed_width.max(cell_w) + spacing * (columns - 1),
                cell_h * rows + spacing * (rows - 1).max(0),
            )
        }
    };

    Size::new(
        own.width.max(aggregate.width + padding.width()),
        own.height.max(aggregate.height + padding.height()),
    )
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::Node;
    use crate::geometry::Spacing;
    use crate::layout::constraint::{GridPlacement, GridSpec};
    use crate::widgets::{Button, Container, Label};
    use pretty_assertions::assert_eq;

    fn layout(root: Node, area: Region) -> (Dom, LayoutResult) {
        let mut dom = Dom::new();
        let root = dom.mount(root);
        let result = resolve(&dom, root, area).unwrap();
        (dom, result)
    }

    fn rect(dom: &Dom, result: &LayoutResult, id: &str) -> Region {
        result.get(dom.query_by_id(id).unwrap()).unwrap()
    }

    #[test]
    fn root_gets_available_area() {
        let (dom, result) = layout(Node::new(Container::new()).id("root"), Region::new(0, 0, 80, 24));
        assert_eq!(rect(&dom, &result, "root"), Region::new(0, 0, 80, 24));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn horizontal_flex_and_fixed() {
        let (dom, result) = layout(
            Node::new(Container::new())
                .horizontal()
                .child(Node::new(Label::new("grow")).id("flex").flex(1))
                .child(Node::new(Label::new("fixed")).id("fixed").fixed(5)),
            Region::new(0, 0, 25, 3),
        );
        assert_eq!(rect(&dom, &result, "flex"), Region::new(0, 0, 20, 3));
        assert_eq!(rect(&dom, &result, "fixed"), Region::new(20, 0, 5, 3));
    }

    #[test]
    fn padding_shrinks_content_area() {
        let (dom, result) = layout(
            Node::new(Container::new())
                .padding(Spacing::symmetric(1, 2))
                .child(Node::new(Label::new("x")).id("inner")),
            Region::new(0, 0, 20, 10),
        );
        assert_eq!(rect(&dom, &result, "inner"), Region::new(2, 1, 16, 8));
    }

    #[test]
    fn content_children_use_measure() {
        let (dom, result) = layout(
            Node::new(Container::new())
                .child(Node::new(Label::new("one\ntwo")).id("text").content())
                .child(Node::new(Button::new("OK")).id("button").content())
                .child(Node::new(Container::new()).id("rest")),
            Region::new(0, 0, 10, 10),
        );
        assert_eq!(rect(&dom, &result, "text"), Region::new(0, 0, 10, 2));
        assert_eq!(rect(&dom, &result, "button"), Region::new(0, 2, 10, 1));
        assert_eq!(rect(&dom, &result, "rest"), Region::new(0, 3, 10, 7));
    }

    #[test]
    fn content_sized_container_aggregates_children() {
        let (dom, result) = layout(
            Node::new(Container::new())
                .child(
                    Node::new(Container::new())
                        .id("toolbar")
                        .content()
                        .horizontal()
                        .spacing(1)
                        .child(Node::new(Button::new("A")).content())
                        .child(Node::new(Button::new("B")).content()),
                )
                .child(Node::new(Container::new()).id("body")),
            Region::new(0, 0, 30, 10),
        );
        assert_eq!(rect(&dom, &result, "toolbar"), Region::new(0, 0, 30, 1));
        assert_eq!(rect(&dom, &result, "body"), Region::new(0, 1, 30, 9));
    }

    #[test]
    fn hidden_children_take_no_space() {
        let (dom, result) = layout(
            Node::new(Container::new())
                .child(Node::new(Label::new("a")).id("a"))
                .child(
                    Node::new(Container::new())
                        .id("hidden")
                        .hidden()
                        .child(Node::new(Label::new("deep")).id("deep")),
                )
                .child(Node::new(Label::new("b")).id("b")),
            Region::new(0, 0, 10, 10),
        );
        assert_eq!(rect(&dom, &result, "a"), Region::new(0, 0, 10, 5));
        assert_eq!(rect(&dom, &result, "b"), Region::new(0, 5, 10, 5));
        assert!(rect(&dom, &result, "hidden").is_empty());
        assert!(rect(&dom, &result, "deep").is_empty());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn grid_container() {
        let (dom, result) = layout(
            Node::new(Container::new())
                .grid(GridSpec::new([Track::Fixed(10), Track::Fixed(20)]))
                .child(Node::new(Label::new("a")).id("a"))
                .child(Node::new(Label::new("b")).id("b"))
                .child(Node::new(Label::new("wide")).id("wide").place(GridPlacement::default().span(1, 2))),
            Region::new(0, 0, 30, 5),
        );
        assert_eq!(rect(&dom, &result, "a"), Region::new(0, 0, 10, 1));
        assert_eq!(rect(&dom, &result, "b"), Region::new(10, 0, 20, 1));
        assert_eq!(rect(&dom, &result, "wide"), Region::new(0, 1, 30, 1));
    }

    #[test]
    fn nested_containment() {
        let (dom, result) = layout(
            Node::new(Container::new())
                .horizontal()
                .spacing(1)
                .child(
                    Node::new(Container::new())
                        .fixed(30)
                        .padding(Spacing::all(1))
                        .child(Node::new(Label::new("a")).fixed(50))
                        .child(Node::new(Label::new("b"))),
                )
                .child(Node::new(Label::new("c")).fixed(12)),
            Region::new(0, 0, 20, 6),
        );
        for (id, r) in result.iter() {
            if let Some(parent) = dom.parent(id) {
                let p = result.get(parent).unwrap();
                assert!(p.contains_region(r), "{r:?} escapes {p:?}");
            }
        }
    }

    #[test]
    fn negative_extent_is_an_error() {
        let mut dom = Dom::new();
        let root = dom.mount(Node::new(Container::new()));
        assert_eq!(
            resolve(&dom, root, Region::new(0, 0, -1, 5)).unwrap_err(),
            LayoutError::NegativeExtent { width: -1, height: 5 }
        );
    }

    #[test]
    fn apply_writes_rects() {
        let (mut dom, result) = layout(
            Node::new(Container::new()).child(Node::new(Label::new("x")).id("x")),
            Region::new(0, 0, 4, 4),
        );
        result.apply(&mut dom);
        let x = dom.query_by_id("x").unwrap();
        assert_eq!(dom.get(x).unwrap().rect, Region::new(0, 0, 4, 4));
    }

    #[test]
    fn deterministic() {
        let build = || {
            Node::new(Container::new())
                .horizontal()
                .child(Node::new(Label::new("a")).flex(1))
                .child(Node::new(Label::new("b")).flex(1))
                .child(Node::new(Label::new("c")).flex(1))
        };
        let (_, first) = layout(build(), Region::new(0, 0, 11, 2));
        let (_, second) = layout(build(), Region::new(0, 0, 11, 2));
        let a: Vec<_> = first.iter().map(|(_, r)| r).collect();
        let b: Vec<_> = second.iter().map(|(_, r)| r).collect();
        assert_eq!(a, b);
    }
}
