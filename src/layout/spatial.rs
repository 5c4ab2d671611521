//! Spatial map for hit testing.
//!
//! [`SpatialMap`] records the rectangles from the most recent successful
//! layout pass, in depth-first (painter's) order, together with each node's
//! depth and whether it accepts pointer input.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::{Offset, Region};

use super::engine::LayoutResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    id: NodeId,
    region: Region,
    depth: usize,
    interactive: bool,
}

/// Node rectangles from the last layout, queried by point.
#[derive(Debug, Default, Clone)]
pub struct SpatialMap {
    /// Depth-first order: later entries paint over earlier ones.
    entries: Vec<Entry>,
}

impl SpatialMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a layout result.
    ///
    /// Hidden nodes and zero-area rectangles are left out, so they can never
    /// be hit.
    pub fn rebuild(&mut self, dom: &Dom, layout: &LayoutResult) {
        self.entries.clear();
        self.entries.reserve(layout.len());
        for (id, region) in layout.iter() {
            if region.is_empty() || !dom.is_shown(id) {
                continue;
            }
            let Some(data) = dom.get(id) else {
                continue;
            };
            self.entries.push(Entry {
                id,
                region,
                depth: dom.depth(id),
                interactive: data.is_interactive(),
            });
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The deepest interactive node containing `point`.
    ///
    /// When two candidates have the same depth the one later in tree order
    /// (painted on top) wins. Exactly one node, or none, is returned.
    pub fn hit_test(&self, point: Offset) -> Option<NodeId> {
        self.deepest(point, |e| e.interactive)
    }

    /// The deepest node of any kind containing `point`.
    pub fn node_at(&self, point: Offset) -> Option<NodeId> {
        self.deepest(point, |_| true)
    }

    fn deepest(&self, point: Offset, accept: impl Fn(&Entry) -> bool) -> Option<NodeId> {
        self.entries
            .iter()
            .filter(|e| accept(e) && e.region.contains(point.x, point.y))
            .fold(None::<&Entry>, |best, e| match best {
                Some(b) if b.depth > e.depth => Some(b),
                _ => Some(e),
            })
            .map(|e| e.id)
    }

    /// Every node containing `point`, frontmost first.
    pub fn nodes_at(&self, point: Offset) -> Vec<NodeId> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.region.contains(point.x, point.y))
            .map(|e| e.id)
            .collect()
    }

    /// The recorded rectangle of `id`, if it is hittable.
    pub fn region_of(&self, id: NodeId) -> Option<Region> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.region)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
