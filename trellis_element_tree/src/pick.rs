// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive, platform-style hit testing over the element tree.
//!
//! Picking walks the tree rather than querying a spatial index. That
//! matches how retained-mode UI toolkits resolve pointer hits: parents
//! convert the point into their own space, children are tried in front-
//! to-back order, and the first match on the deepest branch wins. Trees
//! here are panel-sized (hundreds of elements, not millions), so the walk
//! is cheap and stays exactly faithful to stacking order.

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::tree::into_own_space;
use crate::{Capabilities, ElementFlags, ElementId, ElementTree, PickMode};

/// Hits collected by [`ElementTree::pick_all`], ordered topmost first.
///
/// The first entry always equals what [`ElementTree::pick`] returns for
/// the same point.
#[derive(Clone, Debug, Default)]
pub struct PickList {
    hits: SmallVec<[ElementId; 8]>,
}

impl PickList {
    /// The element in front of all other hits, if any.
    pub fn topmost(&self) -> Option<ElementId> {
        self.hits.first().copied()
    }

    /// All hits, topmost first.
    pub fn hits(&self) -> &[ElementId] {
        &self.hits
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true when nothing was hit.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Iterates the hits, topmost first.
    pub fn iter(&self) -> core::slice::Iter<'_, ElementId> {
        self.hits.iter()
    }
}

impl<'a> IntoIterator for &'a PickList {
    type Item = &'a ElementId;
    type IntoIter = core::slice::Iter<'a, ElementId>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

impl ElementTree {
    /// Returns the topmost element under `point`, or `None`.
    ///
    /// `point` is given in the coordinate space enclosing `root` (panel
    /// pixel space when `root` is a panel root). The walk prunes branches
    /// whose element is not displayed, and branches whose element has
    /// [`PickMode::None`] and no children. Children are tried after
    /// descending, last inserted first, so front-most content wins; an
    /// element only reports itself when none of its children matched.
    ///
    /// Only [`PickMode::Position`] elements are ever reported, and only
    /// when they are visible and `point` falls inside their bounds.
    /// Containment is half-open on the right and bottom edges.
    pub fn pick(&self, root: ElementId, point: Point) -> Option<ElementId> {
        let mut scratch = SmallVec::new();
        self.pick_inner(root, point, false, &mut scratch)
    }

    /// Returns every element under `point`, topmost first.
    ///
    /// Same traversal as [`pick`](ElementTree::pick), but the walk runs
    /// to completion instead of stopping at the first match.
    pub fn pick_all(&self, root: ElementId, point: Point) -> PickList {
        let mut hits = SmallVec::new();
        self.pick_inner(root, point, true, &mut hits);
        PickList { hits }
    }

    /// Returns the front-most element under `point` that carries all of
    /// the `required` capabilities.
    ///
    /// This is how interaction routing finds its targets: the topmost
    /// clickable element may sit below a decorative overlay that picks
    /// but handles nothing.
    pub fn pick_topmost_with(
        &self,
        root: ElementId,
        point: Point,
        required: Capabilities,
    ) -> Option<ElementId> {
        self.pick_all(root, point)
            .iter()
            .copied()
            .find(|&id| self.capabilities(id).is_some_and(|caps| caps.contains(required)))
    }

    fn pick_inner(
        &self,
        id: ElementId,
        point_in_parent: Point,
        collect: bool,
        hits: &mut SmallVec<[ElementId; 8]>,
    ) -> Option<ElementId> {
        let element = self.element(id)?;
        let local = &element.local;
        if !local.flags.contains(ElementFlags::DISPLAYED) {
            return None;
        }
        if local.pick_mode == PickMode::None && element.children.is_empty() {
            return None;
        }

        let own_point = into_own_space(local, point_in_parent);
        let own_bounds = Rect::from_origin_size(Point::ORIGIN, local.local_bounds.size());
        let contains = own_bounds.contains(own_point);

        let mut topmost = None;
        for &child in element.children.iter().rev() {
            let hit = self.pick_inner(child, own_point, collect, hits);
            if topmost.is_none() && hit.is_some() {
                if !collect {
                    return hit;
                }
                topmost = hit;
            }
        }

        if local.flags.contains(ElementFlags::VISIBLE)
            && local.pick_mode == PickMode::Position
            && contains
        {
            if collect {
                hits.push(id);
            }
            topmost = topmost.or(Some(id));
        }
        topmost
    }
}
