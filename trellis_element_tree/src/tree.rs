// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element arena: parent/child structure, liveness, coordinate
//! conversions, and per-element interaction state.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::{Capabilities, ElementFlags, ElementId, LocalElement, PickMode};

const NO_CHILDREN: &[ElementId] = &[];

#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub(crate) local: LocalElement,
    parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    selected: bool,
    dragging: bool,
    drag_offset: Vec2,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// A tree of pickable UI elements addressed by generational [`ElementId`]s.
///
/// The tree stores parent/child structure plus each element's
/// [`LocalElement`] data, and carries the per-element interaction markers
/// (selection, drag) that the pointer state machine manipulates. Child
/// order is insertion order and doubles as stacking order: later children
/// stack in front of earlier ones, so hit testing visits them last to
/// first.
///
/// Every accessor takes liveness into account. Operations on stale ids
/// return `None` or `false` instead of touching whichever element now
/// occupies the slot.
#[derive(Clone, Debug, Default)]
pub struct ElementTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ElementTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the tree holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts an element, appending it to `parent`'s children (or as a
    /// root when `parent` is `None`).
    ///
    /// Appending puts the new element in front of its siblings for both
    /// stacking and hit testing.
    ///
    /// ## Panics
    ///
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: Option<ElementId>, local: LocalElement) -> ElementId {
        if let Some(p) = parent {
            assert!(self.is_alive(p), "insert: parent element is not alive");
        }
        let element = Element {
            local,
            parent,
            children: Vec::new(),
            selected: false,
            dragging: false,
            drag_offset: Vec2::ZERO,
        };
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.element = Some(element);
            ElementId::new(idx, slot.generation)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                element: Some(element),
            });
            ElementId::new(idx, 1)
        };
        if let Some(p) = parent
            && let Some(parent_el) = self.element_mut(p)
        {
            parent_el.children.push(id);
        }
        self.len += 1;
        id
    }

    /// Removes an element and its whole subtree.
    ///
    /// Returns false if `id` is stale. All ids in the removed subtree
    /// become stale; their slots are reused by later inserts.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = self.parent_of(id)
            && let Some(parent_el) = self.element_mut(parent)
        {
            parent_el.children.retain(|&c| c != id);
        }
        let mut stack: SmallVec<[ElementId; 8]> = SmallVec::new();
        stack.push(id);
        while let Some(next) = stack.pop() {
            let Some(element) = self
                .slots
                .get_mut(next.idx())
                .filter(|slot| slot.generation == next.1)
                .and_then(|slot| slot.element.take())
            else {
                continue;
            };
            stack.extend(element.children.iter().copied());
            self.free.push(next.0);
            self.len -= 1;
        }
        true
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Parent of `id`, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.parent
    }

    /// Children of `id` in insertion (back-to-front) order.
    ///
    /// Stale ids yield an empty slice.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map_or(NO_CHILDREN, |el| &el.children)
    }

    /// Borrows the local data of a live element.
    pub fn local(&self, id: ElementId) -> Option<&LocalElement> {
        self.element(id).map(|el| &el.local)
    }

    /// Visibility flags of a live element.
    pub fn flags(&self, id: ElementId) -> Option<ElementFlags> {
        self.element(id).map(|el| el.local.flags)
    }

    /// Pick mode of a live element.
    pub fn pick_mode(&self, id: ElementId) -> Option<PickMode> {
        self.element(id).map(|el| el.local.pick_mode)
    }

    /// Interaction capabilities of a live element.
    pub fn capabilities(&self, id: ElementId) -> Option<Capabilities> {
        self.element(id).map(|el| el.local.capabilities)
    }

    /// Name of a live element, if it has one.
    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.element(id)?.local.name.as_deref()
    }

    /// Sets the bounds of `id` in its parent's space. Returns false for
    /// stale ids.
    pub fn set_local_bounds(&mut self, id: ElementId, bounds: Rect) -> bool {
        self.with_element(id, |el| el.local.local_bounds = bounds)
    }

    /// Sets the transform applied about `id`'s origin.
    pub fn set_local_transform(&mut self, id: ElementId, transform: Affine) -> bool {
        self.with_element(id, |el| el.local.local_transform = transform)
    }

    /// Replaces the visibility flags of `id`.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) -> bool {
        self.with_element(id, |el| el.local.flags = flags)
    }

    /// Replaces the pick mode of `id`.
    pub fn set_pick_mode(&mut self, id: ElementId, pick_mode: PickMode) -> bool {
        self.with_element(id, |el| el.local.pick_mode = pick_mode)
    }

    /// Replaces the interaction capabilities of `id`.
    pub fn set_capabilities(&mut self, id: ElementId, capabilities: Capabilities) -> bool {
        self.with_element(id, |el| el.local.capabilities = capabilities)
    }

    /// Sets or clears the name of `id`.
    pub fn set_name(&mut self, id: ElementId, name: Option<String>) -> bool {
        self.with_element(id, |el| el.local.name = name)
    }

    /// Finds the first element named `name` in the subtree rooted at
    /// `root`, checking `root` itself first, then descendants depth-first
    /// in insertion order.
    pub fn find_named(&self, root: ElementId, name: &str) -> Option<ElementId> {
        let element = self.element(root)?;
        if element.local.name.as_deref() == Some(name) {
            return Some(root);
        }
        for &child in &element.children {
            if let Some(found) = self.find_named(child, name) {
                return Some(found);
            }
        }
        None
    }

    /// Converts a point from the space enclosing `id`'s root into `id`'s
    /// own space, applying each ancestor's origin offset and transform on
    /// the way down.
    ///
    /// For a panel root the enclosing space is the panel's pixel space.
    /// Returns `None` for stale ids.
    pub fn to_local(&self, id: ElementId, point: Point) -> Option<Point> {
        let mut chain: SmallVec<[ElementId; 8]> = SmallVec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let element = self.element(current)?;
            chain.push(current);
            cursor = element.parent;
        }
        let mut p = point;
        for &ancestor in chain.iter().rev() {
            if let Some(element) = self.element(ancestor) {
                p = into_own_space(&element.local, p);
            }
        }
        Some(p)
    }

    /// Converts a point from the space enclosing `id`'s root into the
    /// space `id`'s own bounds are expressed in (its parent's space, or
    /// the enclosing space itself when `id` is a root).
    pub fn to_parent_local(&self, id: ElementId, point: Point) -> Option<Point> {
        match self.parent_of(id) {
            Some(parent) => self.to_local(parent, point),
            None if self.is_alive(id) => Some(point),
            None => None,
        }
    }

    /// Returns true if `id` is live and currently holds the selection
    /// marker.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|el| el.selected)
    }

    /// Marks `id` as selected.
    ///
    /// Only elements with [`Capabilities::SELECTABLE`] accept the marker.
    /// Returns true when the marker changed.
    pub fn select(&mut self, id: ElementId) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        if !element.local.capabilities.contains(Capabilities::SELECTABLE) || element.selected {
            return false;
        }
        element.selected = true;
        true
    }

    /// Clears the selection marker on `id`. Returns true when the marker
    /// changed.
    pub fn deselect(&mut self, id: ElementId) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        let was_selected = element.selected;
        element.selected = false;
        was_selected
    }

    /// Returns true if `id` is live and mid-drag.
    pub fn is_dragging(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|el| el.dragging)
    }

    /// Begins dragging `id` from the pointer position `point`, given in
    /// the space enclosing `id`'s root.
    ///
    /// The grab offset between the pointer and the element's origin is
    /// captured in the parent's space so that later [`drag_to`] calls keep
    /// the element pinned under the same spot of the pointer. Requires
    /// [`Capabilities::DRAGGABLE`]; returns false otherwise.
    ///
    /// [`drag_to`]: ElementTree::drag_to
    pub fn start_drag(&mut self, id: ElementId, point: Point) -> bool {
        if !self
            .capabilities(id)
            .is_some_and(|caps| caps.contains(Capabilities::DRAGGABLE))
        {
            return false;
        }
        let Some(parent_point) = self.to_parent_local(id, point) else {
            return false;
        };
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        element.drag_offset = element.local.local_bounds.origin() - parent_point;
        element.dragging = true;
        true
    }

    /// Moves a mid-drag element so its grab offset follows `point`.
    ///
    /// No-op (returning false) unless a drag is active on `id`.
    pub fn drag_to(&mut self, id: ElementId, point: Point) -> bool {
        if !self.is_dragging(id) {
            return false;
        }
        self.reposition(id, point)
    }

    /// Ends a drag on `id`, optionally snapping the element to `at` first.
    ///
    /// Passing the drag's original anchor position as `at` restores the
    /// element to where the drag began. Returns false if no drag was
    /// active.
    pub fn stop_drag(&mut self, id: ElementId, at: Option<Point>) -> bool {
        if !self.is_dragging(id) {
            return false;
        }
        if let Some(point) = at {
            self.reposition(id, point);
        }
        if let Some(element) = self.element_mut(id) {
            element.dragging = false;
            element.drag_offset = Vec2::ZERO;
        }
        true
    }

    fn reposition(&mut self, id: ElementId, point: Point) -> bool {
        let Some(parent_point) = self.to_parent_local(id, point) else {
            return false;
        };
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        let origin = parent_point + element.drag_offset;
        element.local.local_bounds = element.local.local_bounds.with_origin(origin);
        true
    }

    fn with_element(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }

    pub(crate) fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.element.as_ref())
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.element.as_mut())
    }
}

/// Converts a point from an element's parent space into the element's own
/// space: undo the origin offset, then undo the local transform.
pub(crate) fn into_own_space(local: &LocalElement, point_in_parent: Point) -> Point {
    let anchored = point_in_parent - local.local_bounds.origin().to_vec2();
    local.local_transform.inverse() * anchored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut tree = ElementTree::new();
        let a = tree.insert(None, LocalElement::default());
        assert!(tree.remove(a));
        let b = tree.insert(None, LocalElement::default());
        assert_eq!(a.idx(), b.idx());
        assert_ne!(a, b);
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, LocalElement::default());
        let child = tree.insert(Some(root), LocalElement::default());
        let grandchild = tree.insert(Some(child), LocalElement::default());
        let sibling = tree.insert(Some(root), LocalElement::default());

        assert!(tree.remove(child));
        assert!(!tree.is_alive(child));
        assert!(!tree.is_alive(grandchild));
        assert!(tree.is_alive(sibling));
        assert_eq!(tree.children_of(root), &[sibling]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, LocalElement::default());
        let first = tree.insert(Some(root), LocalElement::default());
        let second = tree.insert(Some(root), LocalElement::default());
        assert_eq!(tree.children_of(root), &[first, second]);
    }

    #[test]
    fn stale_ids_are_rejected_everywhere() {
        let mut tree = ElementTree::new();
        let a = tree.insert(None, LocalElement::default());
        tree.remove(a);

        assert!(tree.local(a).is_none());
        assert!(tree.children_of(a).is_empty());
        assert!(!tree.set_local_bounds(a, bounds(0.0, 0.0, 1.0, 1.0)));
        assert!(!tree.select(a));
        assert!(!tree.start_drag(a, Point::new(0.0, 0.0)));
        assert!(!tree.remove(a));
    }

    #[test]
    fn find_named_prefers_tree_order() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, LocalElement::default());
        let left = tree.insert(Some(root), LocalElement::default());
        let right = tree.insert(Some(root), LocalElement::default());
        let deep = tree.insert(Some(left), LocalElement::default());
        tree.set_name(deep, Some("target".into()));
        tree.set_name(right, Some("target".into()));

        // `left` comes before `right`, so its descendant wins.
        assert_eq!(tree.find_named(root, "target"), Some(deep));
        assert_eq!(tree.find_named(right, "target"), Some(right));
        assert_eq!(tree.find_named(root, "missing"), None);
    }

    #[test]
    fn selection_requires_capability() {
        let mut tree = ElementTree::new();
        let plain = tree.insert(None, LocalElement::default());
        let target = tree.insert(
            None,
            LocalElement {
                capabilities: Capabilities::SELECTABLE,
                ..LocalElement::default()
            },
        );

        assert!(!tree.select(plain));
        assert!(!tree.is_selected(plain));

        assert!(tree.select(target));
        assert!(tree.is_selected(target));
        // Selecting again reports no change.
        assert!(!tree.select(target));
        assert!(tree.deselect(target));
        assert!(!tree.deselect(target));
    }

    #[test]
    fn to_local_applies_ancestor_origins() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, LocalElement::with_bounds(bounds(10.0, 10.0, 100.0, 100.0)));
        let child = tree.insert(
            Some(root),
            LocalElement::with_bounds(bounds(5.0, 5.0, 50.0, 50.0)),
        );

        assert_eq!(
            tree.to_local(child, Point::new(20.0, 20.0)),
            Some(Point::new(5.0, 5.0))
        );
        assert_eq!(
            tree.to_parent_local(child, Point::new(20.0, 20.0)),
            Some(Point::new(10.0, 10.0))
        );
    }

    #[test]
    fn to_local_applies_local_transform() {
        let mut tree = ElementTree::new();
        let root = tree.insert(
            None,
            LocalElement {
                local_transform: Affine::scale(2.0),
                ..LocalElement::with_bounds(bounds(10.0, 0.0, 100.0, 100.0))
            },
        );

        // Origin offset is undone first, then the transform is inverted.
        assert_eq!(
            tree.to_local(root, Point::new(30.0, 40.0)),
            Some(Point::new(10.0, 20.0))
        );
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut tree = ElementTree::new();
        let root = tree.insert(
            None,
            LocalElement::with_bounds(bounds(20.0, 20.0, 100.0, 100.0)),
        );
        let card = tree.insert(
            Some(root),
            LocalElement {
                capabilities: Capabilities::DRAGGABLE,
                ..LocalElement::with_bounds(bounds(10.0, 10.0, 50.0, 50.0))
            },
        );

        // Grab at outer point (40, 40), which is (20, 20) in root space.
        assert!(tree.start_drag(card, Point::new(40.0, 40.0)));
        assert!(tree.is_dragging(card));

        assert!(tree.drag_to(card, Point::new(50.0, 45.0)));
        let moved = tree.local(card).map(|el| el.local_bounds);
        assert_eq!(moved, Some(bounds(20.0, 15.0, 50.0, 50.0)));

        assert!(tree.stop_drag(card, None));
        assert!(!tree.is_dragging(card));
        // Position sticks after the drag ends.
        assert_eq!(
            tree.local(card).map(|el| el.local_bounds),
            Some(bounds(20.0, 15.0, 50.0, 50.0))
        );
    }

    #[test]
    fn stop_drag_can_snap_back() {
        let mut tree = ElementTree::new();
        let card = tree.insert(
            None,
            LocalElement {
                capabilities: Capabilities::DRAGGABLE,
                ..LocalElement::with_bounds(bounds(10.0, 10.0, 50.0, 50.0))
            },
        );

        let anchor = Point::new(30.0, 30.0);
        assert!(tree.start_drag(card, anchor));
        assert!(tree.drag_to(card, Point::new(90.0, 90.0)));
        assert_ne!(
            tree.local(card).map(|el| el.local_bounds),
            Some(bounds(10.0, 10.0, 50.0, 50.0))
        );

        assert!(tree.stop_drag(card, Some(anchor)));
        assert_eq!(
            tree.local(card).map(|el| el.local_bounds),
            Some(bounds(10.0, 10.0, 50.0, 50.0))
        );
    }

    #[test]
    fn drag_requires_capability_and_activation() {
        let mut tree = ElementTree::new();
        let fixed = tree.insert(None, LocalElement::with_bounds(bounds(0.0, 0.0, 10.0, 10.0)));
        assert!(!tree.start_drag(fixed, Point::new(5.0, 5.0)));
        assert!(!tree.drag_to(fixed, Point::new(6.0, 6.0)));
        assert!(!tree.stop_drag(fixed, None));
    }
}
