// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core identifier and per-element data types.

use alloc::string::String;
use kurbo::{Affine, Rect};

/// Identifier for an element in an [`ElementTree`](crate::ElementTree).
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to
///   that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `ElementId`.
///
/// Use [`ElementTree::is_alive`](crate::ElementTree::is_alive) to check
/// whether an `ElementId` still refers to a live element. Stale ids never
/// alias a different live element because the generation must match.
///
/// `u32` is ample for practical lifetimes; behavior on generation overflow
/// is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Visibility state of an element.
    ///
    /// The two flags gate picking at different granularities:
    ///
    /// - [`DISPLAYED`](ElementFlags::DISPLAYED) gates the whole subtree. A
    ///   non-displayed element takes part in neither layout nor picking, and
    ///   neither do its descendants.
    /// - [`VISIBLE`](ElementFlags::VISIBLE) gates only the element itself. A
    ///   displayed but invisible element still positions and picks its
    ///   children; it just never matches a pick itself.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element participates in the tree at all.
        const DISPLAYED = 0b0000_0001;
        /// Element itself is shown and can match a pick.
        const VISIBLE   = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::DISPLAYED | Self::VISIBLE
    }
}

/// How an element participates in hit testing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PickMode {
    /// The element is transparent to picking. If it also has no children,
    /// its whole branch is skipped.
    None,
    /// The element's bounds are hit tested so that containment can gate
    /// descendants, but the element itself is never reported.
    BoundsOnly,
    /// The element is hit tested and reported when the point falls inside
    /// its bounds.
    #[default]
    Position,
}

bitflags::bitflags! {
    /// Interaction roles an element opts into.
    ///
    /// Picking itself ignores capabilities; they matter when a caller asks
    /// for the topmost element with a given role, which is how the pointer
    /// state machine finds selection, click, and drag targets.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Element can hold the selection.
        const SELECTABLE = 0b0000_0001;
        /// Element responds to click events.
        const CLICKABLE  = 0b0000_0010;
        /// Element can be repositioned by a pointer drag.
        const DRAGGABLE  = 0b0000_0100;
    }
}

/// Layout and interaction data an element carries, expressed relative to
/// its parent.
///
/// `local_bounds` positions the element in its parent's coordinate space;
/// the bounds' origin is the element's own origin, so a child at local
/// (0, 0) sits at the parent's top-left corner. `local_transform` applies
/// about that origin, after the origin offset.
///
/// Bounds are assumed well-formed (`x0 <= x1`, `y0 <= y1`) and transforms
/// invertible; behavior under degenerate values is unspecified.
#[derive(Clone, Debug)]
pub struct LocalElement {
    /// Bounds in the parent's coordinate space.
    pub local_bounds: Rect,
    /// Transform about the element's own origin.
    pub local_transform: Affine,
    /// Visibility state.
    pub flags: ElementFlags,
    /// Hit-testing participation.
    pub pick_mode: PickMode,
    /// Interaction roles.
    pub capabilities: Capabilities,
    /// Optional name for lookup via
    /// [`find_named`](crate::ElementTree::find_named).
    pub name: Option<String>,
}

impl Default for LocalElement {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
            flags: ElementFlags::default(),
            pick_mode: PickMode::default(),
            capabilities: Capabilities::empty(),
            name: None,
        }
    }
}

impl LocalElement {
    /// A displayed, visible, position-picked element with the given bounds.
    pub fn with_bounds(local_bounds: Rect) -> Self {
        Self {
            local_bounds,
            ..Self::default()
        }
    }
}
