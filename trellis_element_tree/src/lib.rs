// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Element Tree: a Kurbo-native tree of pickable UI elements.
//!
//! Trellis Element Tree is the 2D half of routing pointer interaction onto
//! UI that lives on surfaces in a 3D scene. It stores the element
//! hierarchy of one UI document and answers the question "what is under
//! this point" the way a retained-mode toolkit would.
//!
//! - Represents a hierarchy of elements with parent-relative bounds,
//!   local transforms, visibility flags, and interaction capabilities.
//! - Provides recursive hit testing that is exactly faithful to stacking
//!   order: children in front of parents, later siblings in front of
//!   earlier ones.
//! - Carries per-element interaction state (selection marker, drag state
//!   with grab offset) so a pointer state machine can act on the tree
//!   without a side table.
//!
//! ## Where this fits
//!
//! A Trellis stack separates concerns per panel:
//! - Element tree: structure, geometry, picking, interaction markers
//!   (this crate).
//! - Panel: binds a tree to a scene surface and converts surface hits
//!   into panel pixels (`trellis_panel`).
//! - Interaction: the per-frame pointer state machine that turns raycasts
//!   into selection, click, and drag (`trellis_interaction`).
//!
//! ## Coordinate model
//!
//! An element's [`LocalElement::local_bounds`] positions it in its
//! parent's space; the bounds' origin is the element's own origin, and
//! [`LocalElement::local_transform`] applies about that origin. Picking
//! takes a point in the space enclosing the root (panel pixel space for a
//! panel root) and converts it branch by branch on the way down, so
//! nested offsets and transforms compose without any world-space caching.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange content. Upstream code computes
//! bounds with whatever layout system it likes and writes the results in
//! via [`ElementTree::set_local_bounds`].
//!
//! ## API overview
//!
//! - [`ElementTree`]: the arena of elements, addressed by generational
//!   [`ElementId`]s.
//! - [`LocalElement`]: per-element data (bounds, transform, flags, pick
//!   mode, capabilities, optional name).
//! - [`ElementFlags`]: displayed/visible gates with subtree vs. element
//!   granularity.
//! - [`PickMode`]: how an element participates in hit testing.
//! - [`Capabilities`]: the interaction roles an element opts into.
//! - [`PickList`]: all hits under a point, topmost first.
//!
//! Key operations:
//! - [`ElementTree::insert`] / [`ElementTree::remove`]
//! - [`ElementTree::pick`], [`ElementTree::pick_all`],
//!   [`ElementTree::pick_topmost_with`]
//! - [`ElementTree::select`] / [`ElementTree::deselect`]
//! - [`ElementTree::start_drag`] / [`ElementTree::drag_to`] /
//!   [`ElementTree::stop_drag`]
//! - [`ElementTree::find_named`], [`ElementTree::to_local`]
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod pick;
mod tree;
mod types;

pub use pick::PickList;
pub use tree::ElementTree;
pub use types::{Capabilities, ElementFlags, ElementId, LocalElement, PickMode};
