// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Interaction: the pointer state machine for panel UI in a 3D
//! scene.
//!
//! This crate turns raw pointer input plus host raycasts into selection,
//! click, and drag behavior on `trellis_panel` documents. The host stays
//! in charge of everything scene-shaped: it owns the camera, casts the
//! pointer ray, and reports which panel surfaces it crossed. The machine
//! owns everything UI-shaped: nearest-panel resolution, hover selection,
//! press/release edges, drag thresholds and anchors.
//!
//! - [`PointerFrame`] / [`Touch`] / [`TouchPhase`]: one frame of input.
//!   Touch, when active, takes precedence over the mouse fields.
//! - [`SceneRaycaster`]: the one trait the host implements.
//! - [`PointerInteraction`]: the per-frame state machine, configured by
//!   [`InteractionConfig`] and validated up front via [`ConfigError`].
//! - [`InteractionEvent`] / [`ElementRef`]: what happened, to which
//!   element, on which panel.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use trellis_element_tree::{Capabilities, LocalElement};
//! use trellis_interaction::{
//!     InteractionConfig, InteractionEvent, PointerFrame, PointerInteraction, SceneRaycaster,
//! };
//! use trellis_panel::{PanelSet, RayHitBuffer, SurfaceHit, SurfaceKey};
//!
//! // A scene with one panel bound to one surface.
//! let mut panels = PanelSet::new();
//! let panel = panels.spawn(Size::new(200.0, 100.0));
//! panels.bind_surface(panel, SurfaceKey(1));
//! let button = {
//!     let panel = panels.panel_mut(panel).unwrap();
//!     let root = panel.root();
//!     panel.tree_mut().insert(
//!         Some(root),
//!         LocalElement {
//!             capabilities: Capabilities::SELECTABLE | Capabilities::CLICKABLE,
//!             ..LocalElement::with_bounds(Rect::new(50.0, 20.0, 150.0, 60.0))
//!         },
//!     )
//! };
//!
//! // The host's raycaster. Here the pointer always hits the panel's
//! // center; a real host would cast into its scene.
//! struct Beam;
//! impl SceneRaycaster for Beam {
//!     fn cast(&mut self, _pointer: Point, _max_distance: f64, out: &mut RayHitBuffer) {
//!         out.push(SurfaceHit::new(SurfaceKey(1), 2.0, Point::new(0.5, 0.5)));
//!     }
//! }
//!
//! let mut machine = PointerInteraction::new(InteractionConfig::default()).unwrap();
//! let mut events = Vec::new();
//!
//! // Hover selects; the press edge clicks.
//! machine.tick(
//!     PointerFrame::mouse(Point::ORIGIN, false),
//!     &mut panels,
//!     &mut Beam,
//!     &mut events,
//! );
//! machine.tick(
//!     PointerFrame::mouse(Point::ORIGIN, true),
//!     &mut panels,
//!     &mut Beam,
//!     &mut events,
//! );
//!
//! assert!(events
//!     .iter()
//!     .any(|event| matches!(event, InteractionEvent::Clicked(t) if t.element == button)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod events;
mod input;
mod machine;

pub use events::{ElementRef, InteractionEvent};
pub use input::{PointerFrame, Touch, TouchPhase};
pub use machine::{
    ConfigError, InteractionConfig, InteractionDebugInfo, PointerInteraction, SceneRaycaster,
};
