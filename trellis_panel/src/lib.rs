// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Panel: UI documents bound to surfaces in a 3D scene.
//!
//! A panel pairs one `trellis_element_tree` document with one scene
//! surface. The host renders the panel's UI to a texture, maps it onto
//! the surface, and raycasts against the scene; this crate converts the
//! resulting surface hits back into panel pixel positions so the element
//! tree can be picked.
//!
//! - [`Panel`]: an element tree plus its render resolution, UI scale, and
//!   the UV-to-pixel mapping (with the y flip between texture space and
//!   UI space).
//! - [`PanelSet`]: owns live panels behind generational [`PanelId`]s and
//!   maintains the [`SurfaceKey`] bindings that route hits.
//! - [`SurfaceHit`] / [`RayHitBuffer`]: how the host reports raycast
//!   results, one reusable buffer per frame, ordered nearest first.
//! - [`PanelRegistry`]: panel lifecycle counting, used to size the hit
//!   buffer and to skip frames with no panels at all.
//!
//! Scene geometry stays on the host side. Trellis only ever sees opaque
//! [`SurfaceKey`]s and the normalized UVs the host's raycaster produces,
//! which keeps this crate independent of any particular engine or
//! collider representation.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod panel;
mod registry;
mod surface;

pub use panel::{Panel, PanelId, PanelPointer, PanelSet};
pub use registry::{PanelRegistry, RayHitBuffer};
pub use surface::{SurfaceHit, SurfaceKey};
