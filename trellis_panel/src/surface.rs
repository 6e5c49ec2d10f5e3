// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-surface identities and raycast hit records.

use kurbo::Point;

/// Host-assigned identity of a surface in the 3D scene.
///
/// Trellis never inspects scene geometry itself; the host raycasts against
/// whatever colliders or meshes it has and reports hits back tagged with
/// the `SurfaceKey` it registered for the surface. The key is opaque here,
/// so hosts can pack an entity id, a collider handle, or anything else
/// that fits in 64 bits.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SurfaceKey(pub u64);

/// One raycast hit against a scene surface.
///
/// `uv` is the texture-style surface coordinate of the hit with the origin
/// at the bottom-left and `v` growing upward, both components nominally in
/// `[0, 1]`. Out-of-range coordinates are passed through unchanged and
/// simply map to points outside the panel. `distance` is the ray parameter
/// at the hit, used only for nearest-first ordering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceHit {
    /// Which surface was hit.
    pub surface: SurfaceKey,
    /// Distance from the ray origin to the hit.
    pub distance: f64,
    /// Normalized surface coordinate of the hit, `v` up.
    pub uv: Point,
}

impl SurfaceHit {
    /// Convenience constructor.
    pub fn new(surface: SurfaceKey, distance: f64, uv: Point) -> Self {
        Self {
            surface,
            distance,
            uv,
        }
    }
}
