// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel lifecycle counting and the per-frame raycast hit buffer.

use alloc::vec::Vec;

use crate::SurfaceHit;

/// Tracks how many panels currently exist and owns the hit buffer the
/// per-frame raycast fills.
///
/// The count exists so that per-frame raycasting can size its hit buffer
/// and skip work entirely while no panel is active; the buffer is resized
/// to exactly the active count on every change. [`PanelSet`] keeps a
/// registry up to date automatically; the standalone type is exposed for
/// hosts that manage panel-like surfaces outside a set.
///
/// The count saturates at zero: a destroy reported without a matching
/// spawn is ignored rather than driving the count negative and poisoning
/// every later spawn/destroy pair.
///
/// [`PanelSet`]: crate::PanelSet
#[derive(Clone, Debug, Default)]
pub struct PanelRegistry {
    active: usize,
    buffer: RayHitBuffer,
}

impl PanelRegistry {
    /// Creates a registry with no active panels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a panel came into existence.
    pub fn on_panel_spawned(&mut self) {
        self.active += 1;
        self.buffer.set_capacity(self.active);
    }

    /// Records that a panel was destroyed.
    ///
    /// Unmatched destroys are ignored; the count never goes below zero.
    pub fn on_panel_destroyed(&mut self) {
        self.active = self.active.saturating_sub(1);
        self.buffer.set_capacity(self.active);
    }

    /// Number of active panels.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Returns true when at least one panel is active.
    ///
    /// Frame processing bails out early on false; with no panels there is
    /// nothing a pointer could hit.
    pub fn is_any_active(&self) -> bool {
        self.active > 0
    }

    /// Capacity of the hit buffer.
    ///
    /// One slot per active panel: a ray can pass through at most every
    /// panel surface once, so deeper buffers only hold hits nobody reads.
    pub fn buffer_capacity(&self) -> usize {
        self.active
    }

    /// The hit buffer recorded for the current frame.
    pub fn buffer(&self) -> &RayHitBuffer {
        &self.buffer
    }

    /// Exclusive access to the hit buffer, for clearing it and handing it
    /// to the host's raycast.
    pub fn buffer_mut(&mut self) -> &mut RayHitBuffer {
        &mut self.buffer
    }
}

/// Reusable buffer the host writes raycast hits into, one frame at a time.
///
/// The buffer has a fixed capacity between panel spawns (the registry
/// keeps it at one slot per active panel); [`push`](RayHitBuffer::push)
/// drops hits beyond it so a host can report every raycast result without
/// first counting panels itself. Storage is retained across frames; a
/// frame starts with [`clear`](RayHitBuffer::clear) and is ordered with
/// [`sort_by_distance`](RayHitBuffer::sort_by_distance) before reading.
#[derive(Clone, Debug, Default)]
pub struct RayHitBuffer {
    hits: Vec<SurfaceHit>,
    capacity: usize,
}

impl RayHitBuffer {
    /// Creates an empty buffer with zero capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity, dropping recorded hits beyond it.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.hits.truncate(capacity);
    }

    /// Appends a hit. Returns false (dropping the hit) when the capacity
    /// is already used up.
    pub fn push(&mut self, hit: SurfaceHit) -> bool {
        if self.hits.len() >= self.capacity {
            return false;
        }
        self.hits.push(hit);
        true
    }

    /// Orders the hits nearest first.
    ///
    /// Uses a total order over `f64`, so NaN distances sort to the far
    /// end instead of panicking.
    pub fn sort_by_distance(&mut self) {
        self.hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }

    /// Drops all hits, keeping capacity and storage.
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Hits recorded this frame, in push order until sorted.
    pub fn hits(&self) -> &[SurfaceHit] {
        &self.hits
    }

    /// Number of recorded hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true when no hit was recorded.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Current capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SurfaceKey;
    use kurbo::Point;

    fn hit(surface: u64, distance: f64) -> SurfaceHit {
        SurfaceHit::new(SurfaceKey(surface), distance, Point::new(0.5, 0.5))
    }

    #[test]
    fn registry_counts_spawns_and_destroys() {
        let mut registry = PanelRegistry::new();
        assert!(!registry.is_any_active());

        registry.on_panel_spawned();
        registry.on_panel_spawned();
        registry.on_panel_destroyed();
        assert_eq!(registry.active(), 1);
        assert!(registry.is_any_active());
    }

    #[test]
    fn registry_never_goes_negative() {
        let mut registry = PanelRegistry::new();
        registry.on_panel_destroyed();
        registry.on_panel_destroyed();
        assert_eq!(registry.active(), 0);

        // A later spawn/destroy pair still balances.
        registry.on_panel_spawned();
        assert_eq!(registry.active(), 1);
        registry.on_panel_destroyed();
        assert_eq!(registry.active(), 0);
    }

    #[test]
    fn registry_sizes_buffer_with_count() {
        let mut registry = PanelRegistry::new();
        registry.on_panel_spawned();
        registry.on_panel_spawned();
        registry.on_panel_spawned();
        assert_eq!(registry.buffer().capacity(), 3);

        registry.buffer_mut().push(hit(1, 1.0));
        registry.buffer_mut().push(hit(2, 2.0));
        registry.buffer_mut().push(hit(3, 3.0));

        // Shrinking the count truncates what was recorded.
        registry.on_panel_destroyed();
        registry.on_panel_destroyed();
        assert_eq!(registry.buffer().capacity(), 1);
        assert_eq!(registry.buffer().len(), 1);
    }

    #[test]
    fn buffer_respects_capacity() {
        let mut buffer = RayHitBuffer::new();
        buffer.set_capacity(2);
        assert!(buffer.push(hit(1, 3.0)));
        assert!(buffer.push(hit(2, 1.0)));
        assert!(!buffer.push(hit(3, 2.0)));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn buffer_sorts_nearest_first() {
        let mut buffer = RayHitBuffer::new();
        buffer.set_capacity(4);
        buffer.push(hit(1, 3.0));
        buffer.push(hit(2, 1.0));
        buffer.push(hit(3, 2.0));
        buffer.sort_by_distance();

        let order: Vec<u64> = buffer.hits().iter().map(|h| h.surface.0).collect();
        assert_eq!(order, [2, 3, 1]);
    }

    #[test]
    fn clear_resets_between_frames() {
        let mut buffer = RayHitBuffer::new();
        buffer.set_capacity(3);
        buffer.push(hit(1, 1.0));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 3);
    }
}
