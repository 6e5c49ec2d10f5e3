// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panels, the set that owns them, and surface-to-panel resolution.

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use trellis_element_tree::{ElementId, ElementTree, LocalElement, PickMode};

use crate::{PanelRegistry, RayHitBuffer, SurfaceHit, SurfaceKey};

/// Identifier for a panel in a [`PanelSet`].
///
/// Generational, with the same semantics as
/// [`ElementId`](trellis_element_tree::ElementId): stale ids are rejected
/// by every accessor and never alias a later panel in the same slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PanelId(pub(crate) u32, pub(crate) u32);

impl PanelId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A UI document projected onto one scene surface.
///
/// A panel owns an [`ElementTree`] plus the mapping from surface hits to
/// that tree's pixel space. The tree comes with a bounds-only root element
/// covering the panel, so hosts build content by inserting under
/// [`root`](Panel::root) and the root itself never swallows picks.
///
/// ## Pixel mapping
///
/// The panel renders at `resolution` texels. A surface hit arrives as a
/// normalized UV with `v` up; the panel flips it into y-down pixels and
/// divides by `scale`, so a scale of 2 makes the UI cover the surface with
/// half the logical area (larger apparent UI). `resolution` and `scale`
/// are assumed positive and finite.
#[derive(Clone, Debug)]
pub struct Panel {
    tree: ElementTree,
    root: ElementId,
    resolution: Size,
    scale: f64,
    surface: Option<SurfaceKey>,
}

impl Panel {
    /// Creates a panel rendering at `resolution` texels with scale 1.
    pub fn new(resolution: Size) -> Self {
        Self::with_scale(resolution, 1.0)
    }

    /// Creates a panel with an explicit UI scale.
    pub fn with_scale(resolution: Size, scale: f64) -> Self {
        let mut tree = ElementTree::new();
        let root = tree.insert(
            None,
            LocalElement {
                pick_mode: PickMode::BoundsOnly,
                ..LocalElement::with_bounds(Rect::from_origin_size(
                    Point::ORIGIN,
                    resolution / scale,
                ))
            },
        );
        Self {
            tree,
            root,
            resolution,
            scale,
            surface: None,
        }
    }

    /// The panel's element tree.
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Mutable access to the panel's element tree.
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    /// The bounds-only root element covering the panel.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Render resolution in texels.
    pub fn resolution(&self) -> Size {
        self.resolution
    }

    /// UI scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size of the panel's pixel space, `resolution / scale`.
    pub fn logical_size(&self) -> Size {
        self.resolution / self.scale
    }

    /// The surface this panel is bound to, if any.
    pub fn surface(&self) -> Option<SurfaceKey> {
        self.surface
    }

    /// Changes the render resolution, resizing the root element to match.
    pub fn set_resolution(&mut self, resolution: Size) {
        self.resolution = resolution;
        self.refresh_root();
    }

    /// Changes the UI scale, resizing the root element to match.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.refresh_root();
    }

    /// Converts a surface UV into panel pixel space.
    ///
    /// UVs have their origin at the bottom-left with `v` up; pixels have
    /// their origin at the top-left with `y` down, hence the flip of the
    /// vertical axis. Out-of-range UVs map to out-of-range pixels.
    pub fn surface_to_panel(&self, uv: Point) -> Point {
        Point::new(
            uv.x * self.resolution.width / self.scale,
            (1.0 - uv.y) * self.resolution.height / self.scale,
        )
    }

    /// Looks up an element by name anywhere in the panel's tree.
    pub fn find_named(&self, name: &str) -> Option<ElementId> {
        self.tree.find_named(self.root, name)
    }

    fn refresh_root(&mut self) {
        let bounds = Rect::from_origin_size(Point::ORIGIN, self.logical_size());
        self.tree.set_local_bounds(self.root, bounds);
    }
}

/// A surface hit resolved to a concrete panel and pixel position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelPointer {
    /// The panel the surface belongs to.
    pub panel: PanelId,
    /// Hit position in the panel's pixel space.
    pub position: Point,
}

#[derive(Clone, Debug)]
struct PanelSlot {
    generation: u32,
    panel: Option<Panel>,
}

/// Owns all live panels and the surface bindings that route hits to them.
///
/// Spawning and despawning keep an internal [`PanelRegistry`] up to date,
/// so frame processing can ask [`is_any_active`](PanelSet::is_any_active)
/// and size its hit buffer without extra bookkeeping from the host.
#[derive(Clone, Debug, Default)]
pub struct PanelSet {
    slots: Vec<PanelSlot>,
    free: Vec<u32>,
    by_surface: HashMap<SurfaceKey, PanelId>,
    registry: PanelRegistry,
}

impl PanelSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a panel rendering at `resolution` texels, returning its id.
    pub fn spawn(&mut self, resolution: Size) -> PanelId {
        self.spawn_panel(Panel::new(resolution))
    }

    /// Adds a ready-made panel (for non-default scale or prebuilt trees).
    ///
    /// The panel starts unbound regardless of where it came from; route
    /// hits to it with [`bind_surface`](PanelSet::bind_surface).
    pub fn spawn_panel(&mut self, mut panel: Panel) -> PanelId {
        panel.surface = None;
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.panel = Some(panel);
            PanelId::new(idx, slot.generation)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(PanelSlot {
                generation: 1,
                panel: Some(panel),
            });
            PanelId::new(idx, 1)
        };
        self.registry.on_panel_spawned();
        id
    }

    /// Removes a panel, releasing its surface binding.
    ///
    /// Returns false if `id` is stale. All element ids that pointed into
    /// the panel's tree die with it.
    pub fn despawn(&mut self, id: PanelId) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.1)
        else {
            return false;
        };
        let Some(panel) = slot.panel.take() else {
            return false;
        };
        if let Some(key) = panel.surface {
            self.by_surface.remove(&key);
        }
        self.free.push(id.0);
        self.registry.on_panel_destroyed();
        true
    }

    /// Returns true if `id` refers to a live panel.
    pub fn is_alive(&self, id: PanelId) -> bool {
        self.panel(id).is_some()
    }

    /// Borrows a live panel.
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.panel.as_ref())
    }

    /// Mutably borrows a live panel.
    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.panel.as_mut())
    }

    /// Binds `id`'s panel to a scene surface, replacing both the panel's
    /// previous binding and any other panel's claim on `surface`.
    ///
    /// Returns false if `id` is stale.
    pub fn bind_surface(&mut self, id: PanelId, surface: SurfaceKey) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(displaced) = self.by_surface.insert(surface, id)
            && displaced != id
            && let Some(panel) = self.panel_mut(displaced)
        {
            panel.surface = None;
        }
        let previous = self
            .panel_mut(id)
            .and_then(|panel| panel.surface.replace(surface));
        if let Some(previous) = previous
            && previous != surface
        {
            self.by_surface.remove(&previous);
        }
        true
    }

    /// Releases whatever panel is bound to `surface`. Returns true if a
    /// binding existed.
    pub fn unbind_surface(&mut self, surface: SurfaceKey) -> bool {
        let Some(id) = self.by_surface.remove(&surface) else {
            return false;
        };
        if let Some(panel) = self.panel_mut(id) {
            panel.surface = None;
        }
        true
    }

    /// The live panel bound to `surface`, if any.
    ///
    /// Bindings whose panel has died resolve to `None`; the surface is a
    /// plain scene object again until rebound.
    pub fn panel_for_surface(&self, surface: SurfaceKey) -> Option<PanelId> {
        let id = *self.by_surface.get(&surface)?;
        self.is_alive(id).then_some(id)
    }

    /// Resolves a raycast hit to a panel and pixel position.
    ///
    /// `None` when the hit surface carries no live panel.
    pub fn resolve_hit(&self, hit: SurfaceHit) -> Option<PanelPointer> {
        let id = self.panel_for_surface(hit.surface)?;
        let panel = self.panel(id)?;
        Some(PanelPointer {
            panel: id,
            position: panel.surface_to_panel(hit.uv),
        })
    }

    /// Number of live panels.
    pub fn len(&self) -> usize {
        self.registry.active()
    }

    /// Returns true when the set holds no panels.
    pub fn is_empty(&self) -> bool {
        !self.registry.is_any_active()
    }

    /// Returns true when at least one panel exists.
    pub fn is_any_active(&self) -> bool {
        self.registry.is_any_active()
    }

    /// The lifecycle registry the set maintains.
    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    /// Exclusive access to the registry's hit buffer, for handing to this
    /// frame's raycast.
    pub fn hit_buffer_mut(&mut self) -> &mut RayHitBuffer {
        self.registry.buffer_mut()
    }
}
