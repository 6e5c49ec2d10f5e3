// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame pointer state machine.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use trellis_element_tree::Capabilities;
use trellis_panel::{PanelPointer, PanelSet, RayHitBuffer};

use crate::{ElementRef, InteractionEvent, PointerFrame};

/// Tuning for [`PointerInteraction`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    /// How far the pointer ray reaches into the scene, in scene units.
    ///
    /// Defaults to 50.
    pub max_raycast_distance: f64,
    /// How far the pointer must travel from its press anchor, in panel
    /// pixels, before a drag starts. Movement up to and including the
    /// threshold never drags.
    ///
    /// Defaults to 10.
    pub drag_threshold: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            max_raycast_distance: 50.0,
            drag_threshold: 10.0,
        }
    }
}

impl InteractionConfig {
    /// Checks the configuration against the machine's requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_raycast_distance.is_finite() || self.max_raycast_distance <= 0.0 {
            return Err(ConfigError::RaycastDistance(self.max_raycast_distance));
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::DragThreshold(self.drag_threshold));
        }
        Ok(())
    }
}

/// Error returned for configurations the machine refuses to run with.
///
/// Rejecting these at construction keeps the per-frame path free of
/// half-working states: a zero-length ray or a NaN threshold would not
/// fail loudly there, it would just stop matching anything.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_raycast_distance` was not finite and positive.
    RaycastDistance(f64),
    /// `drag_threshold` was negative or not finite.
    DragThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::RaycastDistance(value) => {
                write!(f, "max raycast distance must be finite and positive, got {value}")
            }
            Self::DragThreshold(value) => {
                write!(f, "drag threshold must be finite and non-negative, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// How the host casts the pointer ray into its scene.
///
/// The machine owns no scene geometry. Each tick it hands the host the
/// pointer position (verbatim from the [`PointerFrame`]) and the ray
/// length, and the host pushes whatever panel surfaces the ray crossed
/// into `out`. Hits may arrive in any order and may include surfaces with
/// no live panel; the machine sorts and filters.
pub trait SceneRaycaster {
    /// Casts the pointer ray, pushing surface hits into `out`.
    ///
    /// `out` already has its frame capacity set; pushes beyond it are
    /// dropped.
    fn cast(&mut self, pointer: Point, max_distance: f64, out: &mut RayHitBuffer);
}

/// Snapshot of the machine's sticky state, for logging and tests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionDebugInfo {
    /// The current selection.
    pub selected: Option<ElementRef>,
    /// The element currently being dragged.
    pub dragging: Option<ElementRef>,
    /// Pointer position where the current press was anchored, in panel
    /// pixels.
    pub drag_anchor: Option<Point>,
    /// Whether the pointer was down at the end of the last tick.
    pub previous_down: bool,
}

/// Routes pointer raycasts into panel UI, frame by frame.
///
/// One instance tracks one pointer. Each [`tick`](PointerInteraction::tick)
/// takes a fresh [`PointerFrame`], casts it into the scene through the
/// host's [`SceneRaycaster`], resolves the nearest live panel, and turns
/// the result into selection, click, and drag transitions. Tree markers
/// are updated through the panels' element trees, and every transition is
/// appended to the caller's event list.
///
/// ## Target resolution
///
/// Hits are walked nearest first. The first hit whose surface carries a
/// live panel decides the frame, even when nothing selectable sits under
/// the pointer on that panel; farther panels never receive interaction
/// through a nearer one. Surfaces whose panel has died are skipped like
/// plain scenery.
///
/// ## Press, click, drag
///
/// - Selection follows hover. Moving onto a selectable element selects it
///   and deselects the previous one, except while the pointer is held
///   down from a previous frame, which would let a press slide onto an
///   element it never started on.
/// - A click fires on the press edge, if the selection handles clicks.
/// - A press anchors at its first hit position. Once the pointer travels
///   beyond the drag threshold, the selection starts dragging (if it can)
///   and follows the pointer; dropping back inside the threshold ends the
///   drag where it began. Release ends it in place.
/// - A frame whose ray hits no live panel deselects, cancels any drag
///   back to its anchor, and keeps the anchor until release.
#[derive(Clone, Debug, Default)]
pub struct PointerInteraction {
    config: InteractionConfig,
    selected: Option<ElementRef>,
    dragging: Option<ElementRef>,
    drag_anchor: Option<Point>,
    previous_down: bool,
}

impl PointerInteraction {
    /// Creates a machine with a validated configuration.
    pub fn new(config: InteractionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The current selection, if any.
    pub fn selected(&self) -> Option<ElementRef> {
        self.selected
    }

    /// The element currently being dragged, if any.
    pub fn dragging(&self) -> Option<ElementRef> {
        self.dragging
    }

    /// Snapshot of the machine's sticky state.
    pub fn debug_info(&self) -> InteractionDebugInfo {
        InteractionDebugInfo {
            selected: self.selected,
            dragging: self.dragging,
            drag_anchor: self.drag_anchor,
            previous_down: self.previous_down,
        }
    }

    /// Forgets all transient pointer state without emitting events.
    ///
    /// Markers already applied to element trees are left alone; hosts
    /// tearing down a scene drop the trees with it.
    pub fn reset(&mut self) {
        self.selected = None;
        self.dragging = None;
        self.drag_anchor = None;
        self.previous_down = false;
    }

    /// Processes one frame of pointer input.
    ///
    /// Events for every transition this frame are appended to `events` in
    /// the order the tree mutations happen; the caller owns clearing the
    /// list between frames. Does nothing while no panel exists.
    pub fn tick<R: SceneRaycaster + ?Sized>(
        &mut self,
        frame: PointerFrame,
        panels: &mut PanelSet,
        raycaster: &mut R,
        events: &mut Vec<InteractionEvent>,
    ) {
        if !panels.is_any_active() {
            return;
        }

        let position = frame.pointer_position();
        let down = frame.pointer_down();
        let pressed_edge = down && !self.previous_down;
        let released_edge = (!down && self.previous_down) || frame.touch_ended();

        let buffer = panels.hit_buffer_mut();
        buffer.clear();
        raycaster.cast(position, self.config.max_raycast_distance, buffer);
        buffer.sort_by_distance();

        // The nearest live panel decides the frame, even when nothing
        // selectable sits under the pointer there.
        let mut candidate: Option<(PanelPointer, Option<ElementRef>)> = None;
        for &hit in panels.registry().buffer().hits() {
            let Some(pointer) = panels.resolve_hit(hit) else {
                continue;
            };
            let element = panels.panel(pointer.panel).and_then(|panel| {
                panel.tree().pick_topmost_with(
                    panel.root(),
                    pointer.position,
                    Capabilities::SELECTABLE,
                )
            });
            candidate = Some((
                pointer,
                element.map(|element| ElementRef::new(pointer.panel, element)),
            ));
            break;
        }
        let candidate_position = candidate.map(|(pointer, _)| pointer.position);

        match candidate {
            Some((_, Some(next))) => {
                // Switching targets while the pointer is held would let a
                // press slide onto an element it never started on.
                if self.selected != Some(next) && !self.previous_down {
                    if let Some(old) = self.selected.take() {
                        deselect_in(panels, old, events);
                    }
                    if select_in(panels, next, events) {
                        self.selected = Some(next);
                    }
                }
            }
            Some((_, None)) => {
                if let Some(old) = self.selected.take() {
                    deselect_in(panels, old, events);
                }
            }
            None => {
                // Ray left panel space entirely: drop the selection and
                // cancel any drag back to its anchor. The anchor stays
                // until release so a grazing miss cannot re-arm a drag at
                // a new position mid-press.
                if let Some(old) = self.selected.take() {
                    deselect_in(panels, old, events);
                }
                if let Some(drag) = self.dragging.take() {
                    end_drag_in(panels, drag, self.drag_anchor, events);
                }
            }
        }

        if pressed_edge
            && let Some(selected) = self.selected
            && has_capability(panels, selected, Capabilities::CLICKABLE)
        {
            events.push(InteractionEvent::Clicked(selected));
        }

        if frame.pointer_held() && self.drag_anchor.is_none() {
            self.drag_anchor = candidate_position;
        }

        match (candidate_position, self.drag_anchor) {
            (Some(current), Some(anchor))
                if (current - anchor).hypot2()
                    > self.config.drag_threshold * self.config.drag_threshold =>
            {
                if let Some(drag) = self.dragging {
                    if drag_to_in(panels, drag, current) {
                        events.push(InteractionEvent::DragMoved {
                            target: drag,
                            position: current,
                        });
                    }
                } else if let Some(selected) = self.selected
                    && has_capability(panels, selected, Capabilities::DRAGGABLE)
                    && start_drag_in(panels, selected, current)
                {
                    self.dragging = Some(selected);
                    events.push(InteractionEvent::DragStarted {
                        target: selected,
                        position: current,
                    });
                }
            }
            _ => {
                // Back inside the threshold: the drag ends where it began.
                if let Some(drag) = self.dragging.take_if(|_| self.drag_anchor.is_some()) {
                    end_drag_in(panels, drag, self.drag_anchor, events);
                }
            }
        }

        self.previous_down = down;

        if released_edge {
            if let Some(drag) = self.dragging.take() {
                end_drag_in(panels, drag, None, events);
            }
            self.drag_anchor = None;
        }
    }
}

fn select_in(panels: &mut PanelSet, target: ElementRef, events: &mut Vec<InteractionEvent>) -> bool {
    let selected = panels
        .panel_mut(target.panel)
        .is_some_and(|panel| panel.tree_mut().select(target.element));
    if selected {
        events.push(InteractionEvent::Selected(target));
    }
    selected
}

fn deselect_in(panels: &mut PanelSet, target: ElementRef, events: &mut Vec<InteractionEvent>) {
    let deselected = panels
        .panel_mut(target.panel)
        .is_some_and(|panel| panel.tree_mut().deselect(target.element));
    if deselected {
        events.push(InteractionEvent::Deselected(target));
    }
}

fn start_drag_in(panels: &mut PanelSet, target: ElementRef, position: Point) -> bool {
    panels
        .panel_mut(target.panel)
        .is_some_and(|panel| panel.tree_mut().start_drag(target.element, position))
}

fn drag_to_in(panels: &mut PanelSet, target: ElementRef, position: Point) -> bool {
    panels
        .panel_mut(target.panel)
        .is_some_and(|panel| panel.tree_mut().drag_to(target.element, position))
}

fn end_drag_in(
    panels: &mut PanelSet,
    target: ElementRef,
    at: Option<Point>,
    events: &mut Vec<InteractionEvent>,
) {
    let ended = panels
        .panel_mut(target.panel)
        .is_some_and(|panel| panel.tree_mut().stop_drag(target.element, at));
    if ended {
        events.push(InteractionEvent::DragEnded {
            target,
            position: at,
        });
    }
}

fn has_capability(panels: &PanelSet, target: ElementRef, capability: Capabilities) -> bool {
    panels
        .panel(target.panel)
        .and_then(|panel| panel.tree().capabilities(target.element))
        .is_some_and(|caps| caps.contains(capability))
}
