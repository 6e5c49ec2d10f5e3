// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the Trellis demos.
//!
//! The demos run without a windowing system or 3D engine behind them; a
//! scripted raycaster stands in for the host scene, so each demo can drive
//! the interaction loop deterministically and narrate what happens.

use kurbo::Point;
use trellis_interaction::{ElementRef, InteractionEvent, SceneRaycaster};
use trellis_panel::{PanelSet, RayHitBuffer, SurfaceHit};

/// Raycaster that replays whatever hits the demo scripted for this frame.
#[derive(Debug, Default)]
pub struct ScriptedBeam {
    /// Hits for the current frame, in no particular order.
    pub hits: Vec<SurfaceHit>,
}

impl SceneRaycaster for ScriptedBeam {
    fn cast(&mut self, _pointer: Point, _max_distance: f64, out: &mut RayHitBuffer) {
        for &hit in &self.hits {
            out.push(hit);
        }
    }
}

/// Display name for an event target: the element's name when it has one.
pub fn label(panels: &PanelSet, target: ElementRef) -> String {
    panels
        .panel(target.panel)
        .and_then(|panel| panel.tree().local(target.element))
        .and_then(|local| local.name.clone())
        .unwrap_or_else(|| "unnamed element".to_owned())
}

/// Prints one line per event, positions in panel pixels.
pub fn narrate(panels: &PanelSet, events: &[InteractionEvent]) {
    for event in events {
        let name = label(panels, event.target());
        match event {
            InteractionEvent::Selected(_) => println!("    selected '{name}'"),
            InteractionEvent::Deselected(_) => println!("    deselected '{name}'"),
            InteractionEvent::Clicked(_) => println!("    clicked '{name}'"),
            InteractionEvent::DragStarted { position, .. } => {
                println!("    started dragging '{name}' at {position}");
            }
            InteractionEvent::DragMoved { position, .. } => {
                println!("    dragged '{name}' to {position}");
            }
            InteractionEvent::DragEnded {
                position: Some(position),
                ..
            } => {
                println!("    drag of '{name}' snapped back to {position}");
            }
            InteractionEvent::DragEnded { position: None, .. } => {
                println!("    drag of '{name}' ended in place");
            }
        }
    }
}
