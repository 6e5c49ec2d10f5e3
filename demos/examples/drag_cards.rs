// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging, snap-back, and miss cancellation.
//!
//! Two draggable cards on one panel. The scripted pointer drags the note
//! and drops it, then starts dragging the photo and leaves the panel
//! mid-drag, which cancels the drag back to its anchor.
//!
//! Run:
//! - `cargo run -p trellis_demos --example drag_cards`

use kurbo::{Point, Rect, Size};
use trellis_demos::{ScriptedBeam, narrate};
use trellis_element_tree::{Capabilities, ElementId, LocalElement};
use trellis_interaction::{InteractionConfig, PointerFrame, PointerInteraction};
use trellis_panel::{PanelId, PanelSet, SurfaceHit, SurfaceKey};

const PANEL: Size = Size::new(400.0, 300.0);

fn uv(pixel: Point) -> Point {
    Point::new(pixel.x / PANEL.width, 1.0 - pixel.y / PANEL.height)
}

fn card_origin(panels: &PanelSet, panel: PanelId, card: ElementId) -> Point {
    panels
        .panel(panel)
        .and_then(|p| p.tree().local(card))
        .map(|local| local.local_bounds.origin())
        .unwrap()
}

fn main() {
    let mut panels = PanelSet::new();
    let panel = panels.spawn(PANEL);
    panels.bind_surface(panel, SurfaceKey(7));
    let (note, photo) = {
        let p = panels.panel_mut(panel).unwrap();
        let root = p.root();
        let note = p.tree_mut().insert(
            Some(root),
            LocalElement {
                capabilities: Capabilities::SELECTABLE | Capabilities::DRAGGABLE,
                name: Some("note".to_owned()),
                ..LocalElement::with_bounds(Rect::new(30.0, 40.0, 150.0, 140.0))
            },
        );
        let photo = p.tree_mut().insert(
            Some(root),
            LocalElement {
                capabilities: Capabilities::SELECTABLE | Capabilities::DRAGGABLE,
                name: Some("photo".to_owned()),
                ..LocalElement::with_bounds(Rect::new(200.0, 60.0, 340.0, 200.0))
            },
        );
        (note, photo)
    };

    let mut machine = PointerInteraction::new(InteractionConfig::default()).unwrap();
    let mut beam = ScriptedBeam::default();
    let mut events = Vec::new();

    let mut tick = |machine: &mut PointerInteraction,
                    panels: &mut PanelSet,
                    step: &str,
                    pixel: Option<Point>,
                    pressed: bool| {
        println!("{step}");
        beam.hits.clear();
        if let Some(pixel) = pixel {
            beam.hits.push(SurfaceHit::new(SurfaceKey(7), 2.0, uv(pixel)));
        }
        events.clear();
        machine.tick(
            PointerFrame::mouse(Point::ORIGIN, pressed),
            panels,
            &mut beam,
            &mut events,
        );
        narrate(panels, &events);
    };

    tick(
        &mut machine,
        &mut panels,
        "hover over the note",
        Some(Point::new(90.0, 90.0)),
        false,
    );
    tick(
        &mut machine,
        &mut panels,
        "press",
        Some(Point::new(90.0, 90.0)),
        true,
    );
    tick(
        &mut machine,
        &mut panels,
        "nudge (stays within the drag threshold)",
        Some(Point::new(95.0, 92.0)),
        true,
    );
    tick(
        &mut machine,
        &mut panels,
        "pull away",
        Some(Point::new(120.0, 120.0)),
        true,
    );
    tick(
        &mut machine,
        &mut panels,
        "keep pulling",
        Some(Point::new(200.0, 180.0)),
        true,
    );
    tick(
        &mut machine,
        &mut panels,
        "release",
        Some(Point::new(200.0, 180.0)),
        false,
    );
    println!("note is now at {}", card_origin(&panels, panel, note));
    println!();

    tick(
        &mut machine,
        &mut panels,
        "hover over the photo",
        Some(Point::new(270.0, 130.0)),
        false,
    );
    tick(
        &mut machine,
        &mut panels,
        "press",
        Some(Point::new(270.0, 130.0)),
        true,
    );
    tick(
        &mut machine,
        &mut panels,
        "pull away",
        Some(Point::new(330.0, 190.0)),
        true,
    );
    tick(
        &mut machine,
        &mut panels,
        "pointer leaves the panel mid-drag",
        None,
        true,
    );
    tick(&mut machine, &mut panels, "release", None, false);
    println!("photo is now at {}", card_origin(&panels, panel, photo));
}
