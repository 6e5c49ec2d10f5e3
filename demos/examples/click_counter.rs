// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click routing basics.
//!
//! Three buttons on one panel; a scripted pointer hovers, presses, and
//! releases, and the demo tallies which button each click landed on.
//!
//! Run:
//! - `cargo run -p trellis_demos --example click_counter`

use std::collections::HashMap;

use kurbo::{Point, Rect, Size};
use trellis_demos::{ScriptedBeam, label, narrate};
use trellis_element_tree::{Capabilities, LocalElement};
use trellis_interaction::{InteractionConfig, InteractionEvent, PointerFrame, PointerInteraction};
use trellis_panel::{PanelSet, SurfaceHit, SurfaceKey};

const PANEL: Size = Size::new(320.0, 200.0);

fn uv(pixel: Point) -> Point {
    Point::new(pixel.x / PANEL.width, 1.0 - pixel.y / PANEL.height)
}

fn main() {
    let mut panels = PanelSet::new();
    let panel = panels.spawn(PANEL);
    panels.bind_surface(panel, SurfaceKey(1));
    {
        let p = panels.panel_mut(panel).unwrap();
        let root = p.root();
        for (i, name) in ["red", "green", "blue"].into_iter().enumerate() {
            let x = 20.0 + 100.0 * (i as f64);
            p.tree_mut().insert(
                Some(root),
                LocalElement {
                    capabilities: Capabilities::SELECTABLE | Capabilities::CLICKABLE,
                    name: Some(name.to_owned()),
                    ..LocalElement::with_bounds(Rect::new(x, 70.0, x + 80.0, 130.0))
                },
            );
        }
    }

    let mut machine = PointerInteraction::new(InteractionConfig::default()).unwrap();
    let mut beam = ScriptedBeam::default();
    let mut events = Vec::new();
    let mut tally: HashMap<String, u32> = HashMap::new();

    // (what the pointer does, where it is in panel pixels, button held)
    let script: [(&str, Option<Point>, bool); 13] = [
        ("hover over red", Some(Point::new(60.0, 100.0)), false),
        ("press", Some(Point::new(60.0, 100.0)), true),
        ("release", Some(Point::new(60.0, 100.0)), false),
        ("hover over green", Some(Point::new(160.0, 100.0)), false),
        ("press", Some(Point::new(160.0, 100.0)), true),
        ("hold", Some(Point::new(160.0, 100.0)), true),
        ("release", Some(Point::new(160.0, 100.0)), false),
        ("hover over blue", Some(Point::new(260.0, 100.0)), false),
        ("press", Some(Point::new(260.0, 100.0)), true),
        ("release", Some(Point::new(260.0, 100.0)), false),
        ("press again", Some(Point::new(260.0, 100.0)), true),
        ("release", Some(Point::new(260.0, 100.0)), false),
        ("pointer leaves the panel", None, false),
    ];

    for (step, pixel, pressed) in script {
        println!("{step}");
        beam.hits.clear();
        if let Some(pixel) = pixel {
            beam.hits.push(SurfaceHit::new(SurfaceKey(1), 1.5, uv(pixel)));
        }
        events.clear();
        machine.tick(
            PointerFrame::mouse(Point::ORIGIN, pressed),
            &mut panels,
            &mut beam,
            &mut events,
        );
        narrate(&panels, &events);
        for event in &events {
            if let InteractionEvent::Clicked(target) = event {
                *tally.entry(label(&panels, *target)).or_default() += 1;
            }
        }
    }

    println!();
    for name in ["red", "green", "blue"] {
        let clicks = tally.get(name).copied().unwrap_or(0);
        println!("'{name}' was clicked {clicks} time(s)");
    }
}
