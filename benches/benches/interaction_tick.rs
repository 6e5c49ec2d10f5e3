// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the per-frame cost of the pointer state machine.
//!
//! Each panel carries an 8x8 grid of selectable cells; the scripted
//! raycaster sweeps the pointer across cell centers so ticks continuously
//! select, click, and drag rather than settling into a steady state.

use core::time::Duration;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use trellis_element_tree::{Capabilities, LocalElement};
use trellis_interaction::{
    InteractionConfig, InteractionEvent, PointerFrame, PointerInteraction, SceneRaycaster,
};
use trellis_panel::{PanelSet, RayHitBuffer, SurfaceHit, SurfaceKey};

const PANEL_SIZE: Size = Size::new(512.0, 512.0);

/// Pushes every panel surface each frame, sweeping the UV across a fixed
/// cycle of spots.
struct SweepingBeam {
    panels: usize,
    spots: Vec<Point>,
    frame: usize,
}

impl SceneRaycaster for SweepingBeam {
    fn cast(&mut self, _pointer: Point, _max_distance: f64, out: &mut RayHitBuffer) {
        let uv = self.spots[self.frame % self.spots.len()];
        self.frame += 1;
        for i in 0..self.panels {
            out.push(SurfaceHit::new(SurfaceKey(i as u64 + 1), 1.0 + i as f64, uv));
        }
    }
}

fn build_panels(count: usize) -> PanelSet {
    let mut panels = PanelSet::new();
    for i in 0..count {
        let id = panels.spawn(PANEL_SIZE);
        panels.bind_surface(id, SurfaceKey(i as u64 + 1));
        let panel = panels
            .panel_mut(id)
            .unwrap_or_else(|| panic!("panel {i} not alive after spawn"));
        let root = panel.root();
        for row in 0..8 {
            for col in 0..8 {
                let x = 64.0 * f64::from(col);
                let y = 64.0 * f64::from(row);
                let _cell = panel.tree_mut().insert(
                    Some(root),
                    LocalElement {
                        capabilities: Capabilities::SELECTABLE
                            | Capabilities::CLICKABLE
                            | Capabilities::DRAGGABLE,
                        ..LocalElement::with_bounds(Rect::new(x, y, x + 60.0, y + 60.0))
                    },
                );
            }
        }
    }
    panels
}

/// Cell-center UVs walked corner to corner.
fn sweep_spots() -> Vec<Point> {
    let mut out = Vec::new();
    for i in 0..8 {
        let t = (f64::from(i) * 64.0 + 30.0) / 512.0;
        out.push(Point::new(t, 1.0 - t));
    }
    out
}

/// Eight-frame input cycle: hover, press, hold-and-drag, release.
fn frame_script() -> Vec<PointerFrame> {
    let mut out = Vec::new();
    for i in 0..8 {
        out.push(PointerFrame::mouse(Point::ORIGIN, (2..6).contains(&i)));
    }
    out
}

fn bench_tick(c: &mut Criterion) {
    let mut g = c.benchmark_group("interaction/tick");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    for panel_count in [1usize, 8] {
        let mut panels = build_panels(panel_count);
        let mut beam = SweepingBeam {
            panels: panel_count,
            spots: sweep_spots(),
            frame: 0,
        };
        let frames = frame_script();
        let mut machine = PointerInteraction::new(InteractionConfig::default())
            .unwrap_or_else(|e| panic!("default config rejected: {e}"));
        let mut events: Vec<InteractionEvent> = Vec::new();
        let mut i = 0usize;

        g.bench_with_input(
            BenchmarkId::new("sweep", panel_count),
            &panel_count,
            |b, _| {
                b.iter(|| {
                    events.clear();
                    let frame = frames[i % frames.len()];
                    i += 1;
                    machine.tick(black_box(frame), &mut panels, &mut beam, &mut events);
                    black_box(events.len());
                });
            },
        );
    }

    // Floor: a frame whose ray hits nothing at all.
    {
        let mut panels = build_panels(1);
        let mut beam = SweepingBeam {
            panels: 0,
            spots: vec![Point::ORIGIN],
            frame: 0,
        };
        let mut machine = PointerInteraction::new(InteractionConfig::default())
            .unwrap_or_else(|e| panic!("default config rejected: {e}"));
        let mut events: Vec<InteractionEvent> = Vec::new();

        g.bench_function("miss", |b| {
            b.iter(|| {
                events.clear();
                machine.tick(
                    black_box(PointerFrame::mouse(Point::ORIGIN, false)),
                    &mut panels,
                    &mut beam,
                    &mut events,
                );
                black_box(events.len());
            });
        });
    }

    g.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
