// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for element tree picking.
//!
//! The synthetic tree approximates a widget-gallery panel: a header bar, a
//! sidebar of nav items, and a grid of cards with a few rotated outliers and
//! hidden subtrees.

use core::time::Duration;
use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Affine, Point, Rect};
use trellis_element_tree::{
    Capabilities, ElementFlags, ElementId, ElementTree, LocalElement, PickMode,
};

fn insert(
    tree: &mut ElementTree,
    parent: ElementId,
    bounds: Rect,
    capabilities: Capabilities,
) -> ElementId {
    tree.insert(
        Some(parent),
        LocalElement {
            capabilities,
            ..LocalElement::with_bounds(bounds)
        },
    )
}

/// Gallery-shaped tree: ~540 elements, max depth 5.
fn build_gallery() -> (ElementTree, ElementId) {
    let mut tree = ElementTree::new();
    let root = tree.insert(
        None,
        LocalElement {
            pick_mode: PickMode::BoundsOnly,
            ..LocalElement::with_bounds(Rect::new(0.0, 0.0, 1280.0, 800.0))
        },
    );

    let _header = insert(
        &mut tree,
        root,
        Rect::new(0.0, 0.0, 1280.0, 60.0),
        Capabilities::empty(),
    );

    let sidebar = insert(
        &mut tree,
        root,
        Rect::new(0.0, 60.0, 220.0, 800.0),
        Capabilities::empty(),
    );
    for i in 0..12 {
        let y = 8.0 + 36.0 * f64::from(i);
        let _item = insert(
            &mut tree,
            sidebar,
            Rect::new(8.0, y, 212.0, y + 32.0),
            Capabilities::SELECTABLE | Capabilities::CLICKABLE,
        );
    }

    let content = tree.insert(
        Some(root),
        LocalElement {
            pick_mode: PickMode::BoundsOnly,
            ..LocalElement::with_bounds(Rect::new(220.0, 60.0, 1280.0, 800.0))
        },
    );

    let cell_w = 96.0;
    let cell_h = 64.0;
    for row in 0..10 {
        for col in 0..10 {
            let idx = row * 10 + col;
            let x = 8.0 + (cell_w + 4.0) * f64::from(col);
            let y = 8.0 + (cell_h + 4.0) * f64::from(row);

            let capabilities = if idx % 7 == 0 {
                Capabilities::SELECTABLE | Capabilities::DRAGGABLE
            } else if idx % 3 == 0 {
                Capabilities::SELECTABLE | Capabilities::CLICKABLE
            } else {
                Capabilities::empty()
            };
            // A few rotated cards and a few hidden ones.
            let local_transform = if idx % 23 == 0 {
                Affine::rotate(0.05)
            } else {
                Affine::IDENTITY
            };
            let flags = if idx % 31 == 0 {
                ElementFlags::empty()
            } else if idx % 13 == 0 {
                ElementFlags::DISPLAYED
            } else {
                ElementFlags::default()
            };

            let cell = tree.insert(
                Some(content),
                LocalElement {
                    local_transform,
                    flags,
                    capabilities,
                    ..LocalElement::with_bounds(Rect::new(x, y, x + cell_w, y + cell_h))
                },
            );

            let _bg = insert(
                &mut tree,
                cell,
                Rect::new(0.0, 0.0, cell_w, cell_h),
                Capabilities::empty(),
            );
            let _icon = insert(
                &mut tree,
                cell,
                Rect::new(8.0, 8.0, 40.0, 40.0),
                Capabilities::empty(),
            );
            let _label = insert(
                &mut tree,
                cell,
                Rect::new(8.0, cell_h - 24.0, cell_w - 8.0, cell_h - 8.0),
                Capabilities::SELECTABLE,
            );
        }
    }

    (tree, root)
}

/// A 64-deep chain of nested elements, each offset by (1, 1).
fn build_deep_chain() -> (ElementTree, ElementId) {
    let mut tree = ElementTree::new();
    let root = tree.insert(
        None,
        LocalElement::with_bounds(Rect::new(0.0, 0.0, 320.0, 320.0)),
    );
    let mut parent = root;
    for _ in 0..64 {
        parent = insert(
            &mut tree,
            parent,
            Rect::new(1.0, 1.0, 257.0, 257.0),
            Capabilities::SELECTABLE,
        );
    }
    (tree, root)
}

fn points() -> Vec<Point> {
    let mut out = Vec::new();
    for iy in 0..=8 {
        for ix in 0..=12 {
            out.push(Point::new(f64::from(ix) * 100.0, f64::from(iy) * 100.0));
        }
    }
    out.extend([
        Point::new(0.0, 0.0),
        Point::new(1279.0, 0.0),
        Point::new(0.0, 799.0),
        Point::new(1279.0, 799.0),
        Point::new(640.0, 400.0),
    ]);
    out
}

fn bench_pick(c: &mut Criterion) {
    let mut g = c.benchmark_group("element_tree/pick");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    let (gallery, gallery_root) = build_gallery();
    let pts = points();
    g.throughput(Throughput::Elements(pts.len() as u64));

    g.bench_with_input(
        BenchmarkId::new("pick", "gallery"),
        &gallery,
        |b, tree| {
            b.iter(|| {
                for &p in &pts {
                    black_box(tree.pick(gallery_root, black_box(p)));
                }
            });
        },
    );

    g.bench_with_input(
        BenchmarkId::new("pick_all", "gallery"),
        &gallery,
        |b, tree| {
            b.iter(|| {
                for &p in &pts {
                    black_box(tree.pick_all(gallery_root, black_box(p)));
                }
            });
        },
    );

    g.bench_with_input(
        BenchmarkId::new("pick_topmost_with", "gallery"),
        &gallery,
        |b, tree| {
            b.iter(|| {
                for &p in &pts {
                    black_box(tree.pick_topmost_with(
                        gallery_root,
                        black_box(p),
                        Capabilities::SELECTABLE,
                    ));
                }
            });
        },
    );

    g.finish();

    let mut g = c.benchmark_group("element_tree/pick_deep");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    let (chain, chain_root) = build_deep_chain();
    // Inside the deepest link of the chain.
    let deep_point = Point::new(100.0, 100.0);

    g.bench_with_input(
        BenchmarkId::new("pick", "chain_64"),
        &chain,
        |b, tree| {
            b.iter(|| black_box(tree.pick(chain_root, black_box(deep_point))));
        },
    );

    g.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut g = c.benchmark_group("element_tree/build");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    g.bench_function("gallery", |b| {
        b.iter_batched(
            || (),
            |()| black_box(build_gallery()),
            BatchSize::SmallInput,
        );
    });

    g.finish();
}

criterion_group!(benches, bench_pick, bench_build);
criterion_main!(benches);
