// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_drafting::{Geometry, KurboBounds, Picker, SelectionMode, Shape};
use understory_quadtree::SpatialIndex;

/// A floor plan of `n * n` rooms: four walls each plus a door arc.
fn floor_plan(n: usize, room: f64) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(n * n * 5);
    for row in 0..n {
        for col in 0..n {
            let x = col as f64 * room;
            let y = row as f64 * room;
            let corners = [
                Point::new(x, y),
                Point::new(x + room, y),
                Point::new(x + room, y + room),
                Point::new(x, y + room),
            ];
            for k in 0..4 {
                shapes.push(Shape::new(
                    format!("w{row}-{col}-{k}"),
                    "plan",
                    Geometry::Wall {
                        start: corners[k],
                        end: corners[(k + 1) % 4],
                        thickness: 15.0,
                    },
                ));
            }
            shapes.push(Shape::new(
                format!("d{row}-{col}"),
                "plan",
                Geometry::Arc {
                    center: Point::new(x + room * 0.25, y),
                    radius: room * 0.2,
                    start_angle: 0.0,
                    sweep_angle: std::f64::consts::FRAC_PI_2,
                },
            ));
        }
    }
    shapes
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_from_shapes");
    for &n in &[10usize, 20] {
        let shapes = floor_plan(n, 400.0);
        group.throughput(Throughput::Elements(shapes.len() as u64));
        group.bench_function(format!("floor_plan_{}", shapes.len()), |b| {
            b.iter(|| {
                black_box(SpatialIndex::build_from_shapes(&shapes, "plan", &KurboBounds).stats())
            })
        });
    }
    group.finish();
}

fn bench_pick(c: &mut Criterion) {
    let shapes = floor_plan(15, 400.0);
    let index = SpatialIndex::build_from_shapes(&shapes, "plan", &KurboBounds);
    let picker = Picker::new(&index, &shapes);

    let mut group = c.benchmark_group("pick");
    group.bench_function("hit_test_on_wall", |b| {
        b.iter(|| black_box(picker.hit_test_point(Point::new(2000.0, 2003.0), 5.0)))
    });
    group.bench_function("hit_test_in_room", |b| {
        b.iter(|| black_box(picker.hit_test_point(Point::new(2200.0, 2200.0), 5.0)))
    });
    group.bench_function("window_select", |b| {
        b.iter(|| {
            black_box(
                picker
                    .select_rect(Rect::new(1000.0, 1000.0, 3000.0, 3000.0), SelectionMode::Window)
                    .len(),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_pick);
criterion_main!(benches);
