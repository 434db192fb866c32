// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drafting picking.
//!
//! Import shapes from front-end JSON, index one drawing, then pick and select.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example drafting_picking`

use kurbo::{Point, Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_drafting::{
    Geometry, KurboBounds, Picker, SelectionMode, Shape, ShapeFlags, import_records,
    parse_records,
};
use understory_quadtree::SpatialIndex;

const PAYLOAD: &str = r#"[
    {"shape_type": "line", "start": {"x": 0, "y": 0}, "end": {"x": 400, "y": 0}},
    {"shape_type": "line", "start": {"x": 400, "y": 0}, "end": {"x": 400, "y": 300}},
    {"shape_type": "circle", "center": {"x": 200, "y": 150}, "radius": 40},
    {"shape_type": "polyline", "points": [{"x": 50, "y": 250}, {"x": 120, "y": 200}, {"x": 190, "y": 260}]},
    {"shape_type": "hatch", "points": []}
]"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut shapes = import_records(parse_records(PAYLOAD)?, "ground");
    shapes.push(
        Shape::new(
            "grid-frame",
            "ground",
            Geometry::Rectangle {
                rect: Rect::new(-20.0, -20.0, 420.0, 320.0),
            },
        )
        .with_flags(ShapeFlags::VISIBLE | ShapeFlags::LOCKED),
    );
    shapes.push(Shape::new(
        "site-boundary",
        "site",
        Geometry::Line {
            start: Point::new(0.0, 0.0),
            end: Point::new(1000.0, 0.0),
        },
    ));
    info!(count = shapes.len(), "imported shapes");

    let index = SpatialIndex::build_from_shapes(&shapes, "ground", &KurboBounds);
    let picker = Picker::new(&index, &shapes);

    for point in [
        Point::new(240.0, 150.0),
        Point::new(200.0, 150.0),
        Point::new(398.0, 100.0),
    ] {
        match picker.hit_test_point(point, 3.0) {
            Some(hit) => info!(x = point.x, y = point.y, id = %hit.id, distance = hit.distance, "hit"),
            None => info!(x = point.x, y = point.y, "nothing under pointer"),
        }
    }

    let area = Rect::new(100.0, 50.0, 300.0, 280.0);
    let window = picker.select_rect(area, SelectionMode::Window);
    let crossing = picker.select_rect(area, SelectionMode::Crossing);
    info!(?window, ?crossing, "selection");
    Ok(())
}
