// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Insert a handful of boxes, watch the root subdivide, and run point and
//! region queries.
//!
//! Run:
//! - `cargo run -p understory_demos --example quadtree_basics`

use understory_quadtree::{Aabb2D, Boundary, Entry, Quadrant, SpatialIndex, dedup_by_id};

fn main() {
    // A 1000×1000 canvas centered at (500, 500)
    let mut tree = SpatialIndex::new(Boundary::new(500.0, 500.0, 500.0, 500.0));

    for i in 0..12_u32 {
        let x = f64::from(i % 4) * 200.0 + 50.0;
        let y = f64::from(i / 4) * 200.0 + 50.0;
        tree.insert(Entry::new(format!("box{i}"), Aabb2D::from_xywh(x, y, 80.0, 80.0)));
    }
    // A long beam across the middle lands in several quadrants
    tree.insert(Entry::new("beam".to_string(), Aabb2D::new(100.0, 490.0, 900.0, 510.0)));

    println!("stats: {:?}", tree.stats());
    for quadrant in Quadrant::ALL {
        if let Some(child) = tree.child(quadrant) {
            println!("{quadrant:?}: {} entries", child.entries().len());
        }
    }

    let hits = tree.query_point(90.0, 90.0, 0.0);
    println!("hits at (90, 90): {:?}", hits.iter().map(|e| &e.id).collect::<Vec<_>>());
    assert_eq!(hits.len(), 1);

    // Region across the center may see the beam more than once
    let area = Aabb2D::new(400.0, 400.0, 600.0, 600.0);
    let raw = tree.query(area);
    let unique = dedup_by_id(&raw);
    println!("region: {} raw hits, {} unique", raw.len(), unique.len());
    assert!(unique.iter().any(|e| e.id == "beam"));
}
