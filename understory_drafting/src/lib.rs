// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drafting: kurbo-backed drawing shapes on top of the quadtree index.
//!
//! This crate supplies what [`understory_quadtree`] leaves to its callers:
//!
//! - [`Shape`] and [`Geometry`]: lines, circles, arcs, polylines, rectangles and walls.
//! - [`KurboBounds`]: the [`BoundsCalculator`](understory_quadtree::BoundsCalculator)
//!   used to build an index from shapes.
//! - [`Picker`]: exact point picking and window/crossing selection.
//! - [`interchange`]: the flat JSON shape records used by the drawing front end.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_drafting::{Geometry, KurboBounds, Picker, SelectionMode, Shape};
//! use understory_quadtree::SpatialIndex;
//!
//! let shapes = vec![
//!     Shape::new("wall-1", "ground", Geometry::Wall {
//!         start: Point::new(0.0, 0.0),
//!         end: Point::new(500.0, 0.0),
//!         thickness: 20.0,
//!     }),
//!     Shape::new("door", "ground", Geometry::Arc {
//!         center: Point::new(100.0, 10.0),
//!         radius: 80.0,
//!         start_angle: 0.0,
//!         sweep_angle: std::f64::consts::FRAC_PI_2,
//!     }),
//! ];
//!
//! let index = SpatialIndex::build_from_shapes(&shapes, "ground", &KurboBounds);
//! let picker = Picker::new(&index, &shapes);
//!
//! let hit = picker.hit_test_point(Point::new(250.0, 5.0), 2.0).unwrap();
//! assert_eq!(hit.id, "wall-1");
//!
//! let selected = picker.select_rect(Rect::new(90.0, 0.0, 200.0, 100.0), SelectionMode::Window);
//! assert_eq!(selected, ["door"]);
//! ```

pub mod bounds;
pub mod interchange;
pub mod pick;
pub mod shape;

pub use bounds::{KurboBounds, aabb_to_rect, rect_to_aabb};
pub use interchange::{
    InterchangeError, PointRecord, ShapeRecord, import_records, parse_records, records_to_json,
};
pub use pick::{Hit, Picker, SelectionMode};
pub use shape::{Geometry, Shape, ShapeFlags};
