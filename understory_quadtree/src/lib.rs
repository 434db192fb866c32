// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Quadtree: an adaptive quadtree over 2D AABBs for hit-testing.
//!
//! Understory Quadtree answers "what is near this point" and "what touches this
//! region" against thousands of drawing entities fast enough to run on every
//! pointer move of an editor or CAD canvas.
//!
//! - Insert identifiers with axis-aligned bounding boxes (AABBs).
//! - Query by point with a tolerance radius, or by rectangle.
//! - Build a whole tree from a shape snapshot with [`SpatialIndex::build_from_shapes`].
//!
//! The tree is built once, queried many times, and rebuilt when geometry changes.
//! There is no remove or move; a rebuild costs `n` inserts of expected `O(log n)`
//! each, so callers decide how aggressively to debounce it.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, Boundary, Entry, SpatialIndex};
//!
//! // A 1000×1000 canvas.
//! let mut tree = SpatialIndex::new(Boundary::new(500.0, 500.0, 500.0, 500.0));
//! tree.insert(Entry::new("a", Aabb2D::new(10.0, 10.0, 50.0, 50.0)));
//! tree.insert(Entry::new("b", Aabb2D::new(200.0, 200.0, 300.0, 300.0)));
//!
//! // Exact point test.
//! let hits = tree.query_point(30.0, 30.0, 0.0);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, "a");
//!
//! // A little tolerance for an imprecise pointer.
//! assert_eq!(tree.query_point(52.0, 30.0, 3.0).len(), 1);
//!
//! // Rubber-band region.
//! assert_eq!(tree.query(Aabb2D::new(0.0, 0.0, 250.0, 250.0)).len(), 2);
//! ```
//!
//! ## Building from shapes
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, IndexedShape, SpatialIndex};
//!
//! struct Rect {
//!     id: u32,
//!     layer: &'static str,
//!     visible: bool,
//!     bounds: Aabb2D,
//! }
//!
//! impl IndexedShape for Rect {
//!     type Id = u32;
//!     fn id(&self) -> u32 { self.id }
//!     fn is_visible(&self) -> bool { self.visible }
//!     fn drawing_id(&self) -> &str { self.layer }
//! }
//!
//! let shapes = [
//!     Rect { id: 1, layer: "plan", visible: true, bounds: Aabb2D::new(0.0, 0.0, 10.0, 10.0) },
//!     Rect { id: 2, layer: "plan", visible: false, bounds: Aabb2D::new(0.0, 0.0, 10.0, 10.0) },
//!     Rect { id: 3, layer: "site", visible: true, bounds: Aabb2D::new(0.0, 0.0, 10.0, 10.0) },
//! ];
//!
//! let tree = SpatialIndex::build_from_shapes(&shapes, "plan", &|r: &Rect| Some(r.bounds));
//! let hits = tree.query_point(5.0, 5.0, 0.0);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, 1);
//! ```
//!
//! ## Duplicate hits
//!
//! An entry that straddles a split line is stored in every quadrant it overlaps,
//! and queries do not deduplicate. A query box that also straddles the split can
//! therefore report the same entry more than once. Use [`dedup_by_id`] when each
//! id is needed once.
//!
//! ## Tuning
//!
//! [`IndexConfig`] holds the capacity threshold, depth ceiling, root padding and
//! the extent of the empty fallback root. Nodes at the depth ceiling accept any
//! number of entries so insertion always terminates.
//!
//! ### Float semantics
//!
//! All overlap tests are inclusive on every edge. NaN coordinates never overlap
//! anything; the bulk builder skips shapes whose bounds are NaN or inverted.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod build;
pub mod config;
pub mod quadtree;
pub mod types;

pub use build::{BoundsCalculator, IndexedShape, shapes_extent};
pub use config::{ConfigError, IndexConfig, MAX_SUPPORTED_DEPTH};
pub use quadtree::{SpatialIndex, TreeStats, dedup_by_id};
pub use types::{Aabb2D, Boundary, Entry, Quadrant};
