// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between kurbo rectangles and index AABBs.

use kurbo::Rect;
use understory_quadtree::{Aabb2D, BoundsCalculator};

use crate::shape::Shape;

/// Convert a kurbo rectangle to an index AABB, normalizing its corners.
pub fn rect_to_aabb(rect: Rect) -> Aabb2D {
    let r = rect.abs();
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Convert an index AABB back to a kurbo rectangle.
pub fn aabb_to_rect(aabb: Aabb2D) -> Rect {
    Rect::new(aabb.min_x, aabb.min_y, aabb.max_x, aabb.max_y)
}

/// Bounds of a [`Shape`] computed from its kurbo geometry.
///
/// Degenerate geometry yields `None` and is left out of the index.
#[derive(Clone, Copy, Debug, Default)]
pub struct KurboBounds;

impl BoundsCalculator<Shape> for KurboBounds {
    fn bounds(&self, shape: &Shape) -> Option<Aabb2D> {
        shape.geometry.bounding_rect().map(rect_to_aabb)
    }
}
