// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: boxes, node boundaries, quadrants and entries.

/// Axis-aligned bounding box in 2D world units.
///
/// `min_x <= max_x` and `min_y <= max_y` are expected; zero-area boxes are valid.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2D {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (top)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (bottom)
    pub max_y: f64,
}

impl Aabb2D {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create an AABB from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Square box centered on a point with half-extent `tolerance`.
    ///
    /// A tolerance of `0.0` yields a zero-area box, i.e. an exact point test.
    pub const fn around_point(x: f64, y: f64, tolerance: f64) -> Self {
        Self {
            min_x: x - tolerance,
            min_y: y - tolerance,
            max_x: x + tolerance,
            max_y: y + tolerance,
        }
    }

    /// Whether two boxes overlap. Inclusive on all four edges, so boxes that only
    /// touch along an edge or at a corner overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Whether this box contains the point (inclusive).
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Whether `other` lies entirely inside this box (inclusive).
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_y <= other.min_y
            && other.max_y <= self.max_y
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow the box by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }

    /// True if every coordinate is finite and the box is not inverted.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }
}

/// The region covered by one quadtree node, stored as center and half extents.
///
/// Center form keeps subdivision symmetric: each quadrant halves the half extents
/// and offsets the center by the new half extents.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundary {
    /// Center x.
    pub center_x: f64,
    /// Center y.
    pub center_y: f64,
    /// Half of the width.
    pub half_width: f64,
    /// Half of the height.
    pub half_height: f64,
}

impl Boundary {
    /// Create a boundary from its center and half extents.
    pub const fn new(center_x: f64, center_y: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            center_x,
            center_y,
            half_width,
            half_height,
        }
    }

    /// Boundary covering exactly the given box.
    pub fn from_aabb(aabb: &Aabb2D) -> Self {
        let (center_x, center_y) = aabb.center();
        Self {
            center_x,
            center_y,
            half_width: 0.5 * aabb.width(),
            half_height: 0.5 * aabb.height(),
        }
    }

    /// The boundary as a min/max box.
    #[inline]
    pub fn to_aabb(&self) -> Aabb2D {
        Aabb2D {
            min_x: self.center_x - self.half_width,
            min_y: self.center_y - self.half_height,
            max_x: self.center_x + self.half_width,
            max_y: self.center_y + self.half_height,
        }
    }

    /// Whether `aabb` overlaps this boundary (inclusive on all edges).
    #[inline]
    pub fn overlaps(&self, aabb: &Aabb2D) -> bool {
        self.to_aabb().overlaps(aabb)
    }

    /// The boundary of one quadrant of this region.
    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let hw = 0.5 * self.half_width;
        let hh = 0.5 * self.half_height;
        let (dx, dy) = match quadrant {
            Quadrant::NorthWest => (-hw, -hh),
            Quadrant::NorthEast => (hw, -hh),
            Quadrant::SouthWest => (-hw, hh),
            Quadrant::SouthEast => (hw, hh),
        };
        Self::new(self.center_x + dx, self.center_y + dy, hw, hh)
    }

    /// All four quadrants, in [`Quadrant::ALL`] order.
    pub fn quadrants(&self) -> [Self; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }
}

/// One of the four children a node splits into.
///
/// North is the low-y half, matching canvas coordinates where y grows downward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Low x, low y.
    NorthWest,
    /// High x, low y.
    NorthEast,
    /// Low x, high y.
    SouthWest,
    /// High x, high y.
    SouthEast,
}

impl Quadrant {
    /// Every quadrant, in child storage order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::NorthWest => 0,
            Self::NorthEast => 1,
            Self::SouthWest => 2,
            Self::SouthEast => 3,
        }
    }
}

/// An identifier and the bounds it was indexed under.
///
/// The tree stores entries by value; it never refers back to the caller's shapes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<K> {
    /// Caller-assigned identifier. Not required to be unique.
    pub id: K,
    /// Bounds used for overlap tests.
    pub bounds: Aabb2D,
}

impl<K> Entry<K> {
    /// Create an entry.
    pub const fn new(id: K, bounds: Aabb2D) -> Self {
        Self { id, bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_inclusive_on_edges_and_corners() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb2D::new(10.0, 0.0, 20.0, 10.0)), "shared edge");
        assert!(a.overlaps(&Aabb2D::new(10.0, 10.0, 20.0, 20.0)), "shared corner");
        assert!(!a.overlaps(&Aabb2D::new(10.5, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Aabb2D::new(0.0, -5.0, 10.0, -0.1)));
    }

    #[test]
    fn zero_area_boxes_behave_as_points() {
        let p = Aabb2D::around_point(5.0, 5.0, 0.0);
        assert_eq!(p.width(), 0.0);
        assert!(Aabb2D::new(0.0, 0.0, 5.0, 5.0).overlaps(&p));
        assert!(!Aabb2D::new(0.0, 0.0, 4.9, 5.0).overlaps(&p));
    }

    #[test]
    fn nan_never_overlaps() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        let n = Aabb2D::new(f64::NAN, 0.0, 1.0, 1.0);
        assert!(!a.overlaps(&n));
        assert!(!n.is_valid());
        assert!(!Aabb2D::new(2.0, 0.0, 1.0, 1.0).is_valid(), "inverted box");
    }

    #[test]
    fn union_inflate_and_contains() {
        let u = Aabb2D::new(0.0, 0.0, 1.0, 1.0).union(&Aabb2D::new(5.0, -2.0, 6.0, 0.5));
        assert_eq!(u, Aabb2D::new(0.0, -2.0, 6.0, 1.0));
        let big = u.inflate(1.0);
        assert_eq!(big, Aabb2D::new(-1.0, -3.0, 7.0, 2.0));
        assert!(big.contains(&u));
        assert!(!u.contains(&big));
    }

    #[test]
    fn boundary_round_trips_through_aabb() {
        let b = Boundary::new(500.0, 500.0, 500.0, 250.0);
        assert_eq!(b.to_aabb(), Aabb2D::new(0.0, 250.0, 1000.0, 750.0));
        assert_eq!(Boundary::from_aabb(&b.to_aabb()), b);
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let b = Boundary::new(0.0, 0.0, 8.0, 4.0);
        let [nw, ne, sw, se] = b.quadrants();
        assert_eq!(nw.to_aabb(), Aabb2D::new(-8.0, -4.0, 0.0, 0.0));
        assert_eq!(ne.to_aabb(), Aabb2D::new(0.0, -4.0, 8.0, 0.0));
        assert_eq!(sw.to_aabb(), Aabb2D::new(-8.0, 0.0, 0.0, 4.0));
        assert_eq!(se.to_aabb(), Aabb2D::new(0.0, 0.0, 8.0, 4.0));
        for q in [nw, ne, sw, se] {
            assert!(b.to_aabb().contains(&q.to_aabb()));
            assert_eq!((q.half_width, q.half_height), (4.0, 2.0));
        }
    }
}
