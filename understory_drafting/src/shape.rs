// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing shapes: identity, flags and kurbo geometry.

use core::f64::consts::TAU;

use bitflags::bitflags;
use kurbo::{BezPath, Circle, Line, ParamCurveNearest, Point, Rect, Shape as _, Vec2};
use serde::{Deserialize, Serialize};
use understory_quadtree::IndexedShape;

/// Flattening tolerance for curved outlines, in world units.
const OUTLINE_TOLERANCE: f64 = 0.01;

/// Accuracy passed to kurbo's nearest-point solver.
const NEAREST_ACCURACY: f64 = 1e-9;

bitflags! {
    /// Per-shape state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ShapeFlags: u8 {
        /// Shape is drawn and indexed.
        const VISIBLE = 0b0000_0001;
        /// Shape is drawn but cannot be picked or selected.
        const LOCKED  = 0b0000_0010;
    }
}

impl Default for ShapeFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Geometry of a drawing entity, in world units.
///
/// Angles are in radians; y grows downward as on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Straight segment.
    Line {
        /// First endpoint.
        start: Point,
        /// Second endpoint.
        end: Point,
    },
    /// Full circle outline.
    Circle {
        /// Center.
        center: Point,
        /// Radius, non-negative.
        radius: f64,
    },
    /// Circular arc from `start_angle` sweeping by `sweep_angle`.
    Arc {
        /// Center.
        center: Point,
        /// Radius, non-negative.
        radius: f64,
        /// Start angle.
        start_angle: f64,
        /// Signed sweep.
        sweep_angle: f64,
    },
    /// Connected straight segments, optionally closed into a filled ring.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Whether the last vertex connects back to the first.
        closed: bool,
    },
    /// Axis-aligned rectangle.
    Rectangle {
        /// Corners; need not be normalized.
        rect: Rect,
    },
    /// Straight wall: the segment swept sideways by half the thickness on each side.
    Wall {
        /// Start of the wall's center line.
        start: Point,
        /// End of the wall's center line.
        end: Point,
        /// Full thickness, non-negative.
        thickness: f64,
    },
}

fn finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn rect_around(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut it = points.into_iter();
    let first = it.next()?;
    Some(it.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

fn closed_ring(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Corners of a wall's footprint, or `None` for a zero-length wall.
fn wall_corners(start: Point, end: Point, thickness: f64) -> Option<[Point; 4]> {
    let dir = end - start;
    let len = dir.hypot();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    let offset = Vec2::new(-dir.y, dir.x) * (0.5 * thickness / len);
    Some([start + offset, end + offset, end - offset, start - offset])
}

impl Geometry {
    /// True when every coordinate is finite and sizes are non-negative.
    ///
    /// Empty polylines and zero-length walls are not well formed.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Line { start, end } => finite(*start) && finite(*end),
            Self::Circle { center, radius } => finite(*center) && non_negative(*radius),
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
            } => {
                finite(*center)
                    && non_negative(*radius)
                    && start_angle.is_finite()
                    && sweep_angle.is_finite()
            }
            Self::Polyline { points, .. } => !points.is_empty() && points.iter().all(|p| finite(*p)),
            Self::Rectangle { rect } => {
                rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
            }
            Self::Wall {
                start,
                end,
                thickness,
            } => finite(*start) && finite(*end) && non_negative(*thickness) && start != end,
        }
    }

    /// Whether the interior counts as part of the shape for picking.
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Polyline { points, closed } => *closed && points.len() >= 3,
            Self::Rectangle { .. } | Self::Wall { .. } => true,
            Self::Line { .. } | Self::Circle { .. } | Self::Arc { .. } => false,
        }
    }

    /// kurbo arc for the geometry; sweeps past a full turn trace the same circle.
    fn kurbo_arc(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> kurbo::Arc {
        kurbo::Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: sweep_angle.clamp(-TAU, TAU),
            x_rotation: 0.0,
        }
    }

    /// Minimal axis-aligned rectangle enclosing the geometry.
    ///
    /// Returns `None` for geometry that is not [well formed](Self::is_well_formed).
    pub fn bounding_rect(&self) -> Option<Rect> {
        if !self.is_well_formed() {
            return None;
        }
        let rect = match self {
            Self::Line { start, end } => Line::new(*start, *end).bounding_box(),
            Self::Circle { center, radius } => Circle::new(*center, *radius).bounding_box(),
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
            } => Self::kurbo_arc(*center, *radius, *start_angle, *sweep_angle).bounding_box(),
            Self::Polyline { points, .. } => rect_around(points.iter().copied())?,
            Self::Rectangle { rect } => rect.abs(),
            Self::Wall {
                start,
                end,
                thickness,
            } => rect_around(wall_corners(*start, *end, *thickness)?)?,
        };
        Some(rect)
    }

    /// Outline as a path, with curves flattened to within a hundredth of a unit.
    ///
    /// Filled geometry produces a closed path. A single-point polyline yields a
    /// path with no segments.
    pub fn to_path(&self) -> Option<BezPath> {
        if !self.is_well_formed() {
            return None;
        }
        let path = match self {
            Self::Line { start, end } => Line::new(*start, *end).to_path(OUTLINE_TOLERANCE),
            Self::Circle { center, radius } => {
                Circle::new(*center, *radius).to_path(OUTLINE_TOLERANCE)
            }
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
            } => Self::kurbo_arc(*center, *radius, *start_angle, *sweep_angle)
                .to_path(OUTLINE_TOLERANCE),
            Self::Polyline { points, closed } => {
                if *closed {
                    closed_ring(points)
                } else {
                    let mut path = BezPath::new();
                    if let Some((first, rest)) = points.split_first() {
                        path.move_to(*first);
                        for p in rest {
                            path.line_to(*p);
                        }
                    }
                    path
                }
            }
            Self::Rectangle { rect } => rect.abs().to_path(OUTLINE_TOLERANCE),
            Self::Wall {
                start,
                end,
                thickness,
            } => closed_ring(&wall_corners(*start, *end, *thickness)?),
        };
        Some(path)
    }

    /// Distance from `point` to the geometry.
    ///
    /// Points inside [filled](Self::is_filled) geometry are at distance `0`.
    pub fn distance_to(&self, point: Point) -> Option<f64> {
        match self {
            Self::Circle { center, radius } if self.is_well_formed() => {
                return Some((center.distance(point) - radius).abs());
            }
            Self::Polyline { points, .. } if points.len() == 1 && self.is_well_formed() => {
                return Some(points[0].distance(point));
            }
            _ => {}
        }

        let path = self.to_path()?;
        if self.is_filled() && path.contains(point) {
            return Some(0.0);
        }
        path.segments()
            .map(|seg| seg.nearest(point, NEAREST_ACCURACY).distance_sq)
            .reduce(f64::min)
            .map(f64::sqrt)
    }
}

/// One entity of a drawing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier within the project.
    pub id: String,
    /// Drawing (sheet) the shape belongs to.
    pub drawing_id: String,
    /// Visibility and lock state.
    #[serde(default)]
    pub flags: ShapeFlags,
    /// World-space geometry.
    pub geometry: Geometry,
}

impl Shape {
    /// Create a visible, unlocked shape.
    pub fn new(id: impl Into<String>, drawing_id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            drawing_id: drawing_id.into(),
            flags: ShapeFlags::default(),
            geometry,
        }
    }

    /// Replace the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ShapeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether the shape can be picked or selected.
    pub fn is_locked(&self) -> bool {
        self.flags.contains(ShapeFlags::LOCKED)
    }
}

impl IndexedShape for Shape {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn is_visible(&self) -> bool {
        self.flags.contains(ShapeFlags::VISIBLE)
    }

    fn drawing_id(&self) -> &str {
        &self.drawing_id
    }
}
