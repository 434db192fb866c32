// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat JSON shape records exchanged with the drawing front end.
//!
//! A record carries a `shape_type` tag and optional fields, only some of which
//! apply to each type:
//!
//! ```json
//! [
//!   { "shape_type": "line", "start": { "x": 0, "y": 0 }, "end": { "x": 10, "y": 0 } },
//!   { "shape_type": "circle", "center": { "x": 5, "y": 5 }, "radius": 2 },
//!   { "shape_type": "polyline", "points": [{ "x": 0, "y": 0 }, { "x": 1, "y": 1 }] }
//! ]
//! ```
//!
//! Only lines, circles and polylines travel through this format.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::shape::{Geometry, Shape};

/// Errors produced while reading or converting shape records.
#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    /// The payload is not valid JSON for a list of records.
    #[error("invalid shape JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A record lacks a field its type requires.
    #[error("{shape_type} record is missing `{field}`")]
    MissingField {
        /// Type tag of the offending record.
        shape_type: String,
        /// Name of the absent field.
        field: &'static str,
    },
    /// The record's type tag is not understood.
    #[error("unsupported shape type `{0}`")]
    UnsupportedType(String),
}

/// A point as it appears in a record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl From<Point> for PointRecord {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point {
    fn from(p: PointRecord) -> Self {
        Self::new(p.x, p.y)
    }
}

/// One shape in the flat interchange format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// `"line"`, `"circle"` or `"polyline"`.
    pub shape_type: String,
    /// Line start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<PointRecord>,
    /// Line end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<PointRecord>,
    /// Circle center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<PointRecord>,
    /// Circle radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Polyline vertices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<PointRecord>>,
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<ShapeRecord>, InterchangeError> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize records as a JSON array.
pub fn records_to_json(records: &[ShapeRecord]) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string(records)?)
}

impl ShapeRecord {
    fn require<T>(&self, value: Option<T>, field: &'static str) -> Result<T, InterchangeError> {
        value.ok_or_else(|| InterchangeError::MissingField {
            shape_type: self.shape_type.clone(),
            field,
        })
    }

    /// Convert into a visible [`Shape`] owned by `drawing_id`.
    ///
    /// A polyline of four or more points whose last point repeats the first
    /// becomes a closed polyline without the repeated point.
    pub fn into_shape(
        self,
        id: impl Into<String>,
        drawing_id: impl Into<String>,
    ) -> Result<Shape, InterchangeError> {
        let geometry = match self.shape_type.as_str() {
            "line" => Geometry::Line {
                start: self.require(self.start, "start")?.into(),
                end: self.require(self.end, "end")?.into(),
            },
            "circle" => Geometry::Circle {
                center: self.require(self.center, "center")?.into(),
                radius: self.require(self.radius, "radius")?,
            },
            "polyline" => {
                let mut points: Vec<Point> = self
                    .require(self.points.as_ref(), "points")?
                    .iter()
                    .copied()
                    .map(Point::from)
                    .collect();
                // A ring written by `from_shape` repeats its first vertex.
                let closed = points.len() >= 4 && points.first() == points.last();
                if closed {
                    points.pop();
                }
                Geometry::Polyline { points, closed }
            }
            other => return Err(InterchangeError::UnsupportedType(other.to_owned())),
        };
        Ok(Shape::new(id, drawing_id, geometry))
    }

    /// Record for `shape`, or `None` when the format cannot express its geometry.
    ///
    /// Closed polylines and rectangles are written as polylines that repeat the
    /// first vertex at the end.
    pub fn from_shape(shape: &Shape) -> Option<Self> {
        let record = match &shape.geometry {
            Geometry::Line { start, end } => Self {
                shape_type: "line".into(),
                start: Some((*start).into()),
                end: Some((*end).into()),
                ..Self::default()
            },
            Geometry::Circle { center, radius } => Self {
                shape_type: "circle".into(),
                center: Some((*center).into()),
                radius: Some(*radius),
                ..Self::default()
            },
            Geometry::Polyline { points, closed } => {
                let mut out: Vec<PointRecord> = points.iter().copied().map(Into::into).collect();
                if *closed && let Some(first) = out.first().copied() {
                    out.push(first);
                }
                Self::polyline(out)
            }
            Geometry::Rectangle { rect } => {
                let r = rect.abs();
                Self::polyline(
                    [
                        (r.x0, r.y0),
                        (r.x1, r.y0),
                        (r.x1, r.y1),
                        (r.x0, r.y1),
                        (r.x0, r.y0),
                    ]
                    .map(|(x, y)| PointRecord { x, y })
                    .to_vec(),
                )
            }
            Geometry::Arc { .. } | Geometry::Wall { .. } => return None,
        };
        Some(record)
    }

    fn polyline(points: Vec<PointRecord>) -> Self {
        Self {
            shape_type: "polyline".into(),
            points: Some(points),
            ..Self::default()
        }
    }
}

/// Convert records into shapes of `drawing_id`, numbering them `"<drawing>-<n>"`.
///
/// `n` is the record's position in `records`. Records that cannot be converted
/// are logged and skipped.
pub fn import_records(records: Vec<ShapeRecord>, drawing_id: &str) -> Vec<Shape> {
    let total = records.len();
    let shapes: Vec<Shape> = records
        .into_iter()
        .enumerate()
        .filter_map(|(n, record)| {
            match record.into_shape(format!("{drawing_id}-{n}"), drawing_id) {
                Ok(shape) => Some(shape),
                Err(error) => {
                    tracing::warn!(drawing_id, index = n, %error, "skipping shape record");
                    None
                }
            }
        })
        .collect();
    tracing::debug!(drawing_id, total, imported = shapes.len(), "imported shape records");
    shapes
}
