// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact picking and rubber-band selection on top of the box-level index.
//!
//! The quadtree answers "which boxes are near"; [`Picker`] narrows that to
//! "which shape is under the pointer" by measuring the distance to each
//! candidate's geometry.

use std::collections::HashMap;

use kurbo::{Point, Rect};
use understory_quadtree::{Entry, SpatialIndex, dedup_by_id};

use crate::bounds::rect_to_aabb;
use crate::shape::Shape;

/// Result of a point pick.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// Identifier of the picked shape.
    pub id: String,
    /// Distance from the pick point to the shape's geometry.
    pub distance: f64,
}

/// How a selection rectangle chooses shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// Shapes whose bounds lie entirely inside the rectangle.
    Window,
    /// Shapes whose bounds touch the rectangle.
    Crossing,
}

/// Picks shapes of one drawing using an index built from them.
///
/// Later shapes in the slice are drawn on top and win ties. Locked shapes are
/// never picked or selected.
pub struct Picker<'a> {
    index: &'a SpatialIndex<String>,
    shapes: HashMap<&'a str, (usize, &'a Shape)>,
}

impl core::fmt::Debug for Picker<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Picker")
            .field("shapes", &self.shapes.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Picker<'a> {
    /// Create a picker over `shapes`, which `index` must have been built from.
    pub fn new(index: &'a SpatialIndex<String>, shapes: &'a [Shape]) -> Self {
        let shapes = shapes
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), (i, s)))
            .collect();
        Self { index, shapes }
    }

    /// Unlocked shapes behind `hits`, once each, in shape-list order.
    fn candidates(&self, hits: &[&'a Entry<String>]) -> Vec<(usize, &'a Shape, &'a Entry<String>)> {
        let mut found: Vec<_> = dedup_by_id(hits)
            .into_iter()
            .filter_map(|entry| {
                let &(order, shape) = self.shapes.get(entry.id.as_str())?;
                (!shape.is_locked()).then_some((order, shape, entry))
            })
            .collect();
        found.sort_unstable_by_key(|&(order, ..)| order);
        found
    }

    /// Every pickable shape within `tolerance` of `point`, closest first.
    ///
    /// Equal distances list the topmost shape first.
    pub fn hits_at(&self, point: Point, tolerance: f64) -> Vec<Hit> {
        let raw = self.index.query_point(point.x, point.y, tolerance);
        let mut hits: Vec<(usize, Hit)> = self
            .candidates(&raw)
            .into_iter()
            .filter_map(|(order, shape, _)| {
                let distance = shape.geometry.distance_to(point)?;
                (distance <= tolerance).then(|| {
                    (
                        order,
                        Hit {
                            id: shape.id.clone(),
                            distance,
                        },
                    )
                })
            })
            .collect();
        hits.sort_by(|(ao, a), (bo, b)| a.distance.total_cmp(&b.distance).then(bo.cmp(ao)));
        hits.into_iter().map(|(_, hit)| hit).collect()
    }

    /// The closest pickable shape within `tolerance` of `point`.
    pub fn hit_test_point(&self, point: Point, tolerance: f64) -> Option<Hit> {
        self.hits_at(point, tolerance).into_iter().next()
    }

    /// Identifiers of the shapes chosen by a selection rectangle, in shape-list order.
    pub fn select_rect(&self, rect: Rect, mode: SelectionMode) -> Vec<String> {
        let area = rect_to_aabb(rect);
        let raw = self.index.query(area);
        self.candidates(&raw)
            .into_iter()
            .filter(|(_, _, entry)| match mode {
                SelectionMode::Window => area.contains(&entry.bounds),
                SelectionMode::Crossing => area.overlaps(&entry.bounds),
            })
            .map(|(_, shape, _)| shape.id.clone())
            .collect()
    }
}
