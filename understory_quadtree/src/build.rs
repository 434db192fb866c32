// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk construction of a tree from a shape snapshot.
//!
//! The index does not know about geometry. Callers describe their shapes through
//! [`IndexedShape`] and supply a [`BoundsCalculator`] that turns a shape into an
//! AABB, or `None` when the shape has no usable extent.

use alloc::vec::Vec;

use crate::config::IndexConfig;
use crate::quadtree::SpatialIndex;
use crate::types::{Aabb2D, Boundary, Entry};

/// The fields of a drawing shape the bulk builder reads.
pub trait IndexedShape {
    /// Identifier copied into the tree.
    type Id: Clone;

    /// Identifier of this shape.
    fn id(&self) -> Self::Id;

    /// Hidden shapes are never indexed.
    fn is_visible(&self) -> bool;

    /// Key compared against the builder's filter, typically the owning drawing.
    fn drawing_id(&self) -> &str;
}

/// Computes the world-space AABB of a shape.
///
/// Implementations must be pure. Returning `None` excludes the shape from the tree.
pub trait BoundsCalculator<S: ?Sized> {
    /// Minimal AABB enclosing `shape`, or `None` if it has no usable geometry.
    fn bounds(&self, shape: &S) -> Option<Aabb2D>;
}

impl<S: ?Sized, F> BoundsCalculator<S> for F
where
    F: Fn(&S) -> Option<Aabb2D>,
{
    fn bounds(&self, shape: &S) -> Option<Aabb2D> {
        self(shape)
    }
}

/// Entries for every visible shape of `filter_key` that has valid bounds, in input order.
fn qualifying_entries<S, B>(shapes: &[S], filter_key: &str, calculator: &B) -> Vec<Entry<S::Id>>
where
    S: IndexedShape,
    B: BoundsCalculator<S> + ?Sized,
{
    shapes
        .iter()
        .filter(|s| s.is_visible() && s.drawing_id() == filter_key)
        .filter_map(|s| {
            let bounds = calculator.bounds(s).filter(Aabb2D::is_valid)?;
            Some(Entry::new(s.id(), bounds))
        })
        .collect()
}

fn union_of<K>(entries: &[Entry<K>]) -> Option<Aabb2D> {
    let mut it = entries.iter().map(|e| e.bounds);
    let first = it.next()?;
    Some(it.fold(first, |acc, b| acc.union(&b)))
}

/// Union of the bounds of every shape that [`SpatialIndex::build_from_shapes`] would index.
///
/// Returns `None` when no shape qualifies. Useful for "zoom to fit".
pub fn shapes_extent<S, B>(shapes: &[S], filter_key: &str, calculator: &B) -> Option<Aabb2D>
where
    S: IndexedShape,
    B: BoundsCalculator<S> + ?Sized,
{
    union_of(&qualifying_entries(shapes, filter_key, calculator))
}

impl<K: Clone> SpatialIndex<K> {
    /// Build a tree from a shape snapshot using the default [`IndexConfig`].
    ///
    /// See [`build_from_shapes_with_config`](Self::build_from_shapes_with_config).
    pub fn build_from_shapes<S, B>(shapes: &[S], filter_key: &str, calculator: &B) -> Self
    where
        S: IndexedShape<Id = K>,
        B: BoundsCalculator<S> + ?Sized,
    {
        Self::build_from_shapes_with_config(shapes, filter_key, calculator, IndexConfig::default())
    }

    /// Build a tree from a shape snapshot.
    ///
    /// Only visible shapes whose [`drawing_id`](IndexedShape::drawing_id) equals
    /// `filter_key` are considered. Shapes without bounds (or with NaN/inverted
    /// bounds) are skipped. The root covers the union of the remaining bounds
    /// grown by `config.padding`; with nothing to index it is centered on the
    /// origin with half extents `config.empty_half_extent`. Entries are inserted
    /// in input order.
    pub fn build_from_shapes_with_config<S, B>(
        shapes: &[S],
        filter_key: &str,
        calculator: &B,
        config: IndexConfig,
    ) -> Self
    where
        S: IndexedShape<Id = K>,
        B: BoundsCalculator<S> + ?Sized,
    {
        let entries = qualifying_entries(shapes, filter_key, calculator);
        let boundary = match union_of(&entries) {
            Some(extent) => Boundary::from_aabb(&extent.inflate(config.padding)),
            None => Boundary::new(
                0.0,
                0.0,
                config.empty_half_extent,
                config.empty_half_extent,
            ),
        };

        let indexed = entries.len();
        let mut tree = Self::with_config(boundary, config);
        for entry in entries {
            tree.insert(entry);
        }

        tracing::debug!(
            filter_key,
            considered = shapes.len(),
            indexed,
            skipped = shapes.len() - indexed,
            center_x = boundary.center_x,
            center_y = boundary.center_y,
            half_width = boundary.half_width,
            half_height = boundary.half_height,
            "built spatial index"
        );
        tree
    }
}
