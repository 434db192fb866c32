// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The quadtree node: insertion, subdivision and point/region queries.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::{IndexConfig, MAX_SUPPORTED_DEPTH};
use crate::types::{Aabb2D, Boundary, Entry, Quadrant};

/// Adaptive quadtree over AABBs.
///
/// Every node owns its boundary, the entries pushed directly into it and, once
/// divided, its four children. The root is just the node at depth `0`.
///
/// ## Insertion
///
/// A node keeps entries in its own list until it holds `max_capacity` of them.
/// The next overlapping entry divides the node and is offered to all four
/// children; an entry straddling a split line is stored once per quadrant it
/// overlaps. Entries already held by a node stay there after it divides.
/// Nodes at `max_depth` never divide and take any number of entries.
///
/// ## Queries
///
/// [`query`](Self::query) and [`query_point`](Self::query_point) return every
/// stored copy whose bounds overlap the query box, so an entry duplicated across
/// quadrants can be reported more than once when the query box also straddles
/// the split. Results are not ordered. Callers that need each id once should
/// deduplicate, for example with [`dedup_by_id`](crate::dedup_by_id).
///
/// ## Updates
///
/// There is no remove or move. Rebuild the tree when geometry changes (see
/// [`build_from_shapes`](Self::build_from_shapes)); a rebuild is `n` inserts of
/// expected `O(log n)` each.
pub struct SpatialIndex<K> {
    boundary: Boundary,
    config: IndexConfig,
    depth: u32,
    entries: Vec<Entry<K>>,
    children: Option<Box<[SpatialIndex<K>; 4]>>,
}

/// Shape of a tree, as reported by [`SpatialIndex::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of nodes, root included.
    pub nodes: usize,
    /// Stored entries over all nodes; duplicated entries count once per copy.
    pub stored_entries: usize,
    /// Depth of the deepest node.
    pub max_depth_reached: u32,
}

impl<K> SpatialIndex<K> {
    /// Create an empty root covering `boundary` with the default [`IndexConfig`].
    pub fn new(boundary: Boundary) -> Self {
        Self::with_config(boundary, IndexConfig::default())
    }

    /// Create an empty root covering `boundary`.
    ///
    /// The config is not validated. A `max_depth` above [`MAX_SUPPORTED_DEPTH`]
    /// behaves as [`MAX_SUPPORTED_DEPTH`], which bounds the recursion of
    /// [`insert`](Self::insert).
    pub fn with_config(boundary: Boundary, config: IndexConfig) -> Self {
        Self::node(boundary, config, 0)
    }

    fn node(boundary: Boundary, config: IndexConfig, depth: u32) -> Self {
        Self {
            boundary,
            config,
            depth,
            entries: Vec::new(),
            children: None,
        }
    }

    /// Region covered by this node.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Tuning parameters shared by the tree.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Depth of this node; the root is at `0`.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether this node has been split into quadrants.
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Entries stored directly in this node, excluding its children.
    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    /// One child of a divided node.
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children
            .as_ref()
            .map(|children| &children[quadrant.index()])
    }

    /// True if no entry is stored anywhere in this subtree.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
            && self
                .children
                .as_ref()
                .is_none_or(|children| children.iter().all(Self::is_empty))
    }

    /// Count nodes and stored entries in this subtree.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            nodes: 1,
            stored_entries: self.entries.len(),
            max_depth_reached: self.depth,
        };
        if let Some(children) = &self.children {
            for child in children.iter() {
                let c = child.stats();
                stats.nodes += c.nodes;
                stats.stored_entries += c.stored_entries;
                stats.max_depth_reached = stats.max_depth_reached.max(c.max_depth_reached);
            }
        }
        stats
    }

    /// Entries whose bounds overlap the square of half-extent `tolerance`
    /// centered on `(x, y)`.
    ///
    /// A tolerance of `0.0` is an exact point-in-box test. Bounds are inclusive.
    pub fn query_point(&self, x: f64, y: f64, tolerance: f64) -> Vec<&Entry<K>> {
        self.query(Aabb2D::around_point(x, y, tolerance))
    }

    /// Entries whose bounds overlap `area`.
    pub fn query(&self, area: Aabb2D) -> Vec<&Entry<K>> {
        let mut out = Vec::new();
        self.collect(&area, &mut out);
        out
    }

    fn collect<'a>(&'a self, area: &Aabb2D, out: &mut Vec<&'a Entry<K>>) {
        if !self.boundary.overlaps(area) {
            return;
        }
        out.extend(self.entries.iter().filter(|e| e.bounds.overlaps(area)));
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect(area, out);
            }
        }
    }

    /// Drop every entry and child, returning this node to its freshly created state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.children = None;
    }

    fn subdivide(&mut self) {
        let depth = self.depth + 1;
        let config = self.config;
        tracing::trace!(
            depth,
            center_x = self.boundary.center_x,
            center_y = self.boundary.center_y,
            "subdividing quadtree node"
        );
        let children = self
            .boundary
            .quadrants()
            .map(|boundary| Self::node(boundary, config, depth));
        self.children = Some(Box::new(children));
    }
}

impl<K: Clone> SpatialIndex<K> {
    /// Insert an entry.
    ///
    /// Returns `false` without storing anything when the entry's bounds do not
    /// overlap this node's boundary. Otherwise the entry is stored here or in
    /// every overlapping descendant and `true` is returned.
    pub fn insert(&mut self, entry: Entry<K>) -> bool {
        self.insert_shared(&entry)
    }

    fn insert_shared(&mut self, entry: &Entry<K>) -> bool {
        if !self.boundary.overlaps(&entry.bounds) {
            return false;
        }

        let depth_ceiling = self.config.max_depth.min(MAX_SUPPORTED_DEPTH);
        if self.entries.len() < self.config.max_capacity || self.depth >= depth_ceiling {
            self.entries.push(entry.clone());
            return true;
        }

        if self.children.is_none() {
            self.subdivide();
        }
        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                child.insert_shared(entry);
            }
        }
        true
    }
}

/// Keep the first hit for each id, preserving order.
///
/// Query results are small, so this is a linear scan per hit.
pub fn dedup_by_id<'a, K: PartialEq>(hits: &[&'a Entry<K>]) -> Vec<&'a Entry<K>> {
    let mut out: Vec<&'a Entry<K>> = Vec::with_capacity(hits.len());
    for &hit in hits {
        if !out.iter().any(|seen| seen.id == hit.id) {
            out.push(hit);
        }
    }
    out
}

impl<K> Debug for SpatialIndex<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("boundary", &self.boundary)
            .field("depth", &self.depth)
            .field("entries", &self.entries.len())
            .field("divided", &self.is_divided())
            .finish_non_exhaustive()
    }
}
