// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning parameters for the quadtree and the bulk builder.

use thiserror::Error;

/// Deepest `max_depth` accepted by [`IndexConfig::validate`].
pub const MAX_SUPPORTED_DEPTH: u32 = 32;

/// Tuning parameters shared by every node of a tree.
///
/// The defaults (capacity 8, depth 10, padding 100, empty half extent 1000) suit
/// drawings with a few thousand entities. Trees never reject a config; call
/// [`validate`](Self::validate) on values read from outside the program.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndexConfig {
    /// Entries a node holds in its own list before it subdivides.
    pub max_capacity: usize,
    /// Depth at which nodes stop subdividing and accept any number of entries.
    pub max_depth: u32,
    /// Margin added around the union of shape bounds when building a root.
    pub padding: f64,
    /// Half extent of the origin-centered root used when no shape qualifies.
    pub empty_half_extent: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_capacity: 8,
            max_depth: 10,
            padding: 100.0,
            empty_half_extent: 1000.0,
        }
    }
}

impl IndexConfig {
    /// Set the capacity threshold.
    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set the depth ceiling.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the root padding used by the bulk builder.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the half extent of the fallback root.
    #[must_use]
    pub fn with_empty_half_extent(mut self, empty_half_extent: f64) -> Self {
        self.empty_half_extent = empty_half_extent;
        self
    }

    /// Check that the values describe a usable tree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.max_depth,
                max: MAX_SUPPORTED_DEPTH,
            });
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        if !self.empty_half_extent.is_finite() || self.empty_half_extent <= 0.0 {
            return Err(ConfigError::InvalidEmptyExtent(self.empty_half_extent));
        }
        Ok(())
    }
}

/// Reasons an [`IndexConfig`] is rejected by [`IndexConfig::validate`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A zero capacity would force every insert down to the depth ceiling.
    #[error("max_capacity must be at least 1")]
    ZeroCapacity,

    /// The depth ceiling is beyond what the tree supports.
    #[error("max_depth {depth} exceeds the supported maximum of {max}")]
    DepthTooLarge {
        /// Requested depth.
        depth: u32,
        /// Largest accepted depth.
        max: u32,
    },

    /// Padding must be finite and non-negative.
    #[error("padding must be finite and non-negative, got {0}")]
    InvalidPadding(f64),

    /// The fallback root must have a finite, positive extent.
    #[error("empty_half_extent must be finite and positive, got {0}")]
    InvalidEmptyExtent(f64),
}
