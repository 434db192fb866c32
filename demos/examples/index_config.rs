// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index configuration from TOML.
//!
//! Reads tuning parameters from the file named on the command line, or from
//! `quadtree.toml` in the current directory, falling back to the defaults.
//!
//! Run:
//! - `cargo run -p understory_demos --example index_config -- my_config.toml`

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Aabb2D, Boundary, Entry, IndexConfig, SpatialIndex};

fn load(path: &PathBuf) -> anyhow::Result<IndexConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let config: IndexConfig = toml::from_str(&contents)?;
        config.validate()?;
        info!(path = %path.display(), "loaded index config");
        Ok(config)
    } else {
        warn!(path = %path.display(), "no config file, using defaults");
        Ok(IndexConfig::default())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("quadtree.toml"), PathBuf::from);
    let config = load(&path)?;
    println!("{}", toml::to_string_pretty(&config)?);

    // Partial files keep the defaults for missing keys
    let partial: IndexConfig = toml::from_str("max_capacity = 4")?;
    assert_eq!(partial.max_depth, IndexConfig::default().max_depth);

    // Out-of-range values are rejected before they reach a tree
    let bad: IndexConfig = toml::from_str("max_capacity = 0")?;
    if let Err(err) = bad.validate() {
        warn!(%err, "rejected config");
    }

    let boundary = Boundary::new(0.0, 0.0, 512.0, 512.0);
    let mut tree = SpatialIndex::with_config(boundary, config);
    for i in 0..256_u32 {
        let x = f64::from(i % 16) * 64.0 - 500.0;
        let y = f64::from(i / 16) * 64.0 - 500.0;
        tree.insert(Entry::new(i, Aabb2D::from_xywh(x, y, 20.0, 20.0)));
    }
    info!(stats = ?tree.stats(), "tree built");
    Ok(())
}
