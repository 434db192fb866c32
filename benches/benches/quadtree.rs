// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb2D, Boundary, Entry, IndexConfig, SpatialIndex};

const WORLD: f64 = 10_000.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, max_size: f64, seed: u64) -> Vec<Aabb2D> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (WORLD - max_size);
            let y0 = rng.next_f64() * (WORLD - max_size);
            let w = 1.0 + rng.next_f64() * max_size;
            let h = 1.0 + rng.next_f64() * max_size;
            Aabb2D::from_xywh(x0, y0, w, h)
        })
        .collect()
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let (cx, cy) = (rng.next_f64() * WORLD, rng.next_f64() * WORLD);
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb2D::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn world() -> Boundary {
    Boundary::new(WORLD / 2.0, WORLD / 2.0, WORLD / 2.0 + 100.0, WORLD / 2.0 + 100.0)
}

fn tree_of(rects: &[Aabb2D], config: IndexConfig) -> SpatialIndex<u32> {
    let mut tree = SpatialIndex::with_config(world(), config);
    for (i, r) in rects.iter().copied().enumerate() {
        tree.insert(Entry::new(i as u32, r));
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[250usize, 1000, 4000] {
        let rects = gen_random_rects(n, 50.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("random_n{n}"), |b| {
            b.iter_batched(
                || SpatialIndex::<u32>::new(world()),
                |mut tree| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        tree.insert(Entry::new(i as u32, r));
                    }
                    black_box(tree.stats());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let clustered = gen_clustered_rects(20, 50, 300.0);
    group.throughput(Throughput::Elements(clustered.len() as u64));
    group.bench_function("clustered_n1000", |b| {
        b.iter(|| black_box(tree_of(&clustered, IndexConfig::default()).stats()))
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let rects = gen_random_rects(1000, 50.0, 0xFACE_FEED_CAFE_BABE);
    let tree = tree_of(&rects, IndexConfig::default());
    let mut rng = Rng::new(7);
    let points: Vec<(f64, f64)> = (0..100)
        .map(|_| (rng.next_f64() * WORLD, rng.next_f64() * WORLD))
        .collect();

    let mut group = c.benchmark_group("query");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("point_tol5_n1000", |b| {
        b.iter(|| {
            let hits: usize = points
                .iter()
                .map(|&(x, y)| tree.query_point(x, y, 5.0).len())
                .sum();
            black_box(hits)
        })
    });
    group.throughput(Throughput::Elements(1));
    group.bench_function("rect_400_n1000", |b| {
        b.iter(|| black_box(tree.query(Aabb2D::from_xywh(1000.0, 1000.0, 400.0, 400.0)).len()))
    });
    group.finish();
}

fn bench_capacity(c: &mut Criterion) {
    let rects = gen_random_rects(1000, 50.0, 0x0BAD_5EED_0000_0001);
    let mut group = c.benchmark_group("capacity");
    for &capacity in &[4usize, 8, 16, 32] {
        let tree = tree_of(&rects, IndexConfig::default().with_max_capacity(capacity));
        group.bench_function(format!("point_query_cap{capacity}"), |b| {
            b.iter(|| black_box(tree.query_point(5000.0, 5000.0, 5.0).len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_capacity);
criterion_main!(benches);
