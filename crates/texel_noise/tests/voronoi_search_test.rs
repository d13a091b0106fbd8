//! # Voronoi Search Tests
//!
//! The sampler skips neighbor cells whose closest possible feature cannot
//! beat the current second-nearest distance. These tests compare it against
//! an exhaustive search over the same neighborhood in the same order, so any
//! unsound skip bound for a metric shows up as a mismatch.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use texel_noise::math::{floor_to_int, HASH, HASH_MASK};
use texel_noise::{voronoi, Metric, Tile, Tiling, Vec2, Vec3};

const STEP: f32 = 1.0 / 256.0;
const ORDER: [i32; 3] = [0, -1, 1];

fn h(index: usize) -> usize {
    usize::from(HASH[index])
}

fn cell(value: i32) -> usize {
    (value & HASH_MASK) as usize
}

fn distance(metric: Metric, v: &[f32]) -> f32 {
    match metric {
        Metric::Squared | Metric::Linear => v.iter().map(|c| c * c).fold(0.0, |a, b| a + b),
        Metric::Manhattan => v.iter().map(|c| c.abs()).fold(0.0, |a, b| a + b),
        Metric::Chebyshev => v.iter().map(|c| c.abs()).fold(0.0, f32::max),
    }
}

struct Best {
    first: f32,
    second: f32,
    id: f32,
}

impl Best {
    fn new(metric: Metric) -> Self {
        let start = if metric == Metric::Chebyshev { 1.0001 } else { f32::MAX };
        Self { first: start, second: start, id: start }
    }

    fn offer(&mut self, d: f32, id: usize) {
        if d < self.first {
            self.id = id as f32;
            self.second = self.first;
            self.first = d;
        } else if d < self.second {
            self.second = d;
        }
    }

    fn finish(self, metric: Metric) -> Vec3 {
        let (mut first, mut second) = (self.first, self.second);
        if metric != Metric::Chebyshev {
            first = first.min(1.0);
            second = second.min(1.0);
        }
        if metric == Metric::Linear {
            first = first.sqrt();
            second = second.sqrt();
        }
        Vec3::new(first, second, self.id * (1.0 / 255.0))
    }
}

fn exhaustive_2d(point: Vec2, frequency: f32, metric: Metric) -> Vec3 {
    let (px, py) = (point.x * frequency, point.y * frequency);
    let (cx, cy) = (floor_to_int(px), floor_to_int(py));
    let (tx, ty) = (px - cx as f32, py - cy as f32);
    let mut best = Best::new(metric);
    for x in ORDER {
        let xx = cell(cx + x);
        for y in ORDER {
            let yy = cell(cy + y);
            let mut k = h(h(xx) + yy);
            let vx = x as f32 + k as f32 * STEP - tx;
            k = h(k + xx);
            let vy = y as f32 + k as f32 * STEP - ty;
            best.offer(distance(metric, &[vx, vy]), k);
            if metric != Metric::Chebyshev {
                k = h(k + xx);
                let vx = x as f32 + k as f32 * STEP - tx;
                k = h(k + yy);
                let vy = y as f32 + k as f32 * STEP - ty;
                best.offer(distance(metric, &[vx, vy]), k);
            }
        }
    }
    best.finish(metric)
}

fn exhaustive_3d(point: Vec3, frequency: f32, metric: Metric) -> Vec3 {
    let (px, py, pz) = (point.x * frequency, point.y * frequency, point.z * frequency);
    let (cx, cy, cz) = (floor_to_int(px), floor_to_int(py), floor_to_int(pz));
    let (tx, ty, tz) = (px - cx as f32, py - cy as f32, pz - cz as f32);
    let mut best = Best::new(metric);
    for x in ORDER {
        let xx = cell(cx + x);
        for y in ORDER {
            let yy = cell(cy + y);
            for z in ORDER {
                let zz = cell(cz + z);
                let mut k = h(h(h(xx) + yy) + zz);
                let vx = x as f32 + k as f32 * STEP - tx;
                k = h(k + yy);
                let vy = y as f32 + k as f32 * STEP - ty;
                k = h(k + zz);
                let vz = z as f32 + k as f32 * STEP - tz;
                best.offer(distance(metric, &[vx, vy, vz]), k);
                if metric != Metric::Chebyshev {
                    k = h(k + xx);
                    let vx = x as f32 + k as f32 * STEP - tx;
                    k = h(k + yy);
                    let vy = y as f32 + k as f32 * STEP - ty;
                    k = h(k + zz);
                    let vz = z as f32 + k as f32 * STEP - tz;
                    best.offer(distance(metric, &[vx, vy, vz]), k);
                }
            }
        }
    }
    best.finish(metric)
}

const METRICS: [Metric; 4] = [Metric::Squared, Metric::Linear, Metric::Manhattan, Metric::Chebyshev];

/// Test: Pruned 2D search matches the exhaustive one for every metric.
#[test]
fn test_pruned_search_matches_exhaustive_2d() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    for _ in 0..20_000 {
        let p = Vec2::new(rng.gen_range(-64.0f32..64.0), rng.gen_range(-64.0f32..64.0));
        let frequency = rng.gen_range(0.25f32..8.0);
        for metric in METRICS {
            assert_eq!(
                voronoi::sample_2d(p, frequency, metric),
                exhaustive_2d(p, frequency, metric),
                "{metric:?} 2D search diverged at {p:?}, frequency {frequency}"
            );
        }
    }
}

/// Test: Pruned 3D search matches the exhaustive one for every metric.
#[test]
fn test_pruned_search_matches_exhaustive_3d() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xCE11);
    for _ in 0..10_000 {
        let p = Vec3::new(
            rng.gen_range(-64.0f32..64.0),
            rng.gen_range(-64.0f32..64.0),
            rng.gen_range(-64.0f32..64.0),
        );
        let frequency = rng.gen_range(0.25f32..8.0);
        for metric in METRICS {
            assert_eq!(
                voronoi::sample_3d(p, frequency, metric),
                exhaustive_3d(p, frequency, metric),
                "{metric:?} 3D search diverged at {p:?}, frequency {frequency}"
            );
        }
    }
}

/// Test: Points near cell corners, where skip bounds are tightest.
#[test]
fn test_pruned_search_matches_exhaustive_near_corners() {
    let nudges = [0.0f32, 1e-3, 0.5, 1.0 - 1e-3];
    for cx in -3..3 {
        for cy in -3..3 {
            for nx in nudges {
                for ny in nudges {
                    let p = Vec2::new(cx as f32 + nx, cy as f32 + ny);
                    for metric in METRICS {
                        assert_eq!(
                            voronoi::sample_2d(p, 1.0, metric),
                            exhaustive_2d(p, 1.0, metric),
                            "{metric:?} corner search diverged at {p:?}"
                        );
                        let q = Vec3::new(p.x, p.y, p.x - p.y);
                        assert_eq!(
                            voronoi::sample_3d(q, 1.0, metric),
                            exhaustive_3d(q, 1.0, metric),
                            "{metric:?} corner search diverged at {q:?}"
                        );
                    }
                }
            }
        }
    }
}

/// Test: A 256-cell tile indexes cells exactly like the untiled lattice.
#[test]
fn test_full_period_tile_matches_untiled() {
    let mut rng = ChaCha8Rng::seed_from_u64(256);
    let tile = Tile::new(Tiling::XYZ, 256);
    for _ in 0..2_000 {
        let p = Vec3::new(rng.gen_range(0.0f32..1.0), rng.gen_range(0.0f32..1.0), rng.gen_range(0.0f32..1.0));
        for metric in METRICS {
            assert_eq!(voronoi::sample_3d_tiled(p, tile, metric), voronoi::sample_3d(p, 256.0, metric));
            let q = Vec2::new(p.x, p.y);
            assert_eq!(voronoi::sample_2d_tiled(q, tile, metric), voronoi::sample_2d(q, 256.0, metric));
        }
    }
}
