//! # Noise Property Tests
//!
//! Determinism, output ranges, seams and octave decay across every sampler
//! family, checked on seeded random points.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use texel_noise::{perlin, value, voronoi, Metric, Octaves, Tile, Tiling, Vec2, Vec3};

const ALL_METRICS: [Metric; 4] = [Metric::Squared, Metric::Linear, Metric::Manhattan, Metric::Chebyshev];

fn random_points_3d(seed: u64, count: usize, extent: f32) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

fn random_points_2d(seed: u64, count: usize, extent: f32) -> Vec<Vec2> {
    random_points_3d(seed, count, extent)
        .into_iter()
        .map(|p| Vec2::new(p.x, p.y))
        .collect()
}

/// Test: Same inputs always produce the same bits.
#[test]
fn test_perlin_sample_is_deterministic() {
    let p = Vec2::new(0.37, 0.81);
    let first = perlin::sample_2d(p, 1.0);
    let second = perlin::sample_2d(p, 1.0);
    assert_eq!(first.to_bits(), second.to_bits(), "Perlin sample changed between calls");
}

/// Test: Every sampler family is deterministic on random points.
#[test]
fn test_all_samplers_deterministic() {
    let octaves = Octaves::new(4, 2.0, 0.5);
    for p in random_points_3d(1, 500, 50.0) {
        let q = Vec2::new(p.x, p.z);
        assert_eq!(perlin::fractal_3d(p, 3.0, octaves), perlin::fractal_3d(p, 3.0, octaves));
        assert_eq!(value::turbulence_2d(q, 3.0, octaves), value::turbulence_2d(q, 3.0, octaves));
        for metric in ALL_METRICS {
            assert_eq!(
                voronoi::fractal_3d(p, 2.0, octaves, metric),
                voronoi::fractal_3d(p, 2.0, octaves, metric),
                "{metric:?} Voronoi changed between calls"
            );
        }
    }
}

/// Test: Fractal Perlin noise stays in [0, 1].
#[test]
fn test_perlin_fractal_in_unit_range() {
    let octaves = Octaves::new(5, 2.0, 0.5);
    for p in random_points_3d(2, 5_000, 10.0) {
        let v2 = perlin::fractal_2d(Vec2::new(p.x, p.y), 4.0, octaves);
        let v3 = perlin::fractal_3d(p, 4.0, octaves);
        assert!((0.0..=1.0).contains(&v2), "2D fractal {v2} out of range at {p:?}");
        assert!((0.0..=1.0).contains(&v3), "3D fractal {v3} out of range at {p:?}");
    }
}

/// Test: Turbulence stays in [0, 1].
#[test]
fn test_turbulence_in_unit_range() {
    let octaves = Octaves::new(4, 2.0, 0.5);
    for p in random_points_3d(3, 5_000, 10.0) {
        let perlin_3d = perlin::turbulence_3d(p, 2.0, octaves);
        let value_3d = value::turbulence_3d(p, 2.0, octaves);
        assert!((0.0..=1.0).contains(&perlin_3d), "Perlin turbulence {perlin_3d} out of range");
        assert!((0.0..=1.0).contains(&value_3d), "Value turbulence {value_3d} out of range");
    }
}

/// Test: Value noise over [-10, 10]^3 at f=4 with four octaves stays in [0, 1].
#[test]
fn test_value_fractal_3d_in_unit_range() {
    let octaves = Octaves::new(4, 2.0, 0.5);
    for p in random_points_3d(4, 10_000, 10.0) {
        let v = value::fractal_3d(p, 4.0, octaves);
        assert!((0.0..=1.0).contains(&v), "Value noise {v} out of range at {p:?}");
    }
}

/// Test: Squared Voronoi keeps nearest <= second, both in [0, 1].
#[test]
fn test_voronoi_squared_ordering_and_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for p in random_points_2d(5, 5_000, 100.0) {
        let frequency = rng.gen_range(0.1f32..16.0);
        let r = voronoi::sample_2d(p, frequency, Metric::Squared);
        assert!(r.x <= r.y, "nearest {} after second {} at {p:?}", r.x, r.y);
        assert!((0.0..=1.0).contains(&r.x), "nearest {} out of range", r.x);
        assert!((0.0..=1.0).contains(&r.y), "second {} out of range", r.y);
    }
}

/// Test: Ordering holds for every metric, fractal and tiled.
#[test]
fn test_voronoi_ordering_all_variants() {
    let octaves = Octaves::new(3, 2.0, 0.5);
    let tiled_octaves = Octaves::new(3, 2, 0.5);
    for p in random_points_3d(6, 1_000, 20.0) {
        for metric in ALL_METRICS {
            let fractal = voronoi::fractal_3d(p, 2.0, octaves, metric);
            assert!(fractal.x <= fractal.y, "{metric:?} fractal ordering broken at {p:?}");
            let tiled = voronoi::fractal_3d_tiled(p, Vec3::ZERO, Tiling::XYZ, 3, tiled_octaves, metric);
            assert!(tiled.x <= tiled.y, "{metric:?} tiled ordering broken at {p:?}");
        }
    }
}

/// Test: Tiling along X repeats at the tile boundary.
#[test]
fn test_perlin_tiled_x_seam() {
    let octaves = Octaves::new(1, 2, 0.5);
    let a = perlin::fractal_2d_tiled(Vec2::new(0.5, 0.2), Vec2::ZERO, Tiling::X, 4, octaves);
    let b = perlin::fractal_2d_tiled(Vec2::new(4.5, 0.2), Vec2::ZERO, Tiling::X, 4, octaves);
    assert_eq!(a, b, "tiled Perlin does not repeat across the seam");
}

/// Test: Tiled fractals repeat every unit along each wrapped axis.
#[test]
fn test_tiled_fractals_repeat_per_unit() {
    let octaves = Octaves::new(3, 2, 0.5);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        // Quarter steps keep the shifted coordinates exact.
        let x = f32::from(rng.gen_range(0u8..4)) * 0.25 + 0.125;
        let y = f32::from(rng.gen_range(0u8..4)) * 0.25 + 0.125;
        let z = f32::from(rng.gen_range(0u8..4)) * 0.25 + 0.125;
        let p = Vec3::new(x, y, z);
        let shifted = Vec3::new(x + 1.0, y + 2.0, z + 3.0);

        let a = perlin::fractal_3d_tiled(p, Vec3::ZERO, Tiling::XYZ, 4, octaves);
        let b = perlin::fractal_3d_tiled(shifted, Vec3::ZERO, Tiling::XYZ, 4, octaves);
        assert!((a - b).abs() < 1e-5, "Perlin XYZ tile mismatch: {a} vs {b}");

        let a = value::turbulence_3d_tiled(p, Vec3::ZERO, Tiling::XYZ, 4, octaves);
        let b = value::turbulence_3d_tiled(shifted, Vec3::ZERO, Tiling::XYZ, 4, octaves);
        assert!((a - b).abs() < 1e-5, "Value XYZ tile mismatch: {a} vs {b}");

        for metric in ALL_METRICS {
            let a = voronoi::fractal_2d_tiled(Vec2::new(x, y), Vec2::ZERO, Tiling::XY, 4, octaves, metric);
            let b = voronoi::fractal_2d_tiled(Vec2::new(x + 1.0, y + 2.0), Vec2::ZERO, Tiling::XY, 4, octaves, metric);
            assert!((a.x - b.x).abs() < 1e-5, "{metric:?} XY tile mismatch: {a:?} vs {b:?}");
            assert!((a.y - b.y).abs() < 1e-5, "{metric:?} XY tile mismatch: {a:?} vs {b:?}");
        }
    }
}

/// Test: Zero tiling frequency yields zero for every family.
#[test]
fn test_zero_frequency_tiles_are_zero() {
    let p = Vec3::new(0.3, 0.6, 0.9);
    for tiling in [Tiling::X, Tiling::XY, Tiling::XYZ] {
        let tile = Tile::new(tiling, 0);
        assert_eq!(perlin::sample_3d_tiled(p, tile), 0.0);
        assert_eq!(value::sample_3d_tiled(p, tile), 0.0);
        assert_eq!(voronoi::sample_3d_tiled(p, tile, Metric::Chebyshev), Vec3::ZERO);
    }
}

/// Test: Each extra octave moves the result by at most persistence^n.
#[test]
fn test_octave_contribution_decays() {
    let persistence = 0.5f32;
    for p in random_points_3d(8, 500, 10.0) {
        let mut previous_value = value::fractal_3d(p, 2.0, Octaves::new(1, 2.0, persistence));
        let mut previous_perlin = perlin::fractal_2d(Vec2::new(p.x, p.y), 2.0, Octaves::new(1, 2.0, persistence));
        let mut bound = 1.0f32;
        for count in 2..8 {
            bound *= persistence;
            let current_value = value::fractal_3d(p, 2.0, Octaves::new(count, 2.0, persistence));
            let current_perlin = perlin::fractal_2d(Vec2::new(p.x, p.y), 2.0, Octaves::new(count, 2.0, persistence));
            assert!(
                (current_value - previous_value).abs() <= bound + 1e-5,
                "value octave {count} moved result by more than {bound}"
            );
            assert!(
                (current_perlin - previous_perlin).abs() <= bound + 1e-4,
                "Perlin octave {count} moved result by more than {bound}"
            );
            previous_value = current_value;
            previous_perlin = current_perlin;
        }
    }
}

fn assert_pinned(actual: f32, expected: f32, label: &str) {
    assert!(
        (actual - expected).abs() <= 1e-6,
        "{label}: got {actual}, pinned {expected}"
    );
}

/// Test: Samples at fixed points match values derived from the hash and
/// gradient tables. Any change to either table moves these.
#[test]
fn test_pinned_samples() {
    // On the lattice every Perlin corner dot is zero and value noise reads
    // HASH[HASH[0]] = 17 directly.
    assert_eq!(perlin::sample_2d(Vec2::new(3.0, 5.0), 1.0), 0.0);
    assert_pinned(value::sample_2d(Vec2::ZERO, 1.0), 17.0 / 255.0, "value 2D origin");

    let perlin_2d = [
        (Vec2::new(0.3, 0.7), 0.257_151_96),
        (Vec2::new(1.25, -2.6), -0.042_464_93),
        (Vec2::new(10.1, 3.3), -0.135_183_71),
    ];
    for (point, expected) in perlin_2d {
        assert_pinned(perlin::sample_2d(point, 1.0), expected, &format!("perlin 2D {point:?}"));
    }

    let perlin_3d = [
        (Vec3::new(0.3, 0.7, 0.2), -0.097_576_46),
        (Vec3::new(-1.4, 2.25, 5.6), 0.331_672_73),
    ];
    for (point, expected) in perlin_3d {
        assert_pinned(perlin::sample_3d(point, 1.0), expected, &format!("perlin 3D {point:?}"));
    }

    let value_2d = [(Vec2::new(0.3, 0.7), 0.654_166_7), (Vec2::new(4.6, -1.2), 0.111_687_46)];
    for (point, expected) in value_2d {
        assert_pinned(value::sample_2d(point, 1.0), expected, &format!("value 2D {point:?}"));
    }

    let voronoi_2d = [
        (Vec2::new(0.3, 0.7), Vec3::new(0.102_134_4, 0.367_466_42, 151.0 / 255.0)),
        (Vec2::new(2.5, -0.75), Vec3::new(0.062_088_013, 0.137_329_1, 74.0 / 255.0)),
    ];
    for (point, expected) in voronoi_2d {
        let sample = voronoi::sample_2d(point, 1.0, Metric::Squared);
        assert_pinned(sample.x, expected.x, &format!("voronoi F1 {point:?}"));
        assert_pinned(sample.y, expected.y, &format!("voronoi F2 {point:?}"));
        assert_pinned(sample.z, expected.z, &format!("voronoi id {point:?}"));
    }
}
