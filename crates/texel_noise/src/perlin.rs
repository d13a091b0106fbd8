//! # Perlin Noise
//!
//! Gradient noise on the integer lattice.
//!
//! Each lattice corner gets a pseudo-random gradient from the hash table.
//! A sample is the smoothed blend of the dot products between each corner
//! gradient and the offset from that corner to the point.
//!
//! ## Output ranges
//!
//! - Single-frequency 2D samples are scaled by sqrt(2) to roughly [-1, 1].
//! - Single-frequency 3D samples are left unscaled; they stay well inside [-1, 1].
//! - Fractal samples are remapped into [0, 1].
//! - Turbulence samples are in [0, 1].

use texel_shared::{Vec2, Vec3};

use crate::fractal::{accumulate, accumulate_turbulence, Octaves};
use crate::lattice::{shift_2d, shift_3d, Axis, Tile, Tiling};
use crate::math::{dot_2d, dot_3d, floor_to_int, hash, smooth, GRADIENTS_2D, GRADIENTS_3D, GRADIENTS_MASK_2D, GRADIENTS_MASK_3D};

const SQRT_2: f32 = 1.414_213_562;

/// Samples 2D Perlin noise at a single frequency.
#[must_use]
pub fn sample_2d(point: Vec2, frequency: f32) -> f32 {
    gradient_2d(point, frequency, Axis::Free, Axis::Free)
}

/// Samples 3D Perlin noise at a single frequency.
#[must_use]
pub fn sample_3d(point: Vec3, frequency: f32) -> f32 {
    gradient_3d(point, frequency, [Axis::Free; 3])
}

/// Samples 2D Perlin noise that repeats every `tile.frequency` units.
///
/// Returns `0.0` when `tile.frequency` is zero.
#[must_use]
pub fn sample_2d_tiled(point: Vec2, tile: Tile) -> f32 {
    if tile.frequency == 0 {
        return 0.0;
    }
    let [x, y, _] = tile.axes();
    gradient_2d(point, tile.frequency as f32, x, y)
}

/// Samples 3D Perlin noise that repeats every `tile.frequency` units.
///
/// Returns `0.0` when `tile.frequency` is zero.
#[must_use]
pub fn sample_3d_tiled(point: Vec3, tile: Tile) -> f32 {
    if tile.frequency == 0 {
        return 0.0;
    }
    gradient_3d(point, tile.frequency as f32, tile.axes())
}

/// Fractal 2D Perlin noise in [0, 1].
#[must_use]
pub fn fractal_2d(point: Vec2, frequency: f32, octaves: Octaves) -> f32 {
    let total = accumulate(frequency, octaves, |f| sample_2d(point, f));
    total.sum * (0.5 / total.range) + 0.5
}

/// Fractal 3D Perlin noise in [0, 1].
#[must_use]
pub fn fractal_3d(point: Vec3, frequency: f32, octaves: Octaves) -> f32 {
    let total = accumulate(frequency, octaves, |f| sample_3d(point, f));
    total.sum * (0.5 / total.range) + 0.5
}

/// Fractal 2D Perlin noise in [0, 1] that tiles along `tiling`.
///
/// `offset` scrolls the pattern: on wrapped axes its integer part selects
/// lattice cells and its fraction moves the point, on free axes it moves
/// the point directly.
#[must_use]
pub fn fractal_2d_tiled(point: Vec2, offset: Vec2, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_2d(point, offset, tiling);
    let total = accumulate(frequency, octaves, |f| {
        sample_2d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    });
    total.sum * (0.5 / total.range) + 0.5
}

/// Fractal 3D Perlin noise in [0, 1] that tiles along `tiling`.
#[must_use]
pub fn fractal_3d_tiled(point: Vec3, offset: Vec3, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_3d(point, offset, tiling);
    let total = accumulate(frequency, octaves, |f| {
        sample_3d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    });
    total.sum * (0.5 / total.range) + 0.5
}

/// 2D turbulence: the normalized sum of absolute octave values, in [0, 1].
#[must_use]
pub fn turbulence_2d(point: Vec2, frequency: f32, octaves: Octaves) -> f32 {
    accumulate_turbulence(frequency, octaves, |f| sample_2d(point, f)).normalized()
}

/// 3D turbulence in [0, 1].
#[must_use]
pub fn turbulence_3d(point: Vec3, frequency: f32, octaves: Octaves) -> f32 {
    accumulate_turbulence(frequency, octaves, |f| sample_3d(point, f)).normalized()
}

/// Tiled 2D turbulence in [0, 1].
#[must_use]
pub fn turbulence_2d_tiled(point: Vec2, offset: Vec2, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_2d(point, offset, tiling);
    accumulate_turbulence(frequency, octaves, |f| {
        sample_2d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    })
    .normalized()
}

/// Tiled 3D turbulence in [0, 1].
#[must_use]
pub fn turbulence_3d_tiled(point: Vec3, offset: Vec3, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_3d(point, offset, tiling);
    accumulate_turbulence(frequency, octaves, |f| {
        sample_3d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    })
    .normalized()
}

#[inline]
fn gradient_2d(point: Vec2, frequency: f32, x_axis: Axis, y_axis: Axis) -> f32 {
    let px = point.x * frequency;
    let py = point.y * frequency;

    let ix = floor_to_int(px);
    let iy = floor_to_int(py);
    let tx0 = px - ix as f32;
    let ty0 = py - iy as f32;
    let tx1 = tx0 - 1.0;
    let ty1 = ty0 - 1.0;

    let (ix0, ix1) = x_axis.corners(ix);
    let (iy0, iy1) = y_axis.corners(iy);
    let h0 = hash(ix0);
    let h1 = hash(ix1);
    let g00 = GRADIENTS_2D[hash(h0 + iy0) & GRADIENTS_MASK_2D];
    let g10 = GRADIENTS_2D[hash(h1 + iy0) & GRADIENTS_MASK_2D];
    let g01 = GRADIENTS_2D[hash(h0 + iy1) & GRADIENTS_MASK_2D];
    let g11 = GRADIENTS_2D[hash(h1 + iy1) & GRADIENTS_MASK_2D];

    let v00 = dot_2d(g00, tx0, ty0);
    let v10 = dot_2d(g10, tx1, ty0);
    let v01 = dot_2d(g01, tx0, ty1);
    let v11 = dot_2d(g11, tx1, ty1);

    let a = v00;
    let b = v10 - v00;
    let c = v01 - v00;
    let d = v11 - v01 - v10 + v00;

    let tx = smooth(tx0);
    let ty = smooth(ty0);
    (a + b * tx + (c + d * tx) * ty) * SQRT_2
}

#[inline]
fn gradient_3d(point: Vec3, frequency: f32, [x_axis, y_axis, z_axis]: [Axis; 3]) -> f32 {
    let px = point.x * frequency;
    let py = point.y * frequency;
    let pz = point.z * frequency;

    let ix = floor_to_int(px);
    let iy = floor_to_int(py);
    let iz = floor_to_int(pz);
    let tx0 = px - ix as f32;
    let ty0 = py - iy as f32;
    let tz0 = pz - iz as f32;
    let tx1 = tx0 - 1.0;
    let ty1 = ty0 - 1.0;
    let tz1 = tz0 - 1.0;

    let (ix0, ix1) = x_axis.corners(ix);
    let (iy0, iy1) = y_axis.corners(iy);
    let (iz0, iz1) = z_axis.corners(iz);
    let h0 = hash(ix0);
    let h1 = hash(ix1);
    let h00 = hash(h0 + iy0);
    let h10 = hash(h1 + iy0);
    let h01 = hash(h0 + iy1);
    let h11 = hash(h1 + iy1);
    let g000 = GRADIENTS_3D[hash(h00 + iz0) & GRADIENTS_MASK_3D];
    let g100 = GRADIENTS_3D[hash(h10 + iz0) & GRADIENTS_MASK_3D];
    let g010 = GRADIENTS_3D[hash(h01 + iz0) & GRADIENTS_MASK_3D];
    let g110 = GRADIENTS_3D[hash(h11 + iz0) & GRADIENTS_MASK_3D];
    let g001 = GRADIENTS_3D[hash(h00 + iz1) & GRADIENTS_MASK_3D];
    let g101 = GRADIENTS_3D[hash(h10 + iz1) & GRADIENTS_MASK_3D];
    let g011 = GRADIENTS_3D[hash(h01 + iz1) & GRADIENTS_MASK_3D];
    let g111 = GRADIENTS_3D[hash(h11 + iz1) & GRADIENTS_MASK_3D];

    let v000 = dot_3d(g000, tx0, ty0, tz0);
    let v100 = dot_3d(g100, tx1, ty0, tz0);
    let v010 = dot_3d(g010, tx0, ty1, tz0);
    let v110 = dot_3d(g110, tx1, ty1, tz0);
    let v001 = dot_3d(g001, tx0, ty0, tz1);
    let v101 = dot_3d(g101, tx1, ty0, tz1);
    let v011 = dot_3d(g011, tx0, ty1, tz1);
    let v111 = dot_3d(g111, tx1, ty1, tz1);

    let a = v000;
    let b = v100 - v000;
    let c = v010 - v000;
    let d = v001 - v000;
    let e = v110 - v010 - v100 + v000;
    let f = v101 - v001 - v100 + v000;
    let g = v011 - v001 - v010 + v000;
    let h = v111 - v011 - v101 + v001 - v110 + v010 + v100 - v000;

    let tx = smooth(tx0);
    let ty = smooth(ty0);
    let tz = smooth(tz0);
    a + b * tx + (c + e * tx) * ty + (d + f * tx + (g + h * tx) * ty) * tz
}
