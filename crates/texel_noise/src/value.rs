//! # Value Noise
//!
//! Lattice noise whose corner values are the hash values themselves.
//!
//! Uses the same cell lookup as [`crate::perlin`], but blends the 0..=255
//! corner hashes directly and scales by `1 / 255`, so every variant lands in
//! [0, 1] without a remap step.

use texel_shared::{Vec2, Vec3};

use crate::fractal::{accumulate, accumulate_turbulence, Octaves};
use crate::lattice::{shift_2d, shift_3d, Axis, Tile, Tiling};
use crate::math::{floor_to_int, hash, smooth, HASH_MASK};

const SCALE: f32 = 1.0 / HASH_MASK as f32;

/// Samples 2D value noise at a single frequency.
#[must_use]
pub fn sample_2d(point: Vec2, frequency: f32) -> f32 {
    lattice_2d(point, frequency, Axis::Free, Axis::Free)
}

/// Samples 3D value noise at a single frequency.
#[must_use]
pub fn sample_3d(point: Vec3, frequency: f32) -> f32 {
    lattice_3d(point, frequency, [Axis::Free; 3])
}

/// Samples tiled 2D value noise. Returns `0.0` when `tile.frequency` is zero.
#[must_use]
pub fn sample_2d_tiled(point: Vec2, tile: Tile) -> f32 {
    if tile.frequency == 0 {
        return 0.0;
    }
    let [x, y, _] = tile.axes();
    lattice_2d(point, tile.frequency as f32, x, y)
}

/// Samples tiled 3D value noise. Returns `0.0` when `tile.frequency` is zero.
#[must_use]
pub fn sample_3d_tiled(point: Vec3, tile: Tile) -> f32 {
    if tile.frequency == 0 {
        return 0.0;
    }
    lattice_3d(point, tile.frequency as f32, tile.axes())
}

/// Fractal 2D value noise.
#[must_use]
pub fn fractal_2d(point: Vec2, frequency: f32, octaves: Octaves) -> f32 {
    accumulate(frequency, octaves, |f| sample_2d(point, f)).normalized()
}

/// Fractal 3D value noise.
#[must_use]
pub fn fractal_3d(point: Vec3, frequency: f32, octaves: Octaves) -> f32 {
    accumulate(frequency, octaves, |f| sample_3d(point, f)).normalized()
}

/// Fractal tiled 2D value noise.
#[must_use]
pub fn fractal_2d_tiled(point: Vec2, offset: Vec2, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_2d(point, offset, tiling);
    accumulate(frequency, octaves, |f| {
        sample_2d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    })
    .normalized()
}

/// Fractal tiled 3D value noise.
#[must_use]
pub fn fractal_3d_tiled(point: Vec3, offset: Vec3, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_3d(point, offset, tiling);
    accumulate(frequency, octaves, |f| {
        sample_3d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    })
    .normalized()
}

/// 2D value turbulence.
///
/// Single samples are never negative, so this only differs from
/// [`fractal_2d`] when `persistence` is negative.
#[must_use]
pub fn turbulence_2d(point: Vec2, frequency: f32, octaves: Octaves) -> f32 {
    accumulate_turbulence(frequency, octaves, |f| sample_2d(point, f)).normalized()
}

/// 3D value turbulence.
#[must_use]
pub fn turbulence_3d(point: Vec3, frequency: f32, octaves: Octaves) -> f32 {
    accumulate_turbulence(frequency, octaves, |f| sample_3d(point, f)).normalized()
}

/// Tiled 2D value turbulence.
#[must_use]
pub fn turbulence_2d_tiled(point: Vec2, offset: Vec2, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_2d(point, offset, tiling);
    accumulate_turbulence(frequency, octaves, |f| {
        sample_2d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    })
    .normalized()
}

/// Tiled 3D value turbulence.
#[must_use]
pub fn turbulence_3d_tiled(point: Vec3, offset: Vec3, tiling: Tiling, frequency: i32, octaves: Octaves<i32>) -> f32 {
    let (point, cells) = shift_3d(point, offset, tiling);
    accumulate_turbulence(frequency, octaves, |f| {
        sample_3d_tiled(point, Tile::new(tiling, f).with_offset(cells))
    })
    .normalized()
}

#[inline]
fn lattice_2d(point: Vec2, frequency: f32, x_axis: Axis, y_axis: Axis) -> f32 {
    let px = point.x * frequency;
    let py = point.y * frequency;

    let ix = floor_to_int(px);
    let iy = floor_to_int(py);
    let tx = px - ix as f32;
    let ty = py - iy as f32;

    let (ix0, ix1) = x_axis.corners(ix);
    let (iy0, iy1) = y_axis.corners(iy);
    let h0 = hash(ix0);
    let h1 = hash(ix1);
    let h00 = hash(h0 + iy0) as i32;
    let h10 = hash(h1 + iy0) as i32;
    let h01 = hash(h0 + iy1) as i32;
    let h11 = hash(h1 + iy1) as i32;

    let a = h00 as f32;
    let b = (h10 - h00) as f32;
    let c = (h01 - h00) as f32;
    let d = (h11 - h01 - h10 + h00) as f32;

    let tx = smooth(tx);
    let ty = smooth(ty);
    (a + b * tx + (c + d * tx) * ty) * SCALE
}

#[inline]
fn lattice_3d(point: Vec3, frequency: f32, [x_axis, y_axis, z_axis]: [Axis; 3]) -> f32 {
    let px = point.x * frequency;
    let py = point.y * frequency;
    let pz = point.z * frequency;

    let ix = floor_to_int(px);
    let iy = floor_to_int(py);
    let iz = floor_to_int(pz);
    let tx = px - ix as f32;
    let ty = py - iy as f32;
    let tz = pz - iz as f32;

    let (ix0, ix1) = x_axis.corners(ix);
    let (iy0, iy1) = y_axis.corners(iy);
    let (iz0, iz1) = z_axis.corners(iz);
    let h0 = hash(ix0);
    let h1 = hash(ix1);
    let h00 = hash(h0 + iy0);
    let h10 = hash(h1 + iy0);
    let h01 = hash(h0 + iy1);
    let h11 = hash(h1 + iy1);
    let h000 = hash(h00 + iz0) as i32;
    let h100 = hash(h10 + iz0) as i32;
    let h010 = hash(h01 + iz0) as i32;
    let h110 = hash(h11 + iz0) as i32;
    let h001 = hash(h00 + iz1) as i32;
    let h101 = hash(h10 + iz1) as i32;
    let h011 = hash(h01 + iz1) as i32;
    let h111 = hash(h11 + iz1) as i32;

    let a = h000 as f32;
    let b = (h100 - h000) as f32;
    let c = (h010 - h000) as f32;
    let d = (h001 - h000) as f32;
    let e = (h110 - h010 - h100 + h000) as f32;
    let f = (h101 - h001 - h100 + h000) as f32;
    let g = (h011 - h001 - h010 + h000) as f32;
    let h = (h111 - h011 - h101 + h001 - h110 + h010 + h100 - h000) as f32;

    let tx = smooth(tx);
    let ty = smooth(ty);
    let tz = smooth(tz);
    (a + b * tx + (c + e * tx) * ty + (d + f * tx + (g + h * tx) * ty) * tz) * SCALE
}
