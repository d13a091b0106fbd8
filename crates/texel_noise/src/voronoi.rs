//! # Voronoi Noise
//!
//! Cellular noise: every lattice cell holds pseudo-random feature points,
//! and a sample reports how far the nearest two are.
//!
//! Results are `Vec3 { x: nearest, y: second nearest, z: cell id }`, where
//! the cell id is the nearest feature's hash scaled into [0, 1].
//!
//! ## Cell search
//!
//! Cells are visited center first, then the negative and positive
//! neighbor on each axis (`0, -1, 1`), nested X, Y, Z. Before visiting a
//! neighbor the search computes the smallest distance any feature in it can
//! have; a neighbor is skipped unless that bound is below the current
//! second-nearest distance. Visiting the center first tightens the bound
//! early. Each metric supplies its own bound: squared per-axis gaps summed
//! for [`Metric::Squared`], plain gaps summed for [`Metric::Manhattan`], the
//! largest gap for [`Metric::Chebyshev`]. Every bound is a lower bound of
//! its metric, so pruning never changes the result.

use serde::{Deserialize, Serialize};
use texel_shared::{Vec2, Vec3};

use crate::fractal::{accumulate, Octaves};
use crate::lattice::{shift_2d, shift_3d, Axis, Tile, Tiling};
use crate::math::{abs, floor_to_int, hash, HASH_MASK};

/// Offset scale turning a hash into a position inside a cell.
const STEP_SIZE: f32 = 1.0 / (HASH_MASK + 1) as f32;

/// Scale turning a hash into a cell id in [0, 1].
const ID_SCALE: f32 = 1.0 / HASH_MASK as f32;

/// Neighbor visiting order per axis.
const NEIGHBORS: [i32; 3] = [0, -1, 1];

/// Distance metric for the feature point search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Squared Euclidean distance, clamped to 1.
    #[default]
    Squared,
    /// Euclidean distance: square root of [`Metric::Squared`].
    Linear,
    /// Sum of per-axis distances, clamped to 1.
    Manhattan,
    /// Largest per-axis distance. Not clamped; starts at `1.0001`.
    Chebyshev,
}

/// Samples 2D Voronoi noise at a single frequency.
#[must_use]
pub fn sample_2d(point: Vec2, frequency: f32, metric: Metric) -> Vec3 {
    cells_2d(point, frequency, metric, Axis::Free, Axis::Free)
}

/// Samples 3D Voronoi noise at a single frequency.
#[must_use]
pub fn sample_3d(point: Vec3, frequency: f32, metric: Metric) -> Vec3 {
    cells_3d(point, frequency, metric, [Axis::Free; 3])
}

/// Samples tiled 2D Voronoi noise. Returns zero when `tile.frequency` is zero.
#[must_use]
pub fn sample_2d_tiled(point: Vec2, tile: Tile, metric: Metric) -> Vec3 {
    if tile.frequency == 0 {
        return Vec3::ZERO;
    }
    let [x, y, _] = tile.axes();
    cells_2d(point, tile.frequency as f32, metric, x, y)
}

/// Samples tiled 3D Voronoi noise. Returns zero when `tile.frequency` is zero.
#[must_use]
pub fn sample_3d_tiled(point: Vec3, tile: Tile, metric: Metric) -> Vec3 {
    if tile.frequency == 0 {
        return Vec3::ZERO;
    }
    cells_3d(point, tile.frequency as f32, metric, tile.axes())
}

/// Fractal 2D Voronoi noise: component-wise weighted octave average.
///
/// For [`Metric::Linear`] the square root is taken per octave, before weighting.
#[must_use]
pub fn fractal_2d(point: Vec2, frequency: f32, octaves: Octaves, metric: Metric) -> Vec3 {
    accumulate(frequency, octaves, |f| sample_2d(point, f, metric)).normalized()
}

/// Fractal 3D Voronoi noise.
#[must_use]
pub fn fractal_3d(point: Vec3, frequency: f32, octaves: Octaves, metric: Metric) -> Vec3 {
    accumulate(frequency, octaves, |f| sample_3d(point, f, metric)).normalized()
}

/// Fractal tiled 2D Voronoi noise.
#[must_use]
pub fn fractal_2d_tiled(
    point: Vec2,
    offset: Vec2,
    tiling: Tiling,
    frequency: i32,
    octaves: Octaves<i32>,
    metric: Metric,
) -> Vec3 {
    let (point, cells) = shift_2d(point, offset, tiling);
    accumulate(frequency, octaves, |f| {
        sample_2d_tiled(point, Tile::new(tiling, f).with_offset(cells), metric)
    })
    .normalized()
}

/// Fractal tiled 3D Voronoi noise.
#[must_use]
pub fn fractal_3d_tiled(
    point: Vec3,
    offset: Vec3,
    tiling: Tiling,
    frequency: i32,
    octaves: Octaves<i32>,
    metric: Metric,
) -> Vec3 {
    let (point, cells) = shift_3d(point, offset, tiling);
    accumulate(frequency, octaves, |f| {
        sample_3d_tiled(point, Tile::new(tiling, f).with_offset(cells), metric)
    })
    .normalized()
}

fn cells_2d(point: Vec2, frequency: f32, metric: Metric, x_axis: Axis, y_axis: Axis) -> Vec3 {
    match metric {
        Metric::Squared => search_2d::<Squared>(point, frequency, x_axis, y_axis),
        Metric::Linear => linear(search_2d::<Squared>(point, frequency, x_axis, y_axis)),
        Metric::Manhattan => search_2d::<Manhattan>(point, frequency, x_axis, y_axis),
        Metric::Chebyshev => search_2d::<Chebyshev>(point, frequency, x_axis, y_axis),
    }
}

fn cells_3d(point: Vec3, frequency: f32, metric: Metric, axes: [Axis; 3]) -> Vec3 {
    match metric {
        Metric::Squared => search_3d::<Squared>(point, frequency, axes),
        Metric::Linear => linear(search_3d::<Squared>(point, frequency, axes)),
        Metric::Manhattan => search_3d::<Manhattan>(point, frequency, axes),
        Metric::Chebyshev => search_3d::<Chebyshev>(point, frequency, axes),
    }
}

#[inline]
fn linear(squared: Vec3) -> Vec3 {
    Vec3::new(squared.x.sqrt(), squared.y.sqrt(), squared.z)
}

/// Per-metric rules for the cell search.
trait Distance {
    /// Initial nearest and second-nearest distance.
    const START: f32;
    /// Whether results above 1 are clamped.
    const CLAMPED: bool;
    /// Whether each cell holds a second feature point.
    const TWO_FEATURES: bool;

    /// Lower bound contributed by one axis for a gap of `gap`.
    fn gap(gap: f32) -> f32;
    /// Combines the bound accumulated so far with one more axis.
    fn combine(bound: f32, axis: f32) -> f32;
    fn distance_2d(x: f32, y: f32) -> f32;
    fn distance_3d(x: f32, y: f32, z: f32) -> f32;
}

struct Squared;

impl Distance for Squared {
    const START: f32 = f32::MAX;
    const CLAMPED: bool = true;
    const TWO_FEATURES: bool = true;

    #[inline]
    fn gap(gap: f32) -> f32 {
        gap * gap
    }

    #[inline]
    fn combine(bound: f32, axis: f32) -> f32 {
        bound + axis
    }

    #[inline]
    fn distance_2d(x: f32, y: f32) -> f32 {
        x * x + y * y
    }

    #[inline]
    fn distance_3d(x: f32, y: f32, z: f32) -> f32 {
        x * x + y * y + z * z
    }
}

struct Manhattan;

impl Distance for Manhattan {
    const START: f32 = f32::MAX;
    const CLAMPED: bool = true;
    const TWO_FEATURES: bool = true;

    #[inline]
    fn gap(gap: f32) -> f32 {
        gap
    }

    #[inline]
    fn combine(bound: f32, axis: f32) -> f32 {
        bound + axis
    }

    #[inline]
    fn distance_2d(x: f32, y: f32) -> f32 {
        abs(x) + abs(y)
    }

    #[inline]
    fn distance_3d(x: f32, y: f32, z: f32) -> f32 {
        abs(x) + abs(y) + abs(z)
    }
}

struct Chebyshev;

impl Distance for Chebyshev {
    const START: f32 = 1.0001;
    const CLAMPED: bool = false;
    const TWO_FEATURES: bool = false;

    #[inline]
    fn gap(gap: f32) -> f32 {
        gap
    }

    #[inline]
    fn combine(bound: f32, axis: f32) -> f32 {
        if bound >= axis {
            bound
        } else {
            axis
        }
    }

    #[inline]
    fn distance_2d(x: f32, y: f32) -> f32 {
        let (x, y) = (abs(x), abs(y));
        if x >= y {
            x
        } else {
            y
        }
    }

    #[inline]
    fn distance_3d(x: f32, y: f32, z: f32) -> f32 {
        let (x, y, z) = (abs(x), abs(y), abs(z));
        if x >= y {
            if x >= z {
                x
            } else {
                z
            }
        } else if y >= z {
            y
        } else {
            z
        }
    }
}

/// Running nearest / second-nearest state.
struct Nearest {
    first: f32,
    second: f32,
    id: f32,
}

impl Nearest {
    #[inline]
    fn new(start: f32) -> Self {
        Self {
            first: start,
            second: start,
            id: start,
        }
    }

    #[inline]
    fn offer(&mut self, distance: f32, feature: usize) {
        if distance < self.first {
            self.id = feature as f32;
            self.second = self.first;
            self.first = distance;
        } else if distance < self.second {
            self.second = distance;
        }
    }

    #[inline]
    fn finish<M: Distance>(self) -> Vec3 {
        let (mut first, mut second) = (self.first, self.second);
        if M::CLAMPED {
            if first > 1.0 {
                first = 1.0;
            }
            if second > 1.0 {
                second = 1.0;
            }
        }
        Vec3::new(first, second, self.id * ID_SCALE)
    }
}

/// Bound for the neighbor `offset` along one axis, given the point's
/// fractional position `t` inside its cell.
#[inline]
fn neighbor_gap<M: Distance>(offset: i32, t: f32) -> f32 {
    if offset < 0 {
        M::gap(t)
    } else {
        M::gap(1.0 - t)
    }
}

/// Position of a feature inside cell `cell` relative to the point.
#[inline]
fn feature(cell: i32, hash: usize, t: f32) -> f32 {
    cell as f32 + hash as f32 * STEP_SIZE - t
}

fn search_2d<M: Distance>(point: Vec2, frequency: f32, x_axis: Axis, y_axis: Axis) -> Vec3 {
    let px = point.x * frequency;
    let py = point.y * frequency;
    let cell_x = floor_to_int(px);
    let cell_y = floor_to_int(py);
    let tx = px - cell_x as f32;
    let ty = py - cell_y as f32;

    let mut nearest = Nearest::new(M::START);
    for x in NEIGHBORS {
        let dx = if x == 0 { 0.0 } else { neighbor_gap::<M>(x, tx) };
        if nearest.second > dx {
            let xx = x_axis.index(cell_x.wrapping_add(x));
            let hash_x = hash(xx);
            for y in NEIGHBORS {
                let dy = if y == 0 { dx } else { M::combine(dx, neighbor_gap::<M>(y, ty)) };
                if nearest.second > dy {
                    let yy = y_axis.index(cell_y.wrapping_add(y));

                    let mut h = hash(hash_x + yy);
                    let vx = feature(x, h, tx);
                    h = hash(h + xx);
                    let vy = feature(y, h, ty);
                    nearest.offer(M::distance_2d(vx, vy), h);

                    if M::TWO_FEATURES {
                        h = hash(h + xx);
                        let vx = feature(x, h, tx);
                        h = hash(h + yy);
                        let vy = feature(y, h, ty);
                        nearest.offer(M::distance_2d(vx, vy), h);
                    }
                }
            }
        }
    }
    nearest.finish::<M>()
}

fn search_3d<M: Distance>(point: Vec3, frequency: f32, [x_axis, y_axis, z_axis]: [Axis; 3]) -> Vec3 {
    let px = point.x * frequency;
    let py = point.y * frequency;
    let pz = point.z * frequency;
    let cell_x = floor_to_int(px);
    let cell_y = floor_to_int(py);
    let cell_z = floor_to_int(pz);
    let tx = px - cell_x as f32;
    let ty = py - cell_y as f32;
    let tz = pz - cell_z as f32;

    let mut nearest = Nearest::new(M::START);
    for x in NEIGHBORS {
        let dx = if x == 0 { 0.0 } else { neighbor_gap::<M>(x, tx) };
        if nearest.second > dx {
            let xx = x_axis.index(cell_x.wrapping_add(x));
            let hash_x = hash(xx);
            for y in NEIGHBORS {
                let dy = if y == 0 { dx } else { M::combine(dx, neighbor_gap::<M>(y, ty)) };
                if nearest.second > dy {
                    let yy = y_axis.index(cell_y.wrapping_add(y));
                    let hash_y = hash(hash_x + yy);
                    for z in NEIGHBORS {
                        let dz = if z == 0 { dy } else { M::combine(dy, neighbor_gap::<M>(z, tz)) };
                        if nearest.second > dz {
                            let zz = z_axis.index(cell_z.wrapping_add(z));

                            let mut h = hash(hash_y + zz);
                            let vx = feature(x, h, tx);
                            h = hash(h + yy);
                            let vy = feature(y, h, ty);
                            h = hash(h + zz);
                            let vz = feature(z, h, tz);
                            nearest.offer(M::distance_3d(vx, vy, vz), h);

                            if M::TWO_FEATURES {
                                h = hash(h + xx);
                                let vx = feature(x, h, tx);
                                h = hash(h + yy);
                                let vy = feature(y, h, ty);
                                h = hash(h + zz);
                                let vz = feature(z, h, tz);
                                nearest.offer(M::distance_3d(vx, vy, vz), h);
                            }
                        }
                    }
                }
            }
        }
    }
    nearest.finish::<M>()
}
