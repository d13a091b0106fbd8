//! # Lattice Indexing
//!
//! Maps integer lattice cells to hash-table indices.
//!
//! A free axis masks the cell into `0..=255`. A wrapped axis first reduces
//! the cell modulo the tiling frequency, then adds an integer cell offset
//! before masking, which makes the pattern repeat every `frequency` cells.

use serde::{Deserialize, Serialize};
use texel_shared::{Vec2, Vec3};

use crate::math::HASH_MASK;

/// Axes along which a tiled sampler wraps.
///
/// 2D samplers treat [`Tiling::XYZ`] like [`Tiling::XY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tiling {
    /// Wrap along X only.
    X,
    /// Wrap along X and Y.
    XY,
    /// Wrap along X, Y and Z.
    XYZ,
}

impl Tiling {
    /// Returns `true` if Y wraps.
    #[inline]
    #[must_use]
    pub const fn wraps_y(self) -> bool {
        matches!(self, Self::XY | Self::XYZ)
    }

    /// Returns `true` if Z wraps.
    #[inline]
    #[must_use]
    pub const fn wraps_z(self) -> bool {
        matches!(self, Self::XYZ)
    }

    /// Returns whether each of X, Y, Z wraps.
    #[inline]
    #[must_use]
    pub const fn wrapped_axes(self) -> [bool; 3] {
        [true, self.wraps_y(), self.wraps_z()]
    }
}

/// A single-octave tiling request.
///
/// `frequency` is both the sampling frequency and the tile period in
/// lattice cells. `offset` shifts the sampled cells per axis; components for
/// axes that do not wrap are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Wrapped axes.
    pub tiling: Tiling,
    /// Tile period in cells. Zero yields a zero sample.
    pub frequency: i32,
    /// Integer cell offset per axis.
    pub offset: [i32; 3],
}

impl Tile {
    /// Creates a tile with no cell offset.
    #[inline]
    #[must_use]
    pub const fn new(tiling: Tiling, frequency: i32) -> Self {
        Self {
            tiling,
            frequency,
            offset: [0; 3],
        }
    }

    /// Returns a copy with the given cell offset.
    #[inline]
    #[must_use]
    pub const fn with_offset(self, offset: [i32; 3]) -> Self {
        Self { offset, ..self }
    }

    /// Per-axis index mappers for X, Y and Z.
    #[inline]
    pub(crate) fn axes(self) -> [Axis; 3] {
        let [x, y, z] = self.tiling.wrapped_axes();
        [
            Axis::new(x, self.frequency, self.offset[0]),
            Axis::new(y, self.frequency, self.offset[1]),
            Axis::new(z, self.frequency, self.offset[2]),
        ]
    }
}

/// How one axis turns lattice cells into hash indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Masked into the table, never repeats within 256 cells.
    Free,
    /// Repeats every `period` cells, shifted by `offset`.
    Wrapped {
        /// Tile period in cells.
        period: i32,
        /// Integer cell offset.
        offset: i32,
    },
}

impl Axis {
    #[inline]
    fn new(wrapped: bool, period: i32, offset: i32) -> Self {
        if wrapped {
            Self::Wrapped { period, offset }
        } else {
            Self::Free
        }
    }

    /// Hash indices of the near (`cell`) and far (`cell + 1`) lattice corners.
    ///
    /// A free far corner may index 256, which the doubled table absorbs.
    #[inline]
    pub(crate) fn corners(self, cell: i32) -> (usize, usize) {
        match self {
            Self::Free => {
                let near = cell & HASH_MASK;
                (near as usize, (near + 1) as usize)
            }
            Self::Wrapped { period, offset } => {
                let near = wrap(cell, period);
                let far = (near + 1).wrapping_rem(period).wrapping_add(offset) & HASH_MASK;
                ((near.wrapping_add(offset) & HASH_MASK) as usize, far as usize)
            }
        }
    }

    /// Hash index of a single cell, as used by the Voronoi cell search.
    #[inline]
    pub(crate) fn index(self, cell: i32) -> usize {
        match self {
            Self::Free => (cell & HASH_MASK) as usize,
            Self::Wrapped { period, offset } => tiled_index(cell, period, offset),
        }
    }
}

/// `cell mod frequency`, shifted into `0..frequency` for negative cells.
#[inline]
fn wrap(cell: i32, frequency: i32) -> i32 {
    let i = cell.wrapping_rem(frequency);
    if i < 0 {
        i + frequency
    } else {
        i
    }
}

/// Index of `cell` on an axis that repeats every `frequency` cells.
#[inline]
pub(crate) fn tiled_index(cell: i32, frequency: i32, offset: i32) -> usize {
    (wrap(cell, frequency).wrapping_add(offset) & HASH_MASK) as usize
}

/// Splits a fractal offset component into a cell offset and a point shift.
///
/// Wrapped axes take the floored integer part as the cell offset and shift
/// the point by the remaining fraction. Free axes shift the point by the
/// whole component.
#[inline]
pub(crate) fn split_offset(component: f32, wrapped: bool) -> (i32, f32) {
    if wrapped {
        let cell = crate::math::floor_to_int(component);
        (cell, component - cell as f32)
    } else {
        (0, component)
    }
}

/// Applies a fractal offset to a 2D point, returning the shifted point and
/// the integer cell offsets for the wrapped axes.
pub(crate) fn shift_2d(point: Vec2, offset: Vec2, tiling: Tiling) -> (Vec2, [i32; 3]) {
    let (cx, dx) = split_offset(offset.x, true);
    let (cy, dy) = split_offset(offset.y, tiling.wraps_y());
    (Vec2::new(point.x + dx, point.y + dy), [cx, cy, 0])
}

/// 3D counterpart of [`shift_2d`].
pub(crate) fn shift_3d(point: Vec3, offset: Vec3, tiling: Tiling) -> (Vec3, [i32; 3]) {
    let (cx, dx) = split_offset(offset.x, true);
    let (cy, dy) = split_offset(offset.y, tiling.wraps_y());
    let (cz, dz) = split_offset(offset.z, tiling.wraps_z());
    (Vec3::new(point.x + dx, point.y + dy, point.z + dz), [cx, cy, cz])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_corners_mask() {
        assert_eq!(Axis::Free.corners(0), (0, 1));
        assert_eq!(Axis::Free.corners(255), (255, 256));
        assert_eq!(Axis::Free.corners(-1), (255, 256));
        assert_eq!(Axis::Free.corners(256), (0, 1));
    }

    #[test]
    fn test_wrapped_corners_repeat() {
        let axis = Axis::Wrapped { period: 4, offset: 0 };
        assert_eq!(axis.corners(3), (3, 0));
        assert_eq!(axis.corners(7), axis.corners(3));
        assert_eq!(axis.corners(-1), axis.corners(3));

        let shifted = Axis::Wrapped { period: 4, offset: 10 };
        assert_eq!(shifted.corners(3), (13, 10));
    }

    #[test]
    fn test_tiled_index() {
        assert_eq!(tiled_index(-1, 3, 0), 2);
        assert_eq!(tiled_index(5, 3, 1), 3);
        assert_eq!(tiled_index(0, 3, 256), 0);
    }

    #[test]
    fn test_split_offset() {
        assert_eq!(split_offset(2.25, true), (2, 0.25));
        assert_eq!(split_offset(-0.75, true), (-1, 0.25));
        assert_eq!(split_offset(2.25, false), (0, 2.25));
    }

    #[test]
    fn test_tile_axes_follow_tiling() {
        let axes = Tile::new(Tiling::X, 8).with_offset([1, 2, 3]).axes();
        assert_eq!(axes[0], Axis::Wrapped { period: 8, offset: 1 });
        assert_eq!(axes[1], Axis::Free);
        assert_eq!(axes[2], Axis::Free);
        assert_eq!(Tile::new(Tiling::XYZ, 2).axes()[2], Axis::Wrapped { period: 2, offset: 0 });
    }
}
