//! # Noise Math
//!
//! Constant tables and scalar helpers shared by every noise family.
//!
//! The permutation table is Ken Perlin's reference permutation, stored
//! twice so that `HASH[a + b]` with `a, b <= 255` never needs a second mask.
//! Changing any value here changes every noise pattern built on top of it.

use texel_shared::{Vec2, Vec3};

/// Mask for indexing the hash table.
pub const HASH_MASK: i32 = 255;

/// The 256-entry reference permutation.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Permutation table, doubled to 512 entries to avoid index wrapping.
pub static HASH: [u8; 512] = double(PERMUTATION);

const fn double(permutation: [u8; 256]) -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        table[i] = permutation[i & 255];
        i += 1;
    }
    table
}

/// Mask for indexing [`GRADIENTS_2D`].
pub const GRADIENTS_MASK_2D: usize = 15;

/// 2D gradient directions: axes, diagonals and the 22.5 degree in-betweens.
pub const GRADIENTS_2D: [Vec2; 16] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.707_106_781, 0.707_106_781),
    Vec2::new(-0.707_106_781, 0.707_106_781),
    Vec2::new(0.707_106_781, -0.707_106_781),
    Vec2::new(-0.707_106_781, -0.707_106_781),
    Vec2::new(0.382_683_5, 0.923_879_5),
    Vec2::new(-0.382_683_5, 0.923_879_5),
    Vec2::new(0.382_683_5, -0.923_879_5),
    Vec2::new(-0.382_683_5, -0.923_879_5),
    Vec2::new(0.923_879_5, 0.382_683_5),
    Vec2::new(-0.923_879_5, 0.382_683_5),
    Vec2::new(-0.923_879_5, -0.382_683_5),
    Vec2::new(0.923_879_5, -0.382_683_5),
];

/// Mask for indexing [`GRADIENTS_3D`].
pub const GRADIENTS_MASK_3D: usize = 15;

/// 3D gradient directions: the 12 cube edge midpoints plus 4 repeats.
pub const GRADIENTS_3D: [Vec3; 16] = [
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(-1.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, -1.0),
    Vec3::new(-1.0, 0.0, -1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(0.0, -1.0, 1.0),
    Vec3::new(0.0, 1.0, -1.0),
    Vec3::new(0.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(0.0, -1.0, 1.0),
    Vec3::new(0.0, -1.0, -1.0),
];

/// Looks up the hash table.
#[inline]
pub(crate) fn hash(index: usize) -> usize {
    usize::from(HASH[index])
}

/// Fast float to floored int conversion.
///
/// Negative values always step down one cell, so an exact negative
/// integer such as `-2.0` maps to `-3`. Lattice cell selection relies on
/// this exact rule; the fractional offset is then in `(0, 1]`.
#[inline]
#[must_use]
pub fn floor_to_int(value: f32) -> i32 {
    if value >= 0.0 {
        value as i32
    } else {
        (value as i32).wrapping_sub(1)
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
#[must_use]
pub fn smooth(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Dot product of a 2D gradient with `(x, y)`.
#[inline]
#[must_use]
pub fn dot_2d(g: Vec2, x: f32, y: f32) -> f32 {
    g.x * x + g.y * y
}

/// Dot product of a 3D gradient with `(x, y, z)`.
#[inline]
#[must_use]
pub fn dot_3d(g: Vec3, x: f32, y: f32, z: f32) -> f32 {
    g.x * x + g.y * y + g.z * z
}

/// Absolute value with the sign test used throughout the samplers.
#[inline]
pub(crate) fn abs(v: f32) -> f32 {
    if v >= 0.0 {
        v
    } else {
        -v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_table_is_doubled_permutation() {
        let mut seen = [false; 256];
        for i in 0..256 {
            assert_eq!(HASH[i], HASH[i + 256], "second half must mirror the first at {i}");
            seen[usize::from(HASH[i])] = true;
        }
        assert!(seen.iter().all(|&s| s), "first half must be a permutation of 0..=255");
        assert_eq!(HASH[0], 151);
        assert_eq!(HASH[255], 180);
    }

    #[test]
    fn test_floor_to_int() {
        assert_eq!(floor_to_int(0.0), 0);
        assert_eq!(floor_to_int(1.7), 1);
        assert_eq!(floor_to_int(-0.3), -1);
        assert_eq!(floor_to_int(-1.5), -2);
        // Exact negative integers step down a full cell.
        assert_eq!(floor_to_int(-2.0), -3);
    }

    #[test]
    fn test_smooth_endpoints() {
        assert_eq!(smooth(0.0), 0.0);
        assert_eq!(smooth(1.0), 1.0);
        assert_eq!(smooth(0.5), 0.5);
    }

    #[test]
    fn test_gradient_tables() {
        assert_eq!(GRADIENTS_2D.len(), GRADIENTS_MASK_2D + 1);
        assert_eq!(GRADIENTS_3D.len(), GRADIENTS_MASK_3D + 1);
        for g in GRADIENTS_2D {
            assert!((g.length() - 1.0).abs() < 1e-6, "2D gradient {g:?} should be unit length");
        }
        assert_eq!(dot_2d(GRADIENTS_2D[0], 0.25, 3.0), 0.25);
        assert_eq!(dot_3d(GRADIENTS_3D[4], 0.5, 9.0, 0.25), 0.75);
    }
}
