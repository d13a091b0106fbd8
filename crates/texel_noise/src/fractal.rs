//! # Fractal Accumulation
//!
//! Sums several octaves of a sampler, each at a higher frequency and lower
//! amplitude than the last.
//!
//! ```text
//! amplitude = 1, range = 1, sum = sample(f)
//! repeat octaves - 1 times:
//!     f *= lacunarity; amplitude *= persistence
//!     range += amplitude; sum += sample(f) * amplitude
//! ```
//!
//! Callers normalize with `range`. The operation order above is part of the
//! output contract and must not be rearranged.

use serde::{Deserialize, Serialize};
use texel_shared::Vec3;

use crate::math::abs;

/// Octave settings for fractal sampling.
///
/// `L` is `f32` for free sampling and `i32` for tiled sampling, where the
/// frequency has to stay an integer number of cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Octaves<L = f32> {
    /// Number of layers. Values below 1 sample a single layer.
    pub count: i32,
    /// Frequency multiplier per layer.
    pub lacunarity: L,
    /// Amplitude multiplier per layer.
    pub persistence: f32,
}

impl<L> Octaves<L> {
    /// Creates octave settings.
    #[inline]
    #[must_use]
    pub const fn new(count: i32, lacunarity: L, persistence: f32) -> Self {
        Self {
            count,
            lacunarity,
            persistence,
        }
    }
}

impl Default for Octaves<f32> {
    fn default() -> Self {
        Self::new(1, 2.0, 0.5)
    }
}

impl Default for Octaves<i32> {
    fn default() -> Self {
        Self::new(1, 2, 0.5)
    }
}

/// A frequency that can be stepped by a lacunarity of the same type.
pub trait Lacunarity: Copy {
    /// Returns `frequency * lacunarity`.
    fn advance(frequency: Self, lacunarity: Self) -> Self;
}

impl Lacunarity for f32 {
    #[inline]
    fn advance(frequency: Self, lacunarity: Self) -> Self {
        frequency * lacunarity
    }
}

impl Lacunarity for i32 {
    #[inline]
    fn advance(frequency: Self, lacunarity: Self) -> Self {
        frequency.wrapping_mul(lacunarity)
    }
}

/// A per-octave result that can be summed with a weight.
pub(crate) trait Layer: Copy {
    fn add_weighted(self, sample: Self, amplitude: f32) -> Self;
    fn scale(self, factor: f32) -> Self;
}

impl Layer for f32 {
    #[inline]
    fn add_weighted(self, sample: Self, amplitude: f32) -> Self {
        self + sample * amplitude
    }

    #[inline]
    fn scale(self, factor: f32) -> Self {
        self * factor
    }
}

impl Layer for Vec3 {
    #[inline]
    fn add_weighted(self, sample: Self, amplitude: f32) -> Self {
        Vec3::new(
            self.x + sample.x * amplitude,
            self.y + sample.y * amplitude,
            self.z + sample.z * amplitude,
        )
    }

    #[inline]
    fn scale(self, factor: f32) -> Self {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Weighted octave sum and the total amplitude it was built from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Accumulated<T> {
    pub sum: T,
    pub range: f32,
}

impl<T: Layer> Accumulated<T> {
    /// `sum * (1 / range)`.
    #[inline]
    pub fn normalized(self) -> T {
        self.sum.scale(1.0 / self.range)
    }
}

/// Accumulates `octaves.count` layers of `sample`, starting at `frequency`.
#[inline]
pub(crate) fn accumulate<L, T>(
    mut frequency: L,
    octaves: Octaves<L>,
    mut sample: impl FnMut(L) -> T,
) -> Accumulated<T>
where
    L: Lacunarity,
    T: Layer,
{
    let mut amplitude = 1.0f32;
    let mut range = 1.0f32;
    let mut sum = sample(frequency);
    for _ in 1..octaves.count {
        frequency = L::advance(frequency, octaves.lacunarity);
        amplitude *= octaves.persistence;
        range += amplitude;
        sum = sum.add_weighted(sample(frequency), amplitude);
    }
    Accumulated { sum, range }
}

/// Like [`accumulate`], but sums the absolute value of each weighted layer.
#[inline]
pub(crate) fn accumulate_turbulence<L: Lacunarity>(
    mut frequency: L,
    octaves: Octaves<L>,
    mut sample: impl FnMut(L) -> f32,
) -> Accumulated<f32> {
    let mut amplitude = 1.0f32;
    let mut range = 1.0f32;
    let mut sum = abs(sample(frequency));
    for _ in 1..octaves.count {
        frequency = L::advance(frequency, octaves.lacunarity);
        amplitude *= octaves.persistence;
        range += amplitude;
        sum += abs(sample(frequency) * amplitude);
    }
    Accumulated { sum, range }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_octave_is_plain_sample() {
        let result = accumulate(3.0f32, Octaves::new(1, 2.0, 0.5), |f| f);
        assert_eq!(result.sum, 3.0);
        assert_eq!(result.range, 1.0);
    }

    #[test]
    fn test_non_positive_count_samples_once() {
        let mut calls = 0;
        let result = accumulate(1.0f32, Octaves::new(0, 2.0, 0.5), |_| {
            calls += 1;
            1.0f32
        });
        assert_eq!(calls, 1);
        assert_eq!(result.range, 1.0);
    }

    #[test]
    fn test_frequency_and_amplitude_progression() {
        let mut frequencies = Vec::new();
        let result = accumulate(1, Octaves::new(4, 3, 0.5), |f: i32| {
            frequencies.push(f);
            1.0f32
        });
        assert_eq!(frequencies, vec![1, 3, 9, 27]);
        assert_eq!(result.range, 1.875);
        assert_eq!(result.sum, 1.875);
        assert_eq!(result.normalized(), 1.0);
    }

    #[test]
    fn test_turbulence_takes_absolute_values() {
        let result = accumulate_turbulence(1.0f32, Octaves::new(2, 2.0, 0.5), |f| -f);
        // |-1| + |-2 * 0.5|
        assert_eq!(result.sum, 2.0);
        assert_eq!(result.range, 1.5);
    }
}
