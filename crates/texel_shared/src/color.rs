//! Linear RGBA color.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color with unbounded `f32` channels.
///
/// Channels are only clamped when converted to 8-bit output.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Creates a new color
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Transparent black
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Every channel, alpha included, set to `v`
    #[inline]
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Channel-wise interpolation without clamping `t`
    #[must_use]
    pub fn lerp_unclamped(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Channel-wise interpolation; `t` outside [0, 1] returns an endpoint
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        if t <= 0.0 {
            self
        } else if t >= 1.0 {
            other
        } else {
            self.lerp_unclamped(other, t)
        }
    }

    /// Channel by index: 0 red, 1 green, 2 blue, 3 alpha. Other indices read red.
    #[must_use]
    pub const fn channel(self, index: i32) -> f32 {
        match index {
            1 => self.g,
            2 => self.b,
            3 => self.a,
            _ => self.r,
        }
    }

    /// Copy with one channel replaced; indices outside 0..=3 replace red.
    #[must_use]
    pub const fn with_channel(mut self, index: i32, value: f32) -> Self {
        match index {
            1 => self.g = value,
            2 => self.b = value,
            3 => self.a = value,
            _ => self.r = value,
        }
        self
    }

    /// Converts to 8-bit RGBA, clamping every channel into [0, 1]
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a)]
    }
}

#[inline]
fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_rgba8_clamps() {
        assert_eq!(Color::new(-1.0, 0.5, 2.0, 1.0).to_rgba8(), [0, 128, 255, 255]);
    }

    #[test]
    fn test_buffer_channel_view() {
        let pixels = [Color::new(0.1, 0.2, 0.3, 0.4), Color::WHITE];
        let channels: &[f32] = bytemuck::cast_slice(&pixels);
        assert_eq!(channels.len(), 8);
        assert_eq!(channels[3], 0.4, "alpha follows blue");
        assert_eq!(channels[4], 1.0);
    }

    #[test]
    fn test_channel_index_falls_back_to_red() {
        let c = Color::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.channel(2), 0.3);
        assert_eq!(c.channel(7), 0.1, "out-of-range index reads red");
        assert_eq!(c.with_channel(3, 1.0), Color::new(0.1, 0.2, 0.3, 1.0));
        assert_eq!(c.with_channel(-1, 0.0), Color::new(0.0, 0.2, 0.3, 0.4));
    }
}
