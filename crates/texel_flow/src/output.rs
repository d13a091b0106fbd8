//! # Outputs and Normal Maps
//!
//! Output kinds decide how a rendered buffer is read. Normal map outputs
//! carry a height in the alpha channel, which [`generate_normals`] turns
//! into a tangent-space normal and [`encode_normals`] packs for storage.
//!
//! Height samples wrap around the texture edges, so tiling height fields
//! produce tiling normal maps.

use serde::{Deserialize, Serialize};
use texel_shared::Color;

/// How an output buffer is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Color with alpha.
    #[default]
    Argb,
    /// Color; alpha is written as 1.
    Rgb,
    /// Alpha only, written as gray.
    Alpha,
    /// Alpha is a height field turned into normals by post-processing.
    NormalMap,
}

impl OutputKind {
    /// Converts a rendered pixel to 8-bit RGBA for this kind.
    #[must_use]
    pub fn to_rgba8(self, color: Color) -> [u8; 4] {
        match self {
            Self::Argb | Self::NormalMap => color.to_rgba8(),
            Self::Rgb => Color::new(color.r, color.g, color.b, 1.0).to_rgba8(),
            Self::Alpha => Color::new(color.a, color.a, color.a, 1.0).to_rgba8(),
        }
    }
}

/// Height sampling used for normal generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filtering {
    /// Central differences.
    #[default]
    Sharp,
    /// 3x3 Sobel kernel.
    Smooth,
}

/// Storage layout for generated normals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalFormat {
    /// Same as [`NormalFormat::Dxt5nm`].
    #[default]
    Automatic,
    /// X in alpha, Y in green, red and blue set to 1.
    Dxt5nm,
    /// XYZ in RGB, alpha kept.
    Rgb,
}

/// Replaces the RGB channels of `pixels` with unit normals derived from the
/// alpha channel. Alpha is left untouched.
///
/// `pixels` holds `width * height` row-major colors.
pub fn generate_normals(pixels: &mut [Color], width: usize, height: usize, filtering: Filtering, strength: f32) {
    if width == 0 || height == 0 || pixels.len() < width * height {
        return;
    }
    let h = |x: usize, y: usize| pixels[y * width + x].a;
    let mut normals = Vec::with_capacity(width * height);
    for y in 0..height {
        let (up, down) = (wrap_previous(y, height), wrap_next(y, height));
        for x in 0..width {
            let (left, right) = (wrap_previous(x, width), wrap_next(x, width));
            let (r, g) = match filtering {
                Filtering::Sharp => {
                    let s = strength * -0.5 * width as f32;
                    ((h(right, y) - h(left, y)) * s, (h(x, down) - h(x, up)) * s)
                }
                Filtering::Smooth => {
                    let s = strength * -0.125 * width as f32;
                    let r = (h(right, up) + h(right, y) * 2.0 + h(right, down)
                        - h(left, up)
                        - h(left, y) * 2.0
                        - h(left, down))
                        * s;
                    let g = (h(left, down) + h(x, down) * 2.0 + h(right, down)
                        - h(left, up)
                        - h(x, up) * 2.0
                        - h(right, up))
                        * s;
                    (r, g)
                }
            };
            let b = 1.0 / (r * r + g * g + 1.0).sqrt();
            normals.push((r * b, g * b, b));
        }
    }
    for (pixel, (r, g, b)) in pixels.iter_mut().zip(normals) {
        pixel.r = r;
        pixel.g = g;
        pixel.b = b;
    }
}

/// Packs unit normals from [`generate_normals`] into `format`.
pub fn encode_normals(pixels: &mut [Color], format: NormalFormat) {
    match format {
        NormalFormat::Rgb => {
            for pixel in pixels {
                pixel.r = pixel.r * 0.5 + 0.5;
                pixel.g = pixel.g * 0.5 + 0.5;
                pixel.b = pixel.b * 0.5 + 0.5;
            }
        }
        NormalFormat::Automatic | NormalFormat::Dxt5nm => {
            for pixel in pixels {
                pixel.a = pixel.r * 0.5 + 0.5;
                pixel.g = pixel.g * 0.5 + 0.5;
                pixel.r = 1.0;
                pixel.b = 1.0;
            }
        }
    }
}

#[inline]
const fn wrap_previous(i: usize, len: usize) -> usize {
    if i == 0 {
        len - 1
    } else {
        i - 1
    }
}

#[inline]
const fn wrap_next(i: usize, len: usize) -> usize {
    if i + 1 == len {
        0
    } else {
        i + 1
    }
}
