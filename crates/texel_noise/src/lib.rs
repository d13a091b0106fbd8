//! # TEXEL Noise
//!
//! Deterministic lattice noise for procedural textures.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same point and parameters always give the same bits
//! 2. **Stateless**: Every sampler is a pure function over constant tables
//! 3. **Tileable**: Any sampler can wrap on X, XY or XYZ at an integer period
//! 4. **Allocation-free**: Safe to call from any number of threads
//!
//! ## Core Components
//!
//! - [`math`]: Hash and gradient tables shared by every sampler
//! - [`perlin`]: Gradient noise
//! - [`value`]: Value noise
//! - [`voronoi`]: Cellular noise with four distance metrics
//!
//! ## Example
//!
//! ```rust
//! use texel_noise::{perlin, voronoi, Metric, Octaves, Tiling, Vec2};
//!
//! let p = Vec2::new(0.25, 0.75);
//! let clouds = perlin::fractal_2d(p, 4.0, Octaves::new(5, 2.0, 0.5));
//! assert!((0.0..=1.0).contains(&clouds));
//!
//! // Repeats every unit along X and Y at 8 cells per unit.
//! let tile = perlin::fractal_2d_tiled(p, Vec2::ZERO, Tiling::XY, 8, Octaves::new(3, 2, 0.5));
//! assert!((0.0..=1.0).contains(&tile));
//!
//! let cells = voronoi::sample_2d(p, 6.0, Metric::Linear);
//! assert!(cells.x <= cells.y);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod fractal;
pub mod lattice;
pub mod math;
pub mod perlin;
pub mod value;
pub mod voronoi;

pub use fractal::{Lacunarity, Octaves};
pub use lattice::{Tile, Tiling};
pub use texel_shared::{Vec2, Vec3};
pub use voronoi::Metric;
