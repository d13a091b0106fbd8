//! # TEXEL Flow
//!
//! Node-based procedural texture diagrams.
//!
//! A diagram is a TOML document listing nodes, each running one function
//! from a [`FunctionLibrary`], wired together by named arguments. Building a
//! [`Diagram`] validates the graph once; rendering then evaluates every
//! reachable node per pixel in dependency order.
//!
//! ## Design Principles
//!
//! 1. **Fail at build time**: Bad references, types and cycles never reach rendering
//! 2. **Explicit registry**: Functions come from a library passed in by the caller
//! 3. **Row granular**: Render incrementally with [`Diagram::fill_rows`]
//!
//! ## Example
//!
//! ```rust
//! use texel_flow::{Diagram, FunctionLibrary};
//!
//! let library = FunctionLibrary::standard();
//! let diagram = Diagram::from_toml_str(
//!     r#"
//!     [diagram]
//!     width = 16
//!     height = 16
//!
//!     [[nodes]]
//!     id = "uv"
//!     function = "coordinates.uv"
//!
//!     [[nodes]]
//!     id = "noise"
//!     function = "noise2d.perlin"
//!     args = { point = { node = "uv" }, frequency = 4.0, octaves = 3 }
//!
//!     [[nodes]]
//!     id = "out"
//!     function = "output.value"
//!     args = { value = { node = "noise" } }
//!     "#,
//!     &library,
//! )?;
//!
//! let buffers = diagram.render()?;
//! assert_eq!(buffers[0].len(), 16 * 16);
//! # Ok::<(), texel_flow::FlowError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod diagram;
pub mod error;
pub mod function;
pub mod library;
pub mod output;
pub mod value;

pub use config::{ArgumentConfig, DiagramConfig, DiagramSection, NodeConfig, NodeRef, OutputConfig};
pub use diagram::{Diagram, DiagramOutput, MAX_SIZE};
pub use error::{FlowError, FlowResult};
pub use function::{Category, FunctionKind, Pixel, Property};
pub use library::FunctionLibrary;
pub use output::{encode_normals, generate_normals, Filtering, NormalFormat, OutputKind};
pub use texel_shared::Color;
pub use value::{Gradient, GradientKey, Value, ValueType};
