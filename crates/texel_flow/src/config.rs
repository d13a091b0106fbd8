//! # Diagram Documents
//!
//! The TOML schema a diagram is loaded from.
//!
//! ```toml
//! [diagram]
//! name = "clouds"
//! width = 256
//! height = 256
//!
//! [[nodes]]
//! id = "uv"
//! function = "coordinates.uv"
//!
//! [[nodes]]
//! id = "noise"
//! function = "noise2d.perlin"
//! args = { point = { node = "uv" }, frequency = 8.0, octaves = 4 }
//!
//! [[nodes]]
//! id = "out"
//! function = "output.value"
//! args = { value = { node = "noise" } }
//!
//! [[outputs]]
//! name = "Clouds"
//! node = "out"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::output::{Filtering, NormalFormat, OutputKind};

const fn default_size() -> u32 {
    128
}

const fn default_strength() -> f32 {
    1.0
}

/// A complete diagram document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
    /// Document-wide settings.
    #[serde(default)]
    pub diagram: DiagramSection,
    /// Nodes, in any order.
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
    /// Rendered outputs. When empty, one ARGB output is created per output node.
    #[serde(default)]
    pub outputs: Vec<OutputConfig>,
}

/// The `[diagram]` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramSection {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Texture width in pixels.
    #[serde(default = "default_size")]
    pub width: u32,
    /// Texture height in pixels.
    #[serde(default = "default_size")]
    pub height: u32,
    /// Encoding used when post-processing normal maps.
    #[serde(default)]
    pub normal_format: NormalFormat,
}

impl Default for DiagramSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: default_size(),
            height: default_size(),
            normal_format: NormalFormat::default(),
        }
    }
}

/// One `[[nodes]]` entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Unique node id.
    pub id: String,
    /// Function id, e.g. `floats.add`.
    pub function: String,
    /// Arguments by property id. Omitted arguments take their default.
    #[serde(default)]
    pub args: BTreeMap<String, ArgumentConfig>,
}

/// An argument: either a reference to another node or a literal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentConfig {
    /// `{ node = "<id>" }`
    Node(NodeRef),
    /// Bool, number, string, array or gradient table.
    Literal(toml::Value),
}

/// Reference to another node's result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRef {
    /// Referenced node id.
    pub node: String,
}

/// One `[[outputs]]` entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output name, used for file names.
    pub name: String,
    /// Id of an `output.*` node.
    pub node: String,
    /// How the buffer is interpreted.
    #[serde(default)]
    pub kind: OutputKind,
    /// Height sampling for normal maps.
    #[serde(default)]
    pub filtering: Filtering,
    /// Normal map strength.
    #[serde(default = "default_strength")]
    pub strength: f32,
}
