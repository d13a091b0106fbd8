//! # Diagram Error Types
//!
//! Everything that can go wrong while loading, building or rendering a
//! diagram. Evaluation itself cannot fail once a diagram is built.

use thiserror::Error;

use crate::value::ValueType;

/// Errors that can occur in the diagram engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// The document is not valid TOML or does not match the schema.
    #[error("invalid diagram document: {0}")]
    Parse(String),

    /// The document could not be read.
    #[error("cannot read diagram {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },

    /// Two nodes share an id.
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// A node names a function the library does not provide.
    #[error("node {node}: unknown function {function}")]
    UnknownFunction {
        /// Node id.
        node: String,
        /// Requested function id.
        function: String,
    },

    /// An argument or output references a node that does not exist.
    #[error("{owner}: unknown node reference {reference}")]
    UnknownNode {
        /// Node or output holding the reference.
        owner: String,
        /// Missing node id.
        reference: String,
    },

    /// A node sets an argument its function does not declare.
    #[error("node {node}: function {function} has no argument {argument}")]
    UnknownArgument {
        /// Node id.
        node: String,
        /// Function id.
        function: String,
        /// Offending argument name.
        argument: String,
    },

    /// A required argument has no value.
    #[error("node {node}: missing argument {argument}")]
    MissingArgument {
        /// Node id.
        node: String,
        /// Missing argument name.
        argument: String,
    },

    /// A node reference produces the wrong type for an argument.
    #[error("node {node}: argument {argument} expects {expected}, but {source_node} produces {found}")]
    TypeMismatch {
        /// Node id.
        node: String,
        /// Argument name.
        argument: String,
        /// Node feeding the argument.
        source_node: String,
        /// Declared argument type.
        expected: ValueType,
        /// Return type of the referenced node.
        found: ValueType,
    },

    /// A literal cannot be converted to the argument's type.
    #[error("node {node}: argument {argument} cannot be read as {expected}")]
    InvalidLiteral {
        /// Node id.
        node: String,
        /// Argument name.
        argument: String,
        /// Declared argument type.
        expected: ValueType,
    },

    /// Nodes depend on each other in a loop.
    #[error("dependency cycle: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),

    /// An output points at a node that is not an output function.
    #[error("output {output}: node {node} is not an output node")]
    NotAnOutput {
        /// Output name.
        output: String,
        /// Referenced node id.
        node: String,
    },

    /// No input with this name exists.
    #[error("unknown input: {0}")]
    UnknownInput(String),

    /// A run-time input value has the wrong type.
    #[error("input {name} expects {expected}, got {found}")]
    InputTypeMismatch {
        /// Input name.
        name: String,
        /// Declared input type.
        expected: ValueType,
        /// Type of the supplied value.
        found: ValueType,
    },

    /// Width or height outside 1..=4096.
    #[error("invalid size {width}x{height}: both sides must be in 1..=4096")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Fewer buffers than outputs.
    #[error("expected {expected} buffers, got {found}")]
    MissingBuffers {
        /// Number of outputs.
        expected: usize,
        /// Number of buffers supplied.
        found: usize,
    },

    /// A buffer does not hold exactly `width * height` pixels.
    #[error("buffer {index} holds {found} pixels, expected {expected}")]
    BufferSize {
        /// Buffer index.
        index: usize,
        /// `width * height`.
        expected: usize,
        /// Actual length.
        found: usize,
    },
}

impl From<toml::de::Error> for FlowError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for diagram operations.
pub type FlowResult<T> = Result<T, FlowError>;
