//! Errors reported by the `texel` binary.

use thiserror::Error;
use texel_flow::FlowError;

/// Everything that can stop a command.
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading, building or rendering the diagram failed.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Writing a PNG failed.
    #[error("cannot write {path}: {source}")]
    Image {
        /// Target file.
        path: String,
        /// Encoder or I/O failure.
        source: image::ImageError,
    },

    /// An `--input` value could not be used.
    #[error("input {name}: {reason}")]
    Input {
        /// Input name.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Arguments that parse but do not make sense together.
    #[error("{0}")]
    Usage(String),
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
