//! Error types for the `dynawheel` command-line front end.
//!
//! Assembly failures stay as [`AssemblyError`]; this module wraps them with
//! the input problems that can only arise before a request exists.

use crate::config::ConfigError;
use crate::wheel::error::AssemblyError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `dynawheel` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required input was supplied neither on the command line nor in the
    /// configuration file.
    #[error("missing required value: {0} (pass --{flag} or set it under [wheel])", flag = .0.replace('_', "-"))]
    MissingField(&'static str),

    /// The verbatim metadata file could not be read.
    #[error("failed to read metadata file {path}: {source}")]
    MetadataFile {
        /// Path of the metadata file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Wheel assembly failed.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// Result alias for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;
