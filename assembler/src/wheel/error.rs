//! Error types for wheel assembly.
//!
//! Failures are fatal to the current invocation and surface the underlying
//! error's message unchanged.

use thiserror::Error;

/// Errors arising while staging metadata or writing a wheel archive.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A filesystem operation failed (directory creation, file write, walk,
    /// or staging cleanup).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The zip writer rejected an entry or failed to finalise the archive.
    #[error(transparent)]
    Archive(#[from] zip::result::ZipError),

    /// The `RECORD` manifest could not be encoded.
    #[error(transparent)]
    Record(#[from] csv::Error),
}

/// Result type alias using [`AssemblyError`].
pub type Result<T> = std::result::Result<T, AssemblyError>;
