//! Python wheel assembly library.
//!
//! Builds a `.whl` archive from a prepared source tree: the
//! `<pkg>-<version>.dist-info` directory is staged with `METADATA` and
//! `WHEEL`, the tree is zipped with a generated `RECORD`, and the staging
//! directory is optionally removed. It is used by the `dynawheel` binary and
//! can be called directly from build scripts.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions and configuration merging
//! - [`config`] - TOML configuration file loading
//! - [`error`] - Error types for the command-line front end
//! - [`metadata`] - Core metadata templating
//! - [`wheel`] - Naming, descriptor, manifest, and archive assembly

pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod wheel;
