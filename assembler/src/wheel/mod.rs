//! Wheel naming, descriptor, manifest, and archive assembly.
//!
//! # Sub-modules
//!
//! - [`assemble`]: Staging and archive orchestration (`assemble_wheel`).
//! - [`descriptor`]: `WHEEL` tag resolution and the scoped writer guard.
//! - [`error`]: Error types for assembly failures.
//! - [`naming`]: Wheel filename composition (`WheelName`, `compose_name`).
//! - [`record`]: `RECORD` manifest rows and digests.
//! - [`tag`]: Compatibility tag triple (`WheelTag`).
//! - [`writer`]: Zip writer that walks a source tree.

pub mod assemble;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod record;
pub mod tag;
pub mod writer;
