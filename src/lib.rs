//! FKS Hash Library
//!
//! This library contains a static perfect hash map built with the
//! Fredman–Komlós–Szemerédi two-level scheme, together with the
//! configuration and error plumbing used by the `fks-hash` binary.
//!
//! # Architecture
//!
//! - [`data_structures::perfect_hash`] holds the map and its building blocks:
//!   prime selection, the universal hash family, first-level partitioning and
//!   second-level table construction.
//! - [`config`] loads construction and logging settings from files and the
//!   environment.
//! - [`error`] defines the crate-level error type.

pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::perfect_hash::{PerfectHashConfig, PerfectHashError, PerfectHashMap};
pub use error::{FksError, FksResult};

/// Version information for the FKS hash crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
