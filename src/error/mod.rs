//! Error module for the FKS hash crate.
//!
//! Each data structure defines its own error type next to its code. This
//! module ties them together with configuration and IO failures into a single
//! error for the binary and other top-level callers.

use thiserror::Error;

use crate::data_structures::perfect_hash::PerfectHashError;

pub mod config;

/// Result type alias used throughout the crate.
pub type FksResult<T> = Result<T, FksError>;

/// Core error enum for the FKS hash crate.
#[derive(Error, Debug)]
pub enum FksError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised while building or using a perfect hash map.
    #[error("Perfect hash error: {0}")]
    PerfectHash(#[from] PerfectHashError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
