// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the perfect hash map.

/// Errors that can occur in perfect hash map operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PerfectHashError {
    /// The key was not part of the key set the map was built from
    #[error("Key was not in the original key set")]
    UnknownKey,

    /// No multiplier separates the keys of a bucket, even after scanning
    /// every candidate. Unreachable for distinct raw hashes; seeing it
    /// means the hashing or the table sizing is broken.
    #[error("No collision-free multiplier exists for a bucket of {bucket_size} keys")]
    ConstructionExhausted {
        /// Number of keys in the failing bucket
        bucket_size: usize,
    },

    /// Two keys in a bucket share a raw hash modulo the table prime
    #[error("Bucket of {bucket_size} keys contains keys with identical reduced hashes")]
    IndistinguishableKeys {
        /// Number of keys in the failing bucket
        bucket_size: usize,
    },

    /// Every raw-hash seed tried left some keys indistinguishable
    #[error("Could not separate all keys after {attempts} hash seeds")]
    RehashExhausted {
        /// Number of seeds tried
        attempts: usize,
    },

    /// The construction parameters are unusable
    #[error("Invalid perfect hash configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for perfect hash map operations
pub type Result<T> = std::result::Result<T, PerfectHashError>;
