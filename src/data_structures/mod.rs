//! Data structures for the FKS hash crate.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Worst-case bounds on the hot path, with randomness confined to construction
//! - Reproducible behaviour from explicit seeds

pub mod perfect_hash;

// Re-export common data structures
pub use perfect_hash::{PerfectHashConfig, PerfectHashError, PerfectHashMap};
