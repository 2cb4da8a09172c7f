// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Static perfect hash map using the Fredman–Komlós–Szemerédi scheme.
//!
//! A [`PerfectHashMap`] is built once over a fixed set of keys. Construction
//! spends randomized effort up front so that afterwards every key of the set
//! owns a slot no other key can reach, which makes every lookup worst-case
//! constant time.
//!
//! # Features
//!
//! - Two-level hashing with zero collisions among the original keys.
//! - Reproducible construction driven by an explicit seed.
//! - Bounded random searches with a deterministic exhaustive fallback.
//! - Values readable and writable through `&self`; each slot carries its own
//!   lock, so writers of different keys never contend.
//! - Zero unsafe code.
//!
//! # Example
//!
//! ```
//! use fks_hash_lib::data_structures::perfect_hash::{PerfectHashConfig, PerfectHashMap};
//!
//! let keys = ["apple", "banana", "orange", "grape", "mango"].map(String::from);
//! let map = PerfectHashMap::new(keys).unwrap();
//!
//! map.put("apple", 1).unwrap();
//! assert_eq!(map.get("apple"), Some(1));
//!
//! // Known but never written.
//! assert_eq!(map.get("mango"), None);
//!
//! // Not part of the key set.
//! assert!(map.put("kiwi", 6).is_err());
//! assert_eq!(map.get("kiwi"), None);
//!
//! // Construction is tunable.
//! let config = PerfectHashConfig::new().with_seed(7).with_first_level_ratio(4);
//! let tuned: PerfectHashMap<u32, &str> = PerfectHashMap::with_config(0..100, config).unwrap();
//! assert_eq!(tuned.size(), 100);
//! ```
//!
//! # Construction
//!
//! 1. A prime `p` comfortably above `n²` is chosen as modulus.
//! 2. Keys are hashed to 64 bits with a seeded FNV-1a hash. If two keys agree
//!    modulo `p` the seed is changed and the keys rehashed.
//! 3. A first-level multiplier spreads the keys over `2n` buckets, searched
//!    to keep the largest bucket small.
//! 4. Each bucket of `b` keys gets a table of `b² + 1` slots and a multiplier
//!    under which its keys do not collide.

// Module declarations
mod config;
mod error;
mod hash;
mod map;
mod partition;
mod prime;
mod second_level;

// Re-exports
pub use config::PerfectHashConfig;
pub use error::{PerfectHashError, Result};
pub use hash::{hash_value, key_hash, UniversalHash};
pub use map::{ConstructionStats, PerfectHashMap};
pub use prime::{is_prime, next_prime, MAX_MODULUS};
