// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the perfect hash map.

use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::HashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::config::PerfectHashConfig;
use super::error::{PerfectHashError, Result};
use super::hash::{key_hash, residues_distinct, UniversalHash};
use super::partition::partition;
use super::prime::modulus_for;
use super::second_level::SecondLevelTable;

/// Figures describing how a map was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructionStats {
    /// Number of keys in the universe.
    pub keys: usize,
    /// The prime modulus `p`.
    pub modulus: u64,
    /// Seed of the raw key hash that was finally used.
    pub hash_seed: u64,
    /// Times the raw hash was reseeded before the keys separated.
    pub rehashes: usize,
    /// Number of first-level buckets.
    pub first_level_size: usize,
    /// The first-level multiplier `a₁`.
    pub first_level_multiplier: u64,
    /// First-level multipliers tried.
    pub first_level_attempts: usize,
    /// Keys in the largest bucket.
    pub max_bucket: usize,
    /// Buckets holding at least one key.
    pub occupied_buckets: usize,
    /// Total slots across all second-level tables.
    pub second_level_slots: usize,
    /// Second-level multipliers tried, summed over all buckets.
    pub second_level_attempts: usize,
    /// Buckets that needed the exhaustive multiplier scan.
    pub exhaustive_fallbacks: usize,
}

/// A static map over a fixed key set with collision-free two-level hashing.
///
/// The key set is fixed when the map is built. Every key of that set owns a
/// slot of its own, so lookups take two hash evaluations and one key
/// comparison whatever the input. Values can be written and overwritten
/// through a shared reference; keys outside the set are rejected.
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement `Hash + Eq`.
/// * `V` - The value type. `get` returns clones, so reading requires `Clone`.
///
/// # Examples
///
/// ```
/// use fks_hash_lib::data_structures::perfect_hash::{PerfectHashError, PerfectHashMap};
///
/// let map = PerfectHashMap::new(["apple", "banana", "orange"].map(String::from)).unwrap();
///
/// map.put("apple", 1).unwrap();
/// assert_eq!(map.get("apple"), Some(1));
/// assert_eq!(map.get("banana"), None);
///
/// assert_eq!(map.put("kiwi", 4), Err(PerfectHashError::UnknownKey));
/// assert_eq!(map.size(), 3);
/// ```
#[derive(Debug)]
pub struct PerfectHashMap<K, V> {
    /// Configuration the map was built with
    config: PerfectHashConfig,

    /// Seed of the raw key hash
    hash_seed: u64,

    /// First-level hash over all keys
    first_level: UniversalHash,

    /// One entry per first-level bucket, `None` for empty buckets
    tables: Box<[Option<SecondLevelTable<K, V>>]>,

    /// Number of keys in the universe
    len: usize,

    /// Construction figures
    stats: ConstructionStats,
}

impl<K: Hash + Eq, V> PerfectHashMap<K, V> {
    /// Builds a map over `keys` with the default configuration.
    ///
    /// Duplicate keys are collapsed.
    ///
    /// # Errors
    ///
    /// Fails only if construction cannot separate the keys; see
    /// [`with_config`](Self::with_config).
    pub fn new<I: IntoIterator<Item = K>>(keys: I) -> Result<Self> {
        Self::with_config(keys, PerfectHashConfig::default())
    }

    /// Builds a map over `keys` with the given configuration.
    ///
    /// # Errors
    ///
    /// - [`PerfectHashError::InvalidConfiguration`] if `config` does not validate.
    /// - [`PerfectHashError::RehashExhausted`] if every raw-hash seed left two
    ///   keys agreeing modulo the table prime.
    /// - [`PerfectHashError::ConstructionExhausted`] if a bucket admits no
    ///   collision-free multiplier at all.
    pub fn with_config<I: IntoIterator<Item = K>>(
        keys: I,
        config: PerfectHashConfig,
    ) -> Result<Self> {
        config.validate()?;

        let universe: HashSet<K> = keys.into_iter().collect();
        let keys: Vec<K> = universe.into_iter().collect();
        let len = keys.len();
        let modulus = modulus_for(len, config.prime_floor);
        let first_level_size = len.saturating_mul(config.first_level_ratio).max(1);
        let mut rng = StdRng::seed_from_u64(config.seed);

        tracing::debug!(keys = len, modulus, first_level_size, "Building perfect hash map");

        let mut hash_seed = config.seed;
        let mut rehashes = 0;
        let hashes = loop {
            let hashes: Vec<u64> = keys.iter().map(|key| key_hash(key, hash_seed)).collect();
            if residues_distinct(&hashes, modulus) {
                break hashes;
            }
            if rehashes == config.max_rehash_attempts {
                return Err(PerfectHashError::RehashExhausted {
                    attempts: rehashes + 1,
                });
            }
            rehashes += 1;
            hash_seed = rng.gen();
            tracing::warn!(rehashes, "Keys share a reduced hash, reseeding key hash");
        };

        let items: Vec<(K, u64)> = keys.into_iter().zip(hashes).collect();
        let partition = partition(items, modulus, first_level_size, &config, &mut rng);

        let mut stats = ConstructionStats {
            keys: len,
            modulus,
            hash_seed,
            rehashes,
            first_level_size,
            first_level_multiplier: partition.hash.multiplier(),
            first_level_attempts: partition.attempts,
            max_bucket: partition.max_bucket,
            occupied_buckets: 0,
            second_level_slots: 0,
            second_level_attempts: 0,
            exhaustive_fallbacks: 0,
        };

        let mut tables = Vec::with_capacity(first_level_size);
        for bucket in partition.buckets {
            if bucket.is_empty() {
                tables.push(None);
                continue;
            }
            let (table, outcome) = SecondLevelTable::build(bucket, modulus, &config, &mut rng)?;
            stats.occupied_buckets += 1;
            stats.second_level_slots += table.capacity();
            stats.second_level_attempts += outcome.attempts;
            stats.exhaustive_fallbacks += usize::from(outcome.exhaustive);
            tables.push(Some(table));
        }

        tracing::debug!(
            keys = len,
            occupied_buckets = stats.occupied_buckets,
            second_level_slots = stats.second_level_slots,
            exhaustive_fallbacks = stats.exhaustive_fallbacks,
            "Perfect hash map built"
        );

        Ok(Self {
            config,
            hash_seed,
            first_level: partition.hash,
            tables: tables.into_boxed_slice(),
            len,
            stats,
        })
    }

    /// Locates the second-level table for `key` along with its raw hash.
    fn table_for<Q>(&self, key: &Q) -> Option<(&SecondLevelTable<K, V>, u64)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let raw = key_hash(key, self.hash_seed);
        let table = self.tables[self.first_level.index(raw)].as_ref()?;
        Some((table, raw))
    }

    /// Gets the value stored for `key`.
    ///
    /// # Returns
    ///
    /// `None` if the key is not in the key set, or if no value was put for it yet.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let (table, raw) = self.table_for(key)?;
        table.get(key, raw)
    }

    /// Stores `value` for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PerfectHashError::UnknownKey`] if the key was not in the key set.
    pub fn put<Q>(&self, key: &Q, value: V) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (table, raw) = self.table_for(key).ok_or(PerfectHashError::UnknownKey)?;
        if table.put(key, raw, value) {
            Ok(())
        } else {
            Err(PerfectHashError::UnknownKey)
        }
    }

    /// Returns `true` if `key` is in the key set.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table_for(key)
            .is_some_and(|(table, raw)| table.contains(key, raw))
    }
}

impl<K, V> PerfectHashMap<K, V> {
    /// Returns the number of keys in the key set, written or not.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Same as [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map was built over no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the key set in table order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.tables.iter().flatten().flat_map(SecondLevelTable::keys)
    }

    /// Returns how many keys currently hold a value.
    pub fn written(&self) -> usize {
        self.tables.iter().flatten().map(SecondLevelTable::written).sum()
    }

    /// Returns the construction figures.
    pub fn stats(&self) -> &ConstructionStats {
        &self.stats
    }

    /// Returns the configuration the map was built with.
    pub fn config(&self) -> &PerfectHashConfig {
        &self.config
    }
}
