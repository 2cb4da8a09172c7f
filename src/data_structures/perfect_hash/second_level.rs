// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Second-level tables: one collision-free table per non-empty bucket.
//!
//! A bucket of `b` keys gets `b² + 1` slots. With that much room a random
//! multiplier separates the bucket with probability around one half, so the
//! seeded random search almost always succeeds within a handful of draws.
//! When it does not, the builder scans every multiplier in `[1, p - 1]` in
//! order, which keeps the table free of collisions instead of degrading to
//! probing.

use std::borrow::Borrow;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::Rng;

use super::config::PerfectHashConfig;
use super::error::{PerfectHashError, Result};
use super::hash::{residues_distinct, UniversalHash};

/// A slot of a second-level table.
///
/// The key is fixed at construction; only the value changes afterwards.
#[derive(Debug)]
struct Slot<K, V> {
    key: Option<K>,
    value: RwLock<Option<V>>,
}

impl<K, V> Slot<K, V> {
    fn vacant() -> Self {
        Self {
            key: None,
            value: RwLock::new(None),
        }
    }
}

/// How the multiplier of a table was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchOutcome {
    /// Multipliers evaluated, random and exhaustive combined.
    pub(crate) attempts: usize,
    /// Whether the exhaustive scan was needed.
    pub(crate) exhaustive: bool,
}

/// A perfectly hashed table over the keys of one bucket.
#[derive(Debug)]
pub(crate) struct SecondLevelTable<K, V> {
    hash: UniversalHash,
    slots: Box<[Slot<K, V>]>,
}

impl<K, V> SecondLevelTable<K, V> {
    /// Builds a collision-free table over `keys`, each paired with its raw hash.
    ///
    /// # Errors
    ///
    /// - [`PerfectHashError::IndistinguishableKeys`] if two keys agree
    ///   modulo `modulus`; no multiplier can separate them.
    /// - [`PerfectHashError::ConstructionExhausted`] if the exhaustive scan
    ///   finds nothing either.
    pub(crate) fn build(
        keys: Vec<(K, u64)>,
        modulus: u64,
        config: &PerfectHashConfig,
        rng: &mut StdRng,
    ) -> Result<(Self, SearchOutcome)> {
        let bucket_size = keys.len();
        let raw: Vec<u64> = keys.iter().map(|(_, h)| *h).collect();
        if !residues_distinct(&raw, modulus) {
            return Err(PerfectHashError::IndistinguishableKeys { bucket_size });
        }

        let table_size = bucket_size * bucket_size + 1;
        let (hash, outcome) = find_multiplier(&raw, modulus, table_size, config, rng)
            .ok_or(PerfectHashError::ConstructionExhausted { bucket_size })?;

        let mut slots: Vec<Slot<K, V>> = (0..table_size).map(|_| Slot::vacant()).collect();
        for (key, h) in keys {
            slots[hash.index(h)].key = Some(key);
        }

        Ok((
            Self {
                hash,
                slots: slots.into_boxed_slice(),
            },
            outcome,
        ))
    }

    /// Returns the slot holding `key`, if the key belongs to this table.
    fn slot<Q>(&self, key: &Q, raw: u64) -> Option<&Slot<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let slot = &self.slots[self.hash.index(raw)];
        match &slot.key {
            Some(stored) if stored.borrow() == key => Some(slot),
            _ => None,
        }
    }

    /// Reads the value stored for `key`.
    pub(crate) fn get<Q>(&self, key: &Q, raw: u64) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        V: Clone,
    {
        self.slot(key, raw)?.value.read().clone()
    }

    /// Writes `value` into the slot of `key`. Returns `false` if the key
    /// does not belong to this table.
    pub(crate) fn put<Q>(&self, key: &Q, raw: u64, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match self.slot(key, raw) {
            Some(slot) => {
                *slot.value.write() = Some(value);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `key` belongs to this table.
    pub(crate) fn contains<Q>(&self, key: &Q, raw: u64) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.slot(key, raw).is_some()
    }

    /// The keys of this table, in slot order.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.slots.iter().filter_map(|slot| slot.key.as_ref())
    }

    /// Number of slots currently holding a value.
    pub(crate) fn written(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.value.read().is_some())
            .count()
    }

    /// The hash used inside this table.
    #[cfg(test)]
    pub(crate) fn hash(&self) -> &UniversalHash {
        &self.hash
    }

    /// Number of slots, occupied or not.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Searches for a multiplier that maps every raw hash to its own slot.
///
/// Tries `config.second_level_attempts` random multipliers, then every
/// multiplier in `[1, modulus)` in order.
fn find_multiplier(
    raw: &[u64],
    modulus: u64,
    table_size: usize,
    config: &PerfectHashConfig,
    rng: &mut StdRng,
) -> Option<(UniversalHash, SearchOutcome)> {
    let mut occupied = vec![false; table_size];
    let mut attempts = 0;

    for _ in 0..config.second_level_attempts {
        attempts += 1;
        let hash = UniversalHash::new(rng.gen_range(1..modulus), modulus, table_size);
        if is_collision_free(&hash, raw, &mut occupied) {
            let outcome = SearchOutcome {
                attempts,
                exhaustive: false,
            };
            return Some((hash, outcome));
        }
    }

    if config.second_level_attempts > 0 {
        tracing::warn!(
            bucket_size = raw.len(),
            attempts,
            "Random second-level search failed, scanning all multipliers"
        );
    }

    for multiplier in 1..modulus {
        attempts += 1;
        let hash = UniversalHash::new(multiplier, modulus, table_size);
        if is_collision_free(&hash, raw, &mut occupied) {
            let outcome = SearchOutcome {
                attempts,
                exhaustive: true,
            };
            return Some((hash, outcome));
        }
    }

    tracing::error!(
        bucket_size = raw.len(),
        modulus,
        "No collision-free multiplier exists"
    );
    None
}

fn is_collision_free(hash: &UniversalHash, raw: &[u64], occupied: &mut [bool]) -> bool {
    occupied.fill(false);
    for h in raw {
        let index = hash.index(*h);
        if occupied[index] {
            return false;
        }
        occupied[index] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::perfect_hash::hash::key_hash;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const MODULUS: u64 = 2_147_483_659;

    fn bucket(words: &[&str]) -> Vec<(String, u64)> {
        words
            .iter()
            .map(|w| (w.to_string(), key_hash(*w, 0)))
            .collect()
    }

    fn build(
        keys: Vec<(String, u64)>,
        config: &PerfectHashConfig,
    ) -> Result<(SecondLevelTable<String, u32>, SearchOutcome)> {
        let mut rng = StdRng::seed_from_u64(3);
        SecondLevelTable::build(keys, MODULUS, config, &mut rng)
    }

    #[test]
    fn test_table_is_collision_free() {
        let words = ["apple", "banana", "orange", "grape", "mango", "kiwi", "plum"];
        let keys = bucket(&words);
        let raw: Vec<u64> = keys.iter().map(|(_, h)| *h).collect();
        let (table, outcome) = build(keys, &PerfectHashConfig::default()).unwrap();

        assert_eq!(table.capacity(), words.len() * words.len() + 1);
        assert!(!outcome.exhaustive);

        let indices: HashSet<usize> = raw.iter().map(|h| table.hash().index(*h)).collect();
        assert_eq!(indices.len(), words.len());
        assert_eq!(table.keys().count(), words.len());
    }

    #[test]
    fn test_exhaustive_scan_when_random_budget_is_zero() {
        let config = PerfectHashConfig::default().with_second_level_attempts(0);
        let (table, outcome) = build(bucket(&["a", "b", "c", "d"]), &config).unwrap();

        assert!(outcome.exhaustive);
        // The scan starts at 1 and stops at the first good multiplier.
        assert_eq!(outcome.attempts as u64, table.hash().multiplier());
        for word in ["a", "b", "c", "d"] {
            assert!(table.contains(word, key_hash(word, 0)));
        }
    }

    #[test]
    fn test_single_key_bucket() {
        let (table, outcome) = build(bucket(&["solo"]), &PerfectHashConfig::default()).unwrap();
        assert_eq!(table.capacity(), 2);
        assert_eq!(outcome.attempts, 1);
        assert!(table.contains("solo", key_hash("solo", 0)));
    }

    #[test]
    fn test_indistinguishable_keys_rejected() {
        let keys = vec![("x".to_string(), 5), ("y".to_string(), 5 + MODULUS)];
        let result = build(keys, &PerfectHashConfig::default());
        assert_eq!(
            result.err(),
            Some(PerfectHashError::IndistinguishableKeys { bucket_size: 2 })
        );
    }

    #[test]
    fn test_put_get_and_foreign_keys() {
        let (table, _) = build(bucket(&["left", "right"]), &PerfectHashConfig::default()).unwrap();
        let left = key_hash("left", 0);

        assert_eq!(table.get("left", left), None);
        assert!(table.put("left", left, 1));
        assert_eq!(table.get("left", left), Some(1));
        assert!(table.put("left", left, 2));
        assert_eq!(table.get("left", left), Some(2));
        assert_eq!(table.written(), 1);

        // A foreign key probed with a colliding raw hash must not alias.
        assert!(!table.put("intruder", left, 9));
        assert_eq!(table.get("intruder", left), None);
        assert_eq!(table.get("left", left), Some(2));
    }
}
