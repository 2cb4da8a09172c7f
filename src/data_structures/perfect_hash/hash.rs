// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hashing utilities for the perfect hash map.
//!
//! Keys are first reduced to a seeded 64-bit FNV-1a value (the *raw hash*).
//! Both levels of the table then index with a member of the affine family
//!
//! ```text
//! h(x) = ((a · x) mod p) mod m
//! ```
//!
//! where `a` is the multiplier found by search, `p` the table's prime
//! modulus and `m` the size of the table being indexed. All arithmetic is
//! unsigned with 128-bit intermediates, so an index is always in `[0, m)`.

use std::hash::{Hash, Hasher};

use fnv::FnvHasher;

/// FNV-1a 64-bit offset basis, mixed with the caller's seed.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// Computes the seeded raw hash of a key.
///
/// The result is stable for a given `(key, seed)` pair within one process.
/// Changing the seed gives an unrelated hash, which is how a table escapes
/// keys whose raw hashes happen to coincide.
pub fn key_hash<K: Hash + ?Sized>(key: &K, seed: u64) -> u64 {
    let mut hasher = FnvHasher::with_key(FNV_OFFSET_BASIS ^ seed);
    key.hash(&mut hasher);
    hasher.finish()
}

/// Computes `(x * y) mod p` without overflow.
fn mul_mod(x: u64, y: u64, p: u64) -> u64 {
    ((x as u128 * y as u128) % p as u128) as u64
}

/// Computes `((a · raw) mod p) mod m`.
///
/// `raw` is reduced modulo `p` first, so any 64-bit value is accepted.
/// The result is always a valid index into a table of size `m`.
///
/// # Panics
///
/// Panics if `p` or `m` is zero.
pub fn hash_value(raw: u64, multiplier: u64, modulus: u64, table_size: usize) -> usize {
    let reduced = mul_mod(multiplier, raw % modulus, modulus);
    (reduced % table_size as u64) as usize
}

/// Returns `true` if no two raw hashes agree modulo `modulus`.
///
/// Keys that agree modulo `p` collide under every multiplier, at both
/// levels, so a table over them cannot be built with this modulus.
pub(crate) fn residues_distinct(hashes: &[u64], modulus: u64) -> bool {
    let mut residues: Vec<u64> = hashes.iter().map(|h| h % modulus).collect();
    residues.sort_unstable();
    residues.windows(2).all(|pair| pair[0] != pair[1])
}

/// One member of the universal family: a fixed `(a, p, m)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalHash {
    multiplier: u64,
    modulus: u64,
    table_size: usize,
}

impl UniversalHash {
    /// Creates a hash function with multiplier `a`, prime `p` and table size `m`.
    pub fn new(multiplier: u64, modulus: u64, table_size: usize) -> Self {
        debug_assert!(modulus >= 2, "modulus must be a prime");
        debug_assert!(
            (1..modulus).contains(&multiplier),
            "multiplier must lie in [1, p - 1]"
        );
        debug_assert!(table_size > 0, "table size must be non-zero");
        Self {
            multiplier,
            modulus,
            table_size,
        }
    }

    /// Maps a raw hash to a slot in `[0, table_size)`.
    #[inline]
    pub fn index(&self, raw: u64) -> usize {
        hash_value(raw, self.multiplier, self.modulus, self.table_size)
    }

    /// The multiplier `a`.
    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// The prime modulus `p`.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The table size `m`.
    pub fn table_size(&self) -> usize {
        self.table_size
    }
}
