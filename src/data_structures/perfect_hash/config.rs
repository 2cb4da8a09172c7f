// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Construction parameters for the perfect hash map.

use serde::{Deserialize, Serialize};

use super::error::{PerfectHashError, Result};
use super::prime::MAX_MODULUS;

/// Configuration for building a [`PerfectHashMap`](super::PerfectHashMap).
///
/// Every knob tunes construction only. Once a map is built its lookups
/// cost the same whatever these values were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfectHashConfig {
    /// Seed for the multiplier search and the initial raw-hash seed.
    /// Equal seeds over equal key sets build identical tables.
    pub seed: u64,

    /// The first-level table holds `first_level_ratio * n` buckets.
    pub first_level_ratio: usize,

    /// Number of random first-level multipliers to try.
    pub first_level_attempts: usize,

    /// The first-level search stops early once no bucket holds more keys
    /// than this.
    pub max_bucket_size: usize,

    /// Number of random second-level multipliers to try per bucket before
    /// falling back to an exhaustive scan. Zero makes every bucket use the
    /// deterministic scan.
    pub second_level_attempts: usize,

    /// Lower bound for the prime modulus.
    pub prime_floor: u64,

    /// How many times construction may reseed the raw hash when two keys
    /// cannot be told apart under the current one.
    pub max_rehash_attempts: usize,
}

impl PerfectHashConfig {
    /// Creates a new configuration with default values.
    ///
    /// Default values:
    /// - seed: 0x5EED_F0C5
    /// - first_level_ratio: 2
    /// - first_level_attempts: 1,000
    /// - max_bucket_size: 3
    /// - second_level_attempts: 10,000
    /// - prime_floor: 2^31
    /// - max_rehash_attempts: 8
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed for the multiplier search.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of first-level buckets per key.
    pub fn with_first_level_ratio(mut self, ratio: usize) -> Self {
        self.first_level_ratio = ratio;
        self
    }

    /// Sets the first-level search budget.
    pub fn with_first_level_attempts(mut self, attempts: usize) -> Self {
        self.first_level_attempts = attempts;
        self
    }

    /// Sets the bucket size that ends the first-level search early.
    pub fn with_max_bucket_size(mut self, max_bucket_size: usize) -> Self {
        self.max_bucket_size = max_bucket_size;
        self
    }

    /// Sets the per-bucket random search budget.
    pub fn with_second_level_attempts(mut self, attempts: usize) -> Self {
        self.second_level_attempts = attempts;
        self
    }

    /// Sets the lower bound for the prime modulus.
    pub fn with_prime_floor(mut self, prime_floor: u64) -> Self {
        self.prime_floor = prime_floor;
        self
    }

    /// Sets how many times construction may reseed the raw hash.
    pub fn with_max_rehash_attempts(mut self, attempts: usize) -> Self {
        self.max_rehash_attempts = attempts;
        self
    }

    /// Checks that the configuration can drive a construction.
    ///
    /// # Errors
    ///
    /// Returns [`PerfectHashError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if self.first_level_ratio == 0 {
            return Err(PerfectHashError::InvalidConfiguration(
                "first_level_ratio must be greater than 0".to_string(),
            ));
        }
        if self.first_level_attempts == 0 {
            return Err(PerfectHashError::InvalidConfiguration(
                "first_level_attempts must be greater than 0".to_string(),
            ));
        }
        if self.max_bucket_size == 0 {
            return Err(PerfectHashError::InvalidConfiguration(
                "max_bucket_size must be greater than 0".to_string(),
            ));
        }
        if !(2..=MAX_MODULUS).contains(&self.prime_floor) {
            return Err(PerfectHashError::InvalidConfiguration(format!(
                "prime_floor must lie in [2, {MAX_MODULUS}], got {}",
                self.prime_floor
            )));
        }
        Ok(())
    }
}

impl Default for PerfectHashConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_F0C5,
            first_level_ratio: 2,
            first_level_attempts: 1_000,
            max_bucket_size: 3,
            second_level_attempts: 10_000,
            prime_floor: 1 << 31,
            max_rehash_attempts: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PerfectHashConfig::default();
        assert_eq!(config.seed, 0x5EED_F0C5);
        assert_eq!(config.first_level_ratio, 2);
        assert_eq!(config.first_level_attempts, 1_000);
        assert_eq!(config.max_bucket_size, 3);
        assert_eq!(config.second_level_attempts, 10_000);
        assert_eq!(config.prime_floor, 1 << 31);
        assert_eq!(config.max_rehash_attempts, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PerfectHashConfig::new()
            .with_seed(42)
            .with_first_level_ratio(4)
            .with_first_level_attempts(10)
            .with_max_bucket_size(2)
            .with_second_level_attempts(0)
            .with_prime_floor(7919)
            .with_max_rehash_attempts(1);

        assert_eq!(config.seed, 42);
        assert_eq!(config.first_level_ratio, 4);
        assert_eq!(config.first_level_attempts, 10);
        assert_eq!(config.max_bucket_size, 2);
        assert_eq!(config.second_level_attempts, 0);
        assert_eq!(config.prime_floor, 7919);
        assert_eq!(config.max_rehash_attempts, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            PerfectHashConfig::new().with_first_level_ratio(0),
            PerfectHashConfig::new().with_first_level_attempts(0),
            PerfectHashConfig::new().with_max_bucket_size(0),
            PerfectHashConfig::new().with_prime_floor(1),
            PerfectHashConfig::new().with_prime_floor(MAX_MODULUS + 1),
        ];
        for config in cases {
            assert!(
                matches!(
                    config.validate(),
                    Err(PerfectHashError::InvalidConfiguration(_))
                ),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: PerfectHashConfig = serde_json::from_str(r#"{ "seed": 9 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.first_level_attempts, 1_000);
    }
}
