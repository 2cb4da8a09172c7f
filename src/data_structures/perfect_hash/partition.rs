// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! First-level partitioning of the key set into buckets.

use rand::rngs::StdRng;
use rand::Rng;

use super::config::PerfectHashConfig;
use super::hash::UniversalHash;

/// The outcome of the first-level search.
#[derive(Debug)]
pub(crate) struct Partition<T> {
    /// The chosen first-level hash.
    pub(crate) hash: UniversalHash,
    /// One entry per first-level slot, holding each item with its raw hash.
    pub(crate) buckets: Vec<Vec<(T, u64)>>,
    /// Multipliers tried before settling.
    pub(crate) attempts: usize,
    /// Size of the largest bucket under the chosen hash.
    pub(crate) max_bucket: usize,
}

/// Spreads `items` over `table_size` buckets.
///
/// Draws up to `config.first_level_attempts` multipliers from `rng` and
/// keeps the one with the smallest largest bucket, stopping as soon as a
/// candidate meets `max(config.max_bucket_size, ⌈2n / m⌉)`. Running out of
/// attempts only costs bigger second-level tables, so the best candidate
/// seen is used either way.
pub(crate) fn partition<T>(
    items: Vec<(T, u64)>,
    modulus: u64,
    table_size: usize,
    config: &PerfectHashConfig,
    rng: &mut StdRng,
) -> Partition<T> {
    let threshold = config
        .max_bucket_size
        .max(items.len().saturating_mul(2).div_ceil(table_size));

    let mut counts = vec![0usize; table_size];
    let mut best_multiplier = 1;
    let mut best_max = usize::MAX;
    let mut attempts = 0;

    while attempts < config.first_level_attempts {
        attempts += 1;
        let hash = UniversalHash::new(rng.gen_range(1..modulus), modulus, table_size);
        if let Some(max) = largest_bucket(&hash, &items, &mut counts, best_max) {
            best_multiplier = hash.multiplier();
            best_max = max;
            if max <= threshold {
                break;
            }
        }
    }

    if best_max > threshold {
        tracing::warn!(
            attempts,
            largest_bucket = best_max,
            threshold,
            "First-level search budget exhausted, using best multiplier found"
        );
    }

    let hash = UniversalHash::new(best_multiplier, modulus, table_size);
    let mut buckets: Vec<Vec<(T, u64)>> = (0..table_size).map(|_| Vec::new()).collect();
    for (item, raw) in items {
        buckets[hash.index(raw)].push((item, raw));
    }
    let max_bucket = buckets.iter().map(Vec::len).max().unwrap_or(0);

    tracing::debug!(
        multiplier = best_multiplier,
        attempts,
        max_bucket,
        table_size,
        "First-level partition chosen"
    );

    Partition {
        hash,
        buckets,
        attempts,
        max_bucket,
    }
}

/// Returns the largest bucket size under `hash`, or `None` as soon as some
/// bucket reaches `ceiling` (the candidate cannot beat the current best).
fn largest_bucket<T>(
    hash: &UniversalHash,
    items: &[(T, u64)],
    counts: &mut [usize],
    ceiling: usize,
) -> Option<usize> {
    counts.fill(0);
    let mut largest = 0;
    for (_, raw) in items {
        let count = &mut counts[hash.index(*raw)];
        *count += 1;
        if *count >= ceiling {
            return None;
        }
        largest = largest.max(*count);
    }
    Some(largest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::perfect_hash::hash::key_hash;
    use rand::SeedableRng;

    const MODULUS: u64 = 2_147_483_659;

    fn items(n: u64) -> Vec<(u64, u64)> {
        (0..n).map(|k| (k, key_hash(&k, 0))).collect()
    }

    #[test]
    fn test_every_item_lands_in_its_bucket() {
        let config = PerfectHashConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let partition = partition(items(1_000), MODULUS, 2_000, &config, &mut rng);

        assert_eq!(partition.buckets.len(), 2_000);
        let total: usize = partition.buckets.iter().map(Vec::len).sum();
        assert_eq!(total, 1_000);

        for (index, bucket) in partition.buckets.iter().enumerate() {
            for (_, raw) in bucket {
                assert_eq!(partition.hash.index(*raw), index);
            }
        }
        let largest = partition.buckets.iter().map(Vec::len).max().unwrap();
        assert_eq!(partition.max_bucket, largest);
    }

    #[test]
    fn test_early_exit_on_loose_threshold() {
        let config = PerfectHashConfig::default().with_max_bucket_size(100);
        let mut rng = StdRng::seed_from_u64(1);
        let partition = partition(items(100), MODULUS, 200, &config, &mut rng);
        assert_eq!(partition.attempts, 1);
    }

    #[test]
    fn test_budget_exhaustion_keeps_best_candidate() {
        // 500 keys over 1,000 buckets with threshold 1 is a birthday
        // problem no multiplier realistically wins.
        let config = PerfectHashConfig::default()
            .with_max_bucket_size(1)
            .with_first_level_attempts(5);
        let mut rng = StdRng::seed_from_u64(1);
        let partition = partition(items(500), MODULUS, 1_000, &config, &mut rng);

        assert_eq!(partition.attempts, 5);
        assert!(partition.max_bucket >= 2);
        let total: usize = partition.buckets.iter().map(Vec::len).sum();
        assert_eq!(total, 500);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let config = PerfectHashConfig::default();
        let first = partition(items(300), MODULUS, 600, &config, &mut StdRng::seed_from_u64(9));
        let second = partition(items(300), MODULUS, 600, &config, &mut StdRng::seed_from_u64(9));
        assert_eq!(first.hash, second.hash);
        assert_eq!(first.attempts, second.attempts);
    }

    #[test]
    fn test_empty_input() {
        let config = PerfectHashConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let partition = partition(Vec::<(u64, u64)>::new(), MODULUS, 1, &config, &mut rng);
        assert_eq!(partition.buckets.len(), 1);
        assert!(partition.buckets[0].is_empty());
        assert_eq!(partition.max_bucket, 0);
        assert_eq!(partition.attempts, 1);
    }
}
