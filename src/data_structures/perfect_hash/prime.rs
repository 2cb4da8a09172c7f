// Copyright (c) 2025 FKS Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Prime selection for the hash modulus.
//!
//! The modulus only has to be found once per table, and it stays well below
//! `2^61`, so plain trial division over a 6k±1 wheel is fast enough.

/// The largest modulus a table will ever use: the Mersenne prime `2^61 - 1`.
///
/// Keeping `p < 2^61` means `a * x` with `a, x < p` always fits in a `u128`.
pub const MAX_MODULUS: u64 = (1 << 61) - 1;

/// The modulus is chosen to be at least this many times `n²`.
///
/// Two keys whose hashes agree modulo `p` land in the same slot under every
/// multiplier, so `p` has to dwarf the number of key pairs.
const MODULUS_SPREAD: u64 = 16;

/// Returns `true` if `n` is prime.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // Every prime above 3 has the form 6k ± 1.
    let mut i = 5u64;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`.
///
/// # Panics
///
/// Panics on overflow if `n` exceeds the largest 64-bit prime
/// (`2^64 - 59`). Table construction never asks for more than
/// [`MAX_MODULUS`].
pub fn next_prime(n: u64) -> u64 {
    if n <= 2 {
        return 2;
    }

    let mut candidate = n | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Picks the modulus for a table over `key_count` keys.
///
/// The bound is `16·n²`, raised to `floor` and capped at [`MAX_MODULUS`].
pub(crate) fn modulus_for(key_count: usize, floor: u64) -> u64 {
    let n = key_count as u64;
    let spread = n.saturating_mul(n).saturating_mul(MODULUS_SPREAD);
    next_prime(spread.max(floor).min(MAX_MODULUS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, false ; "zero")]
    #[test_case(1, false ; "one")]
    #[test_case(2, true ; "two")]
    #[test_case(3, true ; "three")]
    #[test_case(4, false ; "four")]
    #[test_case(25, false ; "square of five")]
    #[test_case(49, false ; "square of seven")]
    #[test_case(7919, true ; "thousandth prime")]
    #[test_case(2_147_483_647, true ; "mersenne 31")]
    #[test_case(2_147_483_649, false ; "mersenne 31 plus two")]
    fn test_is_prime(n: u64, expected: bool) {
        assert_eq!(is_prime(n), expected);
    }

    #[test_case(0, 2)]
    #[test_case(2, 2)]
    #[test_case(3, 3)]
    #[test_case(4, 5)]
    #[test_case(9, 11)]
    #[test_case(24, 29)]
    #[test_case(7908, 7919)]
    #[test_case(1 << 31, 2_147_483_659 ; "first prime past two to the 31")]
    fn test_next_prime(n: u64, expected: u64) {
        assert_eq!(next_prime(n), expected);
    }

    #[test]
    fn test_next_prime_matches_sieve() {
        // Cross-check against a naive definition for small inputs.
        for n in 0..2_000u64 {
            let p = next_prime(n);
            assert!(p >= n);
            assert!((2..p).take_while(|d| d * d <= p).all(|d| p % d != 0));
            assert!((n.max(2)..p).all(|m| !is_prime(m)));
        }
    }

    #[test]
    fn test_modulus_respects_floor() {
        assert_eq!(modulus_for(0, 7919), 7919);
        assert_eq!(modulus_for(10, 7919), 7919);
        // 16 * 100² = 160_000, next prime is 160_001.
        assert_eq!(modulus_for(100, 7919), 160_001);
    }
}
