//! Prime discovery
//!
//! Three searches are offered: the next probable prime at or above a start
//! value, the largest prime factor of an integer by trial division, and a
//! random prime of an exact bit length.

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::RngCore;
use tracing::{debug, instrument};

use crate::arith::{random_exact_bits, PrimalityTest};
use crate::{Error, Result};

/// Smallest probable prime `>= start`.
///
/// Scans upward through odd candidates. Termination follows from prime
/// density, not from an attempt budget.
#[instrument(level = "debug", skip(test), fields(start_bits = start.bits()))]
pub fn next_prime(start: &BigUint, test: &PrimalityTest) -> BigUint {
    let two = BigUint::from(2u32);
    if start <= &two {
        return two;
    }

    let mut candidate = start.clone();
    if candidate.is_even() {
        candidate += 1u32;
    }

    let mut steps = 0u64;
    while !test.check(&candidate).is_prime() {
        candidate += 2u32;
        steps += 1;
    }

    debug!(steps, "next prime found");
    candidate
}

/// Largest prime factor of `n`, found by repeatedly dividing out the
/// smallest factor until the cofactor tests prime.
///
/// The primality test consumes no randomness, so the result for a given
/// `n` is reproducible. Only practical when every factor except the largest is
/// below `max_divisor`; hitting that bound is reported as
/// [`Error::PrimeSearchExhausted`].
#[instrument(level = "debug", skip(test), fields(n_bits = n.bits()))]
pub fn largest_prime_factor(
    n: &BigUint,
    test: &PrimalityTest,
    max_divisor: u64,
) -> Result<BigUint> {
    if n < &BigUint::from(2u32) {
        return Err(Error::InvalidInput(format!(
            "{} has no prime factors",
            n
        )));
    }

    let mut rest = n.clone();
    let mut divisor = 2u64;

    while !test.check(&rest).is_prime() {
        while !(&rest % divisor).is_zero() {
            divisor += 1;
            if divisor > max_divisor {
                return Err(Error::PrimeSearchExhausted {
                    attempts: max_divisor,
                    reason: format!(
                        "no factor of a {}-bit cofactor below {}",
                        rest.bits(),
                        max_divisor
                    ),
                });
            }
        }
        rest /= divisor;
    }

    debug!(largest_stripped = divisor, "cofactor is prime");
    Ok(rest)
}

/// Random probable prime with exactly `bits` bits.
///
/// Each attempt samples a fresh odd value with the top bit set.
#[instrument(level = "debug", skip(test, rng))]
pub fn random_prime_of_bit_length<R: RngCore + ?Sized>(
    bits: usize,
    test: &PrimalityTest,
    rng: &mut R,
    max_attempts: u64,
) -> Result<BigUint> {
    if bits < 2 {
        return Err(Error::InvalidInput(format!(
            "no prime has exactly {} bits",
            bits
        )));
    }

    for attempt in 1..=max_attempts {
        let candidate = random_exact_bits(rng, bits) | BigUint::one();
        if test.check(&candidate).is_prime() {
            debug!(attempt, "random prime found");
            return Ok(candidate);
        }
    }

    Err(Error::PrimeSearchExhausted {
        attempts: max_attempts,
        reason: format!("no {}-bit prime sampled", bits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_next_prime_small() {
        let test = PrimalityTest::default();

        assert_eq!(next_prime(&big(0), &test), big(2));
        assert_eq!(next_prime(&big(3), &test), big(3));
        assert_eq!(next_prime(&big(20), &test), big(23));
        assert_eq!(next_prime(&big(10_600), &test), big(10_601));
    }

    #[test]
    fn test_next_prime_above_power_of_two() {
        let test = PrimalityTest::default();

        // 2^64 + 13 is the smallest prime above 2^64
        let start = BigUint::one() << 64;
        assert_eq!(next_prime(&start, &test), &start + 13u32);
    }

    #[test]
    fn test_largest_prime_factor() {
        let test = PrimalityTest::default();

        assert_eq!(largest_prime_factor(&big(22), &test, 1 << 20).unwrap(), big(11));
        assert_eq!(largest_prime_factor(&big(10_600), &test, 1 << 20).unwrap(), big(53));
        assert_eq!(largest_prime_factor(&big(1024), &test, 1 << 20).unwrap(), big(2));
        assert_eq!(largest_prime_factor(&big(97), &test, 1 << 20).unwrap(), big(97));

        // 2^127 - 1 is prime, so 6 * (2^127 - 1) strips down to it
        let m127 = (BigUint::one() << 127) - 1u32;
        let n = &m127 * 6u32;
        assert_eq!(largest_prime_factor(&n, &test, 1 << 20).unwrap(), m127);
    }

    #[test]
    fn test_largest_prime_factor_is_deterministic() {
        let test = PrimalityTest::default();
        let n = big(2 * 3 * 3 * 7 * 1_000_003);

        let first = largest_prime_factor(&n, &test, 1 << 20).unwrap();
        for _ in 0..5 {
            assert_eq!(largest_prime_factor(&n, &test, 1 << 20).unwrap(), first);
        }
        assert_eq!(first, big(1_000_003));
    }

    #[test]
    fn test_largest_prime_factor_bounds() {
        let test = PrimalityTest::default();

        let err = largest_prime_factor(&big(1), &test, 1 << 20).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        // two large prime factors cannot be separated below the bound
        let n = big(1_000_003) * big(1_000_033);
        let err = largest_prime_factor(&n, &test, 1000).unwrap_err();
        assert!(matches!(err, Error::PrimeSearchExhausted { .. }));
    }

    #[test]
    fn test_random_prime_of_bit_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let test = PrimalityTest::default();

        for bits in [2usize, 8, 64, 160] {
            let p = random_prime_of_bit_length(bits, &test, &mut rng, 100_000).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(test.check(&p).is_prime());
        }

        let err = random_prime_of_bit_length(1, &test, &mut rng, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_random_prime_budget_exhausted() {
        let test = PrimalityTest::default();

        // a single odd 1024-bit candidate is prime with probability ~1/355
        let mut failures = 0;
        for seed in 0..8u64 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            match random_prime_of_bit_length(1024, &test, &mut rng, 1) {
                Err(err) => {
                    assert!(matches!(err, Error::PrimeSearchExhausted { attempts: 1, .. }));
                    failures += 1;
                }
                Ok(p) => assert_eq!(p.bits(), 1024),
            }
        }
        assert!(failures > 0);
    }
}
