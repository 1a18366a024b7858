//! Generator derivation

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::RngCore;
use tracing::{debug, instrument};

use crate::arith::{mod_pow, random_range};
use crate::config::{DsaConfig, GeneratorSearch};
use crate::{Error, Result};

/// Derive g = h^((p-1)/q) mod p for the first h giving g != 1.
///
/// Candidates for h follow `config.generator_search`; at most
/// `config.max_generator_attempts` are tried.
#[instrument(level = "debug", skip_all, fields(search = ?config.generator_search))]
pub fn find_generator<R: RngCore + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    config: &DsaConfig,
    rng: &mut R,
) -> Result<BigUint> {
    let p_minus_one = p - 1u32;
    let (exponent, remainder) = p_minus_one.div_rem(q);
    if !remainder.is_zero() {
        return Err(Error::InvariantViolation("q does not divide p - 1".into()));
    }

    // h ranges over [2, p-2]
    let h_lo = BigUint::from(2u32);
    let h_end = &p_minus_one;
    if &h_lo >= h_end {
        return Err(Error::GeneratorNotFound { attempts: 0 });
    }

    for attempt in 1..=config.max_generator_attempts {
        let h = match config.generator_search {
            GeneratorSearch::Random => random_range(rng, &h_lo, h_end),
            GeneratorSearch::Deterministic => {
                let h = &h_lo + (attempt - 1);
                if &h >= h_end {
                    return Err(Error::GeneratorNotFound {
                        attempts: attempt - 1,
                    });
                }
                h
            }
        };

        let g = mod_pow(&h, &exponent, p);
        if !g.is_one() {
            debug!(attempt, h = %h, "generator found");
            return Ok(g);
        }
    }

    Err(Error::GeneratorNotFound {
        attempts: config.max_generator_attempts,
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
    fn test_deterministic_toy_group() {
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        let config = DsaConfig::default();

        // (23 - 1) / 11 = 2, so h = 2 gives g = 4
        let g = find_generator(&big(23), &big(11), &config, &mut rng).unwrap();
        assert_eq!(g, big(4));
    }

    #[test]
    fn test_skips_trivial_candidates() {
        let mut rng = ChaCha20Rng::seed_from_u64(32);
        let config = DsaConfig::default();

        // p = 7, q = 3: exponent 2; 2^2 = 4 != 1 on the first try
        assert_eq!(find_generator(&big(7), &big(3), &config, &mut rng).unwrap(), big(4));

        // p = 7, q = 2: exponent 3; 2^3 = 1 mod 7, 3^3 = 6 mod 7
        assert_eq!(find_generator(&big(7), &big(2), &config, &mut rng).unwrap(), big(6));
    }

    #[test]
    fn test_generator_not_found() {
        let mut rng = ChaCha20Rng::seed_from_u64(33);
        let config = DsaConfig {
            max_generator_attempts: 1,
            ..DsaConfig::default()
        };

        // only h = 2 is tried and 2^3 = 1 mod 7
        let err = find_generator(&big(7), &big(2), &config, &mut rng).unwrap_err();
        assert!(matches!(err, Error::GeneratorNotFound { attempts: 1 }));

        // p = 3 leaves no h in [2, p-2]
        let err = find_generator(&big(3), &big(2), &DsaConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::GeneratorNotFound { .. }));
    }

    #[test]
    fn test_rejects_non_divisor() {
        let mut rng = ChaCha20Rng::seed_from_u64(34);
        let err = find_generator(&big(23), &big(7), &DsaConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_random_search_has_order_q() {
        let mut rng = ChaCha20Rng::seed_from_u64(35);
        let config = DsaConfig {
            generator_search: GeneratorSearch::Random,
            ..DsaConfig::default()
        };

        for _ in 0..16 {
            let g = find_generator(&big(23), &big(11), &config, &mut rng).unwrap();
            assert!(!g.is_one());
            assert!(mod_pow(&g, &big(11), &big(23)).is_one());
        }
    }
}
