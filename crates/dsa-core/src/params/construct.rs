//! p and q construction

use num_bigint_dig::BigUint;
use num_traits::One;
use rand_core::RngCore;
use tracing::{debug, info, instrument};

use crate::arith::{random_range, PrimalityTest};
use crate::config::DsaConfig;
use crate::prime::{largest_prime_factor, next_prime, random_prime_of_bit_length};
use crate::{Error, Result};

/// Random q of `q_bits`, then p = k*q + 1 of exactly `p_bits`.
///
/// k is drawn from the even values for which k*q + 1 has the target bit
/// length, so every candidate is odd and correctly sized. Fails with
/// [`Error::ParameterConstructionFailed`] once `max_p_attempts` candidates
/// have been rejected.
#[instrument(level = "debug", skip_all, fields(p_bits = config.p_bits, q_bits = config.q_bits))]
pub fn bottom_up<R: RngCore + ?Sized>(
    config: &DsaConfig,
    test: &PrimalityTest,
    rng: &mut R,
) -> Result<(BigUint, BigUint)> {
    if config.q_bits < 2 || config.q_bits >= config.p_bits {
        return Err(Error::InvalidInput(format!(
            "cannot build a {}-bit p over a {}-bit q",
            config.p_bits, config.q_bits
        )));
    }

    let q = random_prime_of_bit_length(config.q_bits, test, rng, config.max_prime_attempts)?;
    debug!(q_bits = q.bits(), "q found");

    // k*q + 1 in [2^(p_bits-1), 2^p_bits - 1]  <=>  k in [k_min, k_max]
    let low = BigUint::one() << (config.p_bits - 1);
    let high = (BigUint::one() << config.p_bits) - 1u32;
    let k_min = (&low - 1u32 + &q - 1u32) / &q;
    let k_max = (&high - 1u32) / &q;

    // k = 2j keeps p odd
    let j_min = (k_min + 1u32) >> 1;
    let j_end = (k_max >> 1) + 1u32;
    if j_min >= j_end {
        return Err(Error::ParameterConstructionFailed {
            p_bits: config.p_bits,
            attempts: 0,
        });
    }

    for attempt in 1..=config.max_p_attempts {
        let k = random_range(rng, &j_min, &j_end) << 1;
        let candidate = k * &q + 1u32;
        debug_assert_eq!(candidate.bits(), config.p_bits);

        if test.check(&candidate).is_prime() {
            info!(attempt, "p = k*q + 1 found");
            return Ok((candidate, q));
        }
    }

    Err(Error::ParameterConstructionFailed {
        p_bits: config.p_bits,
        attempts: config.max_p_attempts,
    })
}

/// p = smallest prime >= 2^(p_bits-1), q = largest prime factor of p - 1.
///
/// Factoring p - 1 by trial division is only tractable for small p or for
/// p - 1 with a single large prime factor.
#[instrument(level = "debug", skip_all, fields(p_bits = config.p_bits))]
pub fn top_down(config: &DsaConfig, test: &PrimalityTest) -> Result<(BigUint, BigUint)> {
    if config.p_bits < 3 {
        return Err(Error::InvalidInput(format!(
            "cannot build a {}-bit p",
            config.p_bits
        )));
    }

    let start = BigUint::one() << (config.p_bits - 1);
    let p = next_prime(&start, test);
    debug!(p_bits = p.bits(), "p found");

    let q = largest_prime_factor(&(&p - 1u32), test, config.max_trial_divisor)?;
    info!(q_bits = q.bits(), "q = largest prime factor of p - 1");

    Ok((p, q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;
    use num_traits::Zero;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_bottom_up_sizes() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let test = PrimalityTest::default();

        for (p_bits, q_bits) in [(16usize, 8usize), (64, 32), (128, 100), (256, 160)] {
            let config = DsaConfig::with_bits(p_bits, q_bits);
            let (p, q) = bottom_up(&config, &test, &mut rng).unwrap();
            assert_eq!(p.bits(), p_bits);
            assert_eq!(q.bits(), q_bits);
            assert!((&p - 1u32).mod_floor(&q).is_zero());
            assert!(test.check(&p).is_prime());
        }
    }

    #[test]
    fn test_bottom_up_exhausted() {
        let mut rng = ChaCha20Rng::seed_from_u64(22);
        let test = PrimalityTest::default();
        let config = DsaConfig {
            max_p_attempts: 1,
            ..DsaConfig::with_bits(1024, 160)
        };

        // a single 1024-bit candidate is prime with probability ~1/355
        let mut failures = 0;
        for _ in 0..4 {
            if let Err(err) = bottom_up(&config, &test, &mut rng) {
                assert!(matches!(err, Error::ParameterConstructionFailed { attempts: 1, .. }));
                failures += 1;
            }
        }
        assert!(failures > 0);
    }

    #[test]
    fn test_top_down_small() {
        let test = PrimalityTest::default();
        let config = DsaConfig::with_bits(14, 0);

        let (p, q) = top_down(&config, &test).unwrap();
        assert_eq!(p, BigUint::from(8209u32));
        assert_eq!(q, BigUint::from(19u32));
    }

    #[test]
    fn test_top_down_divisor_bound() {
        let test = PrimalityTest::default();
        let config = DsaConfig {
            max_trial_divisor: 100,
            ..DsaConfig::with_bits(32, 0)
        };

        // p - 1 = 2 * 3 * 149 * 2402107 needs a divisor of 149
        let err = top_down(&config, &test).unwrap_err();
        assert!(matches!(err, Error::PrimeSearchExhausted { .. }));
    }

    #[test]
    fn test_top_down_rejects_tiny_p() {
        let test = PrimalityTest::default();
        for p_bits in [0usize, 1, 2] {
            let err = top_down(&DsaConfig::with_bits(p_bits, 0), &test).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
    }
}
