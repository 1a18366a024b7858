//! Domain parameter generation
//!
//! Produces (p, q, g) with q prime, p prime, q | p - 1 and g of order q.
//! Two constructions are available, selected by [`ParamStrategy`]:
//! bottom-up (random q, then p = k*q + 1) and top-down (fixed p, then q as
//! the largest prime factor of p - 1). Bottom-up is the default and the only
//! one that scales to realistic sizes.

mod construct;
mod generator;

pub use construct::{bottom_up, top_down};
pub use generator::find_generator;

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::RngCore;
use tracing::{info, instrument};

use crate::arith::{mod_pow, PrimalityTest};
use crate::config::{DsaConfig, ParamStrategy};
use crate::{DomainParams, Error, Result};

/// Generate fresh domain parameters according to `config`
#[instrument(
    skip(rng),
    fields(p_bits = config.p_bits, q_bits = config.q_bits, strategy = ?config.strategy)
)]
pub fn generate<R: RngCore + ?Sized>(config: &DsaConfig, rng: &mut R) -> Result<DomainParams> {
    config.validate()?;
    let test = config.primality_test();

    let (p, q) = match config.strategy {
        ParamStrategy::BottomUp => bottom_up(config, &test, rng)?,
        ParamStrategy::TopDown => top_down(config, &test)?,
    };

    let g = find_generator(&p, &q, config, rng)?;
    let params = DomainParams::new(p, q, g);

    info!(
        p_bits = params.p_bits(),
        q_bits = params.q_bits(),
        "Domain parameters generated"
    );

    Ok(params)
}

impl DomainParams {
    /// Re-check every structural invariant of the parameters.
    ///
    /// Returns [`Error::InvariantViolation`] naming the first one that fails.
    pub fn validate(&self, test: &PrimalityTest) -> Result<()> {
        if !test.check(&self.q).is_prime() {
            return Err(Error::InvariantViolation("q is not prime".into()));
        }
        if !test.check(&self.p).is_prime() {
            return Err(Error::InvariantViolation("p is not prime".into()));
        }
        if !(&self.p - 1u32).mod_floor(&self.q).is_zero() {
            return Err(Error::InvariantViolation("q does not divide p - 1".into()));
        }
        if self.g <= BigUint::one() || self.g >= self.p {
            return Err(Error::InvariantViolation("g is outside (1, p)".into()));
        }
        if !mod_pow(&self.g, &self.q, &self.p).is_one() {
            return Err(Error::InvariantViolation("g^q mod p is not 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorSearch;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn assert_valid(params: &DomainParams) {
        let test = PrimalityTest::default();
        assert!(test.check(&params.p).is_prime());
        assert!(test.check(&params.q).is_prime());
        assert!((&params.p - 1u32).mod_floor(&params.q).is_zero());
        assert!(mod_pow(&params.g, &params.q, &params.p).is_one());
        assert!(!params.g.is_one());
    }

    #[test]
    fn test_generate_bottom_up() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let config = DsaConfig::with_bits(256, 64);

        let params = generate(&config, &mut rng).unwrap();
        assert_eq!(params.p_bits(), 256);
        assert_eq!(params.q_bits(), 64);
        assert_valid(&params);
        assert!(params.validate(&config.primality_test()).is_ok());
    }

    #[test]
    fn test_generate_default_sizes() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let config = DsaConfig::default();

        let params = generate(&config, &mut rng).unwrap();
        assert_eq!(params.p_bits(), 512);
        assert_eq!(params.q_bits(), 160);
        assert_valid(&params);
    }

    #[test]
    fn test_generate_top_down() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let config = DsaConfig {
            strategy: ParamStrategy::TopDown,
            ..DsaConfig::with_bits(32, 0)
        };

        let params = generate(&config, &mut rng).unwrap();
        assert_eq!(params.p, big(2_147_483_659));
        assert_eq!(params.q, big(2_402_107));
        assert_valid(&params);
    }

    #[test]
    fn test_generate_random_generator_search() {
        let mut rng = ChaCha20Rng::seed_from_u64(14);
        let config = DsaConfig {
            generator_search: GeneratorSearch::Random,
            ..DsaConfig::with_bits(128, 32)
        };

        for _ in 0..4 {
            let params = generate(&config, &mut rng).unwrap();
            assert_valid(&params);
        }
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let mut rng = ChaCha20Rng::seed_from_u64(15);
        let err = generate(&DsaConfig::with_bits(64, 64), &mut rng).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_detects_broken_params() {
        let test = PrimalityTest::default();

        let good = DomainParams::new(big(23), big(11), big(4));
        assert!(good.validate(&test).is_ok());

        let cases = [
            DomainParams::new(big(23), big(12), big(4)),
            DomainParams::new(big(25), big(11), big(4)),
            DomainParams::new(big(23), big(7), big(4)),
            DomainParams::new(big(23), big(11), big(1)),
            DomainParams::new(big(23), big(11), big(23)),
            DomainParams::new(big(23), big(11), big(5)),
        ];
        for params in cases {
            let err = params.validate(&test).unwrap_err();
            assert!(matches!(err, Error::InvariantViolation(_)), "{:?}", params);
        }
    }
}
