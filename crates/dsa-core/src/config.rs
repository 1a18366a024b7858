//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::arith::{PrimalityTest, DEFAULT_ROUNDS};
use crate::{Error, Result};

/// How p and q are constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamStrategy {
    /// Random q of `q_bits`, then p = k*q + 1 of `p_bits`
    #[default]
    BottomUp,
    /// p = next prime >= 2^(p_bits-1), q = largest prime factor of p - 1
    TopDown,
}

/// How the h in g = h^((p-1)/q) mod p is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorSearch {
    /// h = 2, 3, 4, ...
    #[default]
    Deterministic,
    /// h uniform in [2, p-2]
    Random,
}

/// Bit lengths, round counts and attempt budgets for every stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DsaConfig {
    /// Target bit length of p
    pub p_bits: usize,
    /// Target bit length of q (ignored by the top-down strategy)
    pub q_bits: usize,
    /// Miller-Rabin rounds per primality test
    pub primality_rounds: u32,
    /// p/q construction
    pub strategy: ParamStrategy,
    /// Generator search
    pub generator_search: GeneratorSearch,
    /// Candidates tried when sampling a prime of fixed bit length
    pub max_prime_attempts: u64,
    /// k values tried when searching p = k*q + 1
    pub max_p_attempts: u64,
    /// h values tried when deriving g
    pub max_generator_attempts: u64,
    /// Nonces tried per signature
    pub max_sign_attempts: u32,
    /// Largest trial divisor used when factoring p - 1
    pub max_trial_divisor: u64,
}

impl Default for DsaConfig {
    fn default() -> Self {
        Self {
            p_bits: 512,
            q_bits: 160,
            primality_rounds: DEFAULT_ROUNDS,
            strategy: ParamStrategy::BottomUp,
            generator_search: GeneratorSearch::Deterministic,
            max_prime_attempts: 100_000,
            max_p_attempts: 4096,
            max_generator_attempts: 1000,
            max_sign_attempts: 100,
            max_trial_divisor: 1 << 24,
        }
    }
}

impl DsaConfig {
    /// Create a configuration with the given bit lengths and default budgets
    pub fn with_bits(p_bits: usize, q_bits: usize) -> Self {
        Self {
            p_bits,
            q_bits,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be satisfied
    pub fn validate(&self) -> Result<()> {
        if self.p_bits < 3 {
            return Err(Error::Config("p_bits must be at least 3".into()));
        }
        if self.strategy == ParamStrategy::BottomUp {
            if self.q_bits < 2 {
                return Err(Error::Config("q_bits must be at least 2".into()));
            }
            if self.q_bits >= self.p_bits {
                return Err(Error::Config(format!(
                    "q_bits ({}) must be smaller than p_bits ({})",
                    self.q_bits, self.p_bits
                )));
            }
        }
        if self.primality_rounds == 0 {
            return Err(Error::Config("primality_rounds must be positive".into()));
        }
        if self.max_prime_attempts == 0
            || self.max_p_attempts == 0
            || self.max_generator_attempts == 0
            || self.max_sign_attempts == 0
        {
            return Err(Error::Config("attempt budgets must be positive".into()));
        }
        if self.max_trial_divisor < 2 {
            return Err(Error::Config("max_trial_divisor must be at least 2".into()));
        }
        Ok(())
    }

    /// Primality test configured with `primality_rounds`
    pub fn primality_test(&self) -> PrimalityTest {
        PrimalityTest::new(self.primality_rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DsaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.p_bits, 512);
        assert_eq!(config.q_bits, 160);
    }

    #[test]
    fn test_partial_json() {
        let config =
            DsaConfig::from_json_str(r#"{ "p_bits": 256, "q_bits": 64, "strategy": "top-down" }"#)
                .unwrap();
        assert_eq!(config.p_bits, 256);
        assert_eq!(config.q_bits, 64);
        assert_eq!(config.strategy, ParamStrategy::TopDown);
        assert_eq!(config.max_sign_attempts, 100);
    }

    #[test]
    fn test_rejects_unsatisfiable_bits() {
        let err = DsaConfig::with_bits(160, 160).validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = DsaConfig::from_json_str(r#"{ "max_sign_attempts": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        assert!(DsaConfig::from_json_str("not json").is_err());
    }
}
