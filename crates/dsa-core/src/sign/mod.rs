//! Signature generation
//!
//! One signing attempt walks SampleK -> ComputeR -> ComputeInverse ->
//! ComputeS. A zero r or s sends the attempt back to SampleK; the number of
//! attempts is capped by [`Signer`].

mod signer;

pub use signer::{sign, sign_with_nonce};

use rand_core::{CryptoRng, RngCore};

use crate::config::DsaConfig;
use crate::{Digest, DomainParams, KeyPair, Result, Signature};

/// Default cap on nonces tried per signature
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Signer with a bounded retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer {
    max_attempts: u32,
}

impl Default for Signer {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Signer {
    /// Create a signer that gives up after `max_attempts` nonces
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Signer using `config.max_sign_attempts`
    pub fn from_config(config: &DsaConfig) -> Self {
        Self::new(config.max_sign_attempts)
    }

    /// Retry budget
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sign `digest` with `key`, drawing nonces from `rng`
    pub fn sign<R: RngCore + CryptoRng + ?Sized>(
        &self,
        params: &DomainParams,
        key: &KeyPair,
        digest: &Digest,
        rng: &mut R,
    ) -> Result<Signature> {
        signer::sign_bounded(params, key, digest, rng, self.max_attempts)
    }
}
