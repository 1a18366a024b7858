//! Key pair generation
//!
//! The private exponent x is drawn uniformly from [1, q-1] and the public
//! key is y = g^x mod p.

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};

use crate::arith::{mod_pow, random_nonzero_below};
use crate::{DomainParams, Error, KeyPair, Result};

impl KeyPair {
    /// Sample a fresh key pair for `params`
    #[instrument(skip_all, fields(q_bits = params.q_bits()))]
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(
        params: &DomainParams,
        rng: &mut R,
    ) -> Result<Self> {
        if params.q <= BigUint::one() || params.p.is_zero() {
            return Err(Error::InvariantViolation(
                "q must exceed 1 and p must be non-zero".into(),
            ));
        }

        let x = random_nonzero_below(rng, &params.q);
        let y = mod_pow(&params.g, &x, &params.p);
        debug!(y_bits = y.bits(), "Key pair generated");
        Ok(Self { x, y })
    }

    /// Rebuild a key pair from a known private exponent
    pub fn from_private(params: &DomainParams, x: BigUint) -> Result<Self> {
        if params.p.is_zero() {
            return Err(Error::InvariantViolation("p must be non-zero".into()));
        }
        if x.is_zero() || x >= params.q {
            return Err(Error::InvalidInput(
                "private key must lie in [1, q-1]".into(),
            ));
        }
        let y = mod_pow(&params.g, &x, &params.p);
        Ok(Self { x, y })
    }
}
