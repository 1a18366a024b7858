//! Signing state machine

use num_bigint_dig::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, info, instrument, warn};

use super::DEFAULT_MAX_ATTEMPTS;
use crate::arith::{mod_inverse, mod_pow, random_nonzero_below};
use crate::{Digest, DomainParams, Error, KeyPair, Result, Signature};

/// Sign `digest` with the default retry budget
pub fn sign<R: RngCore + CryptoRng + ?Sized>(
    params: &DomainParams,
    key: &KeyPair,
    digest: &Digest,
    rng: &mut R,
) -> Result<Signature> {
    sign_bounded(params, key, digest, rng, DEFAULT_MAX_ATTEMPTS)
}

/// Run up to `max_attempts` signing attempts, each with a fresh nonce
#[instrument(level = "debug", skip(params, key, digest, rng))]
pub(super) fn sign_bounded<R: RngCore + CryptoRng + ?Sized>(
    params: &DomainParams,
    key: &KeyPair,
    digest: &Digest,
    rng: &mut R,
    max_attempts: u32,
) -> Result<Signature> {
    if params.q <= BigUint::from(1u32) {
        return Err(Error::InvariantViolation("q must exceed 1".into()));
    }

    for attempt in 1..=max_attempts {
        // SampleK
        let k = random_nonzero_below(rng, &params.q);

        match sign_with_nonce(params, &key.x, digest, &k) {
            Ok(signature) => {
                info!(attempt, "Signature generated");
                return Ok(signature);
            }
            Err(e) if e.is_retryable() => {
                debug!(attempt, reason = %e, "Retrying with a fresh nonce");
            }
            Err(e) => return Err(e),
        }
    }

    warn!(max_attempts, "Signing retry budget exhausted");
    Err(Error::SigningFailed {
        attempts: max_attempts,
    })
}

/// Single signing attempt with a caller-chosen nonce `k`.
///
/// Returns [`Error::DegenerateNonce`] when r or s comes out zero, and
/// [`Error::InvariantViolation`] when k has no inverse mod q (q is not
/// prime). Never reuse `k` across two signatures under the same key.
pub fn sign_with_nonce(
    params: &DomainParams,
    x: &BigUint,
    digest: &Digest,
    k: &BigUint,
) -> Result<Signature> {
    let DomainParams { p, q, g } = params;
    if p.is_zero() {
        return Err(Error::InvariantViolation("p is zero".into()));
    }
    if k.is_zero() || k >= q {
        return Err(Error::InvalidInput("nonce must lie in [1, q-1]".into()));
    }

    // ComputeR
    let r = mod_pow(g, k, p) % q;
    if r.is_zero() {
        return Err(Error::DegenerateNonce("r"));
    }

    // ComputeInverse
    let k_inv = mod_inverse(k, q).ok_or_else(|| {
        Error::InvariantViolation("nonce has no inverse mod q; q is not prime".into())
    })?;

    // ComputeS
    let s = (k_inv * (digest.value() + x * &r)) % q;
    if s.is_zero() {
        return Err(Error::DegenerateNonce("s"));
    }

    Ok(Signature::new(r, s))
}
