//! Signature verification
//!
//! Verification is a pure function of its inputs. Malformed or
//! out-of-range signatures are rejected by returning `false`; nothing here
//! returns an error or panics on attacker-controlled values.

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use crate::arith::{mod_inverse, mod_pow};
use crate::{Digest, DomainParams, Signature};

/// Intermediate values of one verification.
///
/// `w`, `u1`, `u2` and `v` are `None` when the signature was rejected before
/// they were computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// s^-1 mod q
    pub w: Option<BigUint>,
    /// H * w mod q
    pub u1: Option<BigUint>,
    /// r * w mod q
    pub u2: Option<BigUint>,
    /// ((g^u1 * y^u2) mod p) mod q
    pub v: Option<BigUint>,
    /// v == r
    pub valid: bool,
}

impl Verification {
    fn rejected() -> Self {
        Self {
            w: None,
            u1: None,
            u2: None,
            v: None,
            valid: false,
        }
    }
}

/// One (public key, digest, signature) triple for [`verify_batch`]
#[derive(Debug, Clone, Copy)]
pub struct VerifyItem<'a> {
    pub public_key: &'a BigUint,
    pub digest: &'a Digest,
    pub signature: &'a Signature,
}

/// Check `signature` over `digest` against public key `y`
pub fn verify(params: &DomainParams, y: &BigUint, digest: &Digest, signature: &Signature) -> bool {
    verify_detailed(params, y, digest, signature).valid
}

/// Like [`verify`], but also returns w, u1, u2 and v
pub fn verify_detailed(
    params: &DomainParams,
    y: &BigUint,
    digest: &Digest,
    signature: &Signature,
) -> Verification {
    let DomainParams { p, q, g } = params;
    let Signature { r, s } = signature;

    if p <= &BigUint::one() {
        debug!("Rejected: degenerate modulus");
        return Verification::rejected();
    }
    if r.is_zero() || r >= q || s.is_zero() || s >= q {
        debug!("Rejected: signature out of range");
        return Verification::rejected();
    }

    let w = match mod_inverse(s, q) {
        Some(w) => w,
        None => {
            debug!("Rejected: s has no inverse mod q");
            return Verification::rejected();
        }
    };

    let u1 = (digest.value() * &w) % q;
    let u2 = (r * &w) % q;
    let v = (mod_pow(g, &u1, p) * mod_pow(y, &u2, p)) % p % q;
    let valid = &v == r;

    debug!(valid, "Signature verified");

    Verification {
        w: Some(w),
        u1: Some(u1),
        u2: Some(u2),
        v: Some(v),
        valid,
    }
}

/// Verify many independent signatures under the same domain parameters.
///
/// With the `parallel` feature the items are checked on the rayon pool.
pub fn verify_batch(params: &DomainParams, items: &[VerifyItem<'_>]) -> Vec<bool> {
    let check =
        |item: &VerifyItem<'_>| verify(params, item.public_key, item.digest, item.signature);

    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        items.par_iter().map(check).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results = items.iter().map(check).collect();

    results
}
