//! Core value types

use std::fmt;

use num_bigint_dig::BigUint;
use num_traits::One;
use rand_core::RngCore;

use crate::arith::random_below;

/// DSA domain parameters, shared read-only by every later stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParams {
    /// Modulus prime
    pub p: BigUint,
    /// Subgroup order, a prime divisor of p - 1
    pub q: BigUint,
    /// Element of order q in Z*_p
    pub g: BigUint,
}

impl DomainParams {
    /// Wrap already-known values without checking them.
    ///
    /// Call [`DomainParams::validate`] before signing with externally
    /// supplied parameters.
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Self {
        Self { p, q, g }
    }

    /// Bit length of p
    pub fn p_bits(&self) -> usize {
        self.p.bits()
    }

    /// Bit length of q
    pub fn q_bits(&self) -> usize {
        self.q.bits()
    }

    /// (p - 1) / q, the cofactor used when deriving g
    pub fn cofactor(&self) -> BigUint {
        (&self.p - BigUint::one()) / &self.q
    }
}

/// Key pair: secret exponent x and public value y = g^x mod p
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub(crate) x: BigUint,
    pub(crate) y: BigUint,
}

impl KeyPair {
    /// Private exponent
    pub fn private_key(&self) -> &BigUint {
        &self.x
    }

    /// Public key
    pub fn public_key(&self) -> &BigUint {
        &self.y
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("x", &"<redacted>")
            .field("y", &format_args!("{}", self.y))
            .finish()
    }
}

/// Signature (r, s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// R component
    pub r: BigUint,
    /// S component
    pub s: BigUint,
}

impl Signature {
    /// Create a new signature
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }
}

/// Integer standing in for a message digest.
///
/// No hashing happens here: callers supply the value directly, or draw a
/// random one with [`Digest::random`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(pub BigUint);

impl Digest {
    /// Random digest of at most `bits` bits
    pub fn random<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> Self {
        Digest(random_below(rng, &(BigUint::one() << bits)))
    }

    /// Underlying integer
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for Digest {
    fn from(value: BigUint) -> Self {
        Digest(value)
    }
}

impl From<u64> for Digest {
    fn from(value: u64) -> Self {
        Digest(BigUint::from(value))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
