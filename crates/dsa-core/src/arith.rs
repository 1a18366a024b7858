//! Arbitrary-precision arithmetic adapter
//!
//! Thin layer over [`num_bigint_dig`] supplying the primitives the rest of
//! the engine is written against: modular exponentiation, modular inverse,
//! uniform sampling from a caller-owned generator and probabilistic
//! primality testing.

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, ModInverse, RandBigInt, ToBigUint};
use num_traits::{One, Zero};
use rand_core::RngCore;

/// Default number of Miller-Rabin rounds (false positive rate <= 4^-64)
pub const DEFAULT_ROUNDS: u32 = 64;

/// Largest bit length for which a passing test is a proof of primality.
///
/// Baillie-PSW has no pseudoprimes below 2^64.
const PROVEN_BITS: usize = 64;

/// Computes `base^exp mod m`.
///
/// # Panics
/// Panics if `m` is zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exp, m)
}

/// Computes `a^-1 mod m`, or `None` when no inverse exists.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m <= &BigUint::one() {
        return None;
    }

    let inverse = (a % m).mod_inverse(m)?;
    ToBigUint::to_biguint(&inverse).map(|inverse| inverse % m)
}

/// Uniform sample from `[0, bound)`.
///
/// # Panics
/// Panics if `bound` is zero.
pub fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    rng.gen_biguint_below(bound)
}

/// Uniform sample from `[lo, hi)`.
///
/// # Panics
/// Panics if `lo >= hi`.
pub fn random_range<R: RngCore + ?Sized>(rng: &mut R, lo: &BigUint, hi: &BigUint) -> BigUint {
    rng.gen_biguint_range(lo, hi)
}

/// Uniform sample from `[1, bound)`, resampling zero.
pub fn random_nonzero_below<R: RngCore + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    loop {
        let value = rng.gen_biguint_below(bound);
        if !value.is_zero() {
            return value;
        }
    }
}

/// Random integer of exactly `bits` bits (top bit forced).
pub fn random_exact_bits<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> BigUint {
    debug_assert!(bits > 0);
    rng.gen_biguint(bits) | (BigUint::one() << (bits - 1))
}

/// Outcome of a primality test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    /// Definitely composite (or < 2)
    Composite,
    /// Passed every round but too large for the test to be a proof
    ProbablyPrime,
    /// Below 2^64, where the test is exact
    Prime,
}

impl Primality {
    /// True for both `Prime` and `ProbablyPrime`
    pub fn is_prime(self) -> bool {
        !matches!(self, Primality::Composite)
    }
}

/// Miller-Rabin plus Lucas (Baillie-PSW) test with a configurable number of
/// Miller-Rabin rounds.
///
/// Witnesses are derived from the candidate itself, so the answer for a
/// given `n` never changes between runs and no generator is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimalityTest {
    rounds: u32,
}

impl Default for PrimalityTest {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl PrimalityTest {
    /// Create a test running `rounds` Miller-Rabin rounds (at least one).
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds: rounds.max(1),
        }
    }

    /// Configured round count
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Test `n`
    pub fn check(&self, n: &BigUint) -> Primality {
        if !probably_prime(n, self.rounds as usize) {
            Primality::Composite
        } else if n.bits() <= PROVEN_BITS {
            Primality::Prime
        } else {
            Primality::ProbablyPrime
        }
    }
}
