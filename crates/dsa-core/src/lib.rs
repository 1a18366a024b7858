//! # DSA Core
//!
//! Arbitrary-precision Digital Signature Algorithm engine.
//!
//! This crate provides:
//! - Prime discovery (next prime, largest prime factor, random prime of a bit length)
//! - Domain parameter generation (p, q, g)
//! - Key pair generation
//! - Signing with bounded nonce retries
//! - Verification
//!
//! Every stage takes an explicit, caller-owned random number generator, so a
//! seeded generator gives reproducible runs.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dsa_core::{params, sign, verify, Digest, DsaConfig, KeyPair};
//!
//! let domain = params::generate(&DsaConfig::default(), &mut rng)?;
//! let key = KeyPair::generate(&domain, &mut rng)?;
//! let digest = Digest::random(&mut rng, domain.p_bits());
//! let signature = sign::sign(&domain, &key, &digest, &mut rng)?;
//! assert!(verify::verify(&domain, key.public_key(), &digest, &signature));
//! ```
//!
//! This is not a hardened implementation: arithmetic is not constant-time
//! and digests are plain integers, not hash outputs.

pub mod arith;
pub mod config;
pub mod error;
pub mod keygen;
pub mod params;
pub mod prime;
pub mod sign;
pub mod types;
pub mod verify;

pub use config::{DsaConfig, GeneratorSearch, ParamStrategy};
pub use error::{Error, Result};
pub use sign::Signer;
pub use types::{Digest, DomainParams, KeyPair, Signature};
pub use verify::{Verification, VerifyItem};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
