//! Printable views of engine outputs

use dsa_core::{Digest, DomainParams, KeyPair, Signature, Verification};
use num_bigint_dig::BigUint;
use serde::Serialize;

fn decimal(value: &BigUint) -> String {
    value.to_str_radix(10)
}

fn decimal_opt(value: &Option<BigUint>) -> Option<String> {
    value.as_ref().map(decimal)
}

#[derive(Serialize)]
pub struct ParamsReport {
    pub p: String,
    pub q: String,
    pub g: String,
    pub p_bits: usize,
    pub q_bits: usize,
}

impl ParamsReport {
    pub fn new(domain: &DomainParams) -> Self {
        Self {
            p: decimal(&domain.p),
            q: decimal(&domain.q),
            g: decimal(&domain.g),
            p_bits: domain.p_bits(),
            q_bits: domain.q_bits(),
        }
    }

    pub fn print(&self) {
        println!("Global public key components are:");
        println!("  P ({} bits): {}", self.p_bits, self.p);
        println!("  Q ({} bits): {}", self.q_bits, self.q);
        println!("  G: {}", self.g);
    }
}

#[derive(Serialize)]
pub struct SignatureReport {
    pub y: String,
    pub r: String,
    pub s: String,
}

impl SignatureReport {
    pub fn new(key: &KeyPair, signature: &Signature) -> Self {
        Self {
            y: decimal(key.public_key()),
            r: decimal(&signature.r),
            s: decimal(&signature.s),
        }
    }

    pub fn print(&self) {
        println!("Signature:");
        println!("  Y (public): {}", self.y);
        println!("  R: {}", self.r);
        println!("  S: {}", self.s);
    }
}

#[derive(Serialize)]
pub struct VerificationReport {
    pub w: Option<String>,
    pub u1: Option<String>,
    pub u2: Option<String>,
    pub v: Option<String>,
    pub valid: bool,
}

impl VerificationReport {
    pub fn new(verification: &Verification) -> Self {
        Self {
            w: decimal_opt(&verification.w),
            u1: decimal_opt(&verification.u1),
            u2: decimal_opt(&verification.u2),
            v: decimal_opt(&verification.v),
            valid: verification.valid,
        }
    }

    pub fn print(&self) {
        println!("Verification checkpoints:");
        for (name, value) in [("W", &self.w), ("U1", &self.u1), ("U2", &self.u2), ("V", &self.v)] {
            match value {
                Some(value) => println!("  {}: {}", name, value),
                None => println!("  {}: -", name),
            }
        }
        if self.valid {
            println!("Success: digital signature is verified");
        } else {
            println!("Error: incorrect digital signature");
        }
    }
}

#[derive(Serialize)]
pub struct DemoReport {
    pub params: ParamsReport,
    pub x: String,
    pub digest: String,
    pub signature: SignatureReport,
    pub verification: VerificationReport,
}

impl DemoReport {
    pub fn new(
        domain: &DomainParams,
        key: &KeyPair,
        digest: &Digest,
        signature: &Signature,
        verification: &Verification,
    ) -> Self {
        Self {
            params: ParamsReport::new(domain),
            x: decimal(key.private_key()),
            digest: digest.to_string(),
            signature: SignatureReport::new(key, signature),
            verification: VerificationReport::new(verification),
        }
    }

    pub fn print(&self) {
        println!("Simulation of Digital Signature Algorithm");
        println!();
        self.params.print();
        println!();
        println!("Secret information:");
        println!("  X (private): {}", self.x);
        println!("  H (digest): {}", self.digest);
        println!();
        self.signature.print();
        println!();
        self.verification.print();
    }
}
