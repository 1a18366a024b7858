//! Error types for DSA operations

use thiserror::Error;

/// Result type alias for DSA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating parameters, keys or signatures
#[derive(Debug, Error)]
pub enum Error {
    /// No prime satisfied the bit-length/start constraints within the attempt budget
    #[error("Prime search exhausted after {attempts} attempts: {reason}")]
    PrimeSearchExhausted { attempts: u64, reason: String },

    /// No p = k*q + 1 of the target size was found
    #[error("Parameter construction failed: no {p_bits}-bit p found after {attempts} attempts")]
    ParameterConstructionFailed { p_bits: usize, attempts: u64 },

    /// Every tried h produced g = 1
    #[error("Generator not found after {attempts} candidates")]
    GeneratorNotFound { attempts: u64 },

    /// A single signing attempt produced r = 0 or s = 0
    #[error("Degenerate nonce: {0} is zero")]
    DegenerateNonce(&'static str),

    /// The signing retry budget ran out
    #[error("Signing failed after {attempts} attempts")]
    SigningFailed { attempts: u32 },

    /// A structural invariant of the domain parameters does not hold
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Caller supplied an out-of-range value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl Error {
    /// Whether the failure is a retry signal local to one signing attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::DegenerateNonce(_))
    }
}
