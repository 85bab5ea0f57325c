//! Error types shared by every module of the crate

use thiserror::Error;

/// Errors raised by field arithmetic, polynomial arithmetic, factorization
/// and the forbidden attack.
#[derive(Debug, Error)]
pub enum Error {
    /// A block input was not exactly 16 bytes long
    #[error("Invalid block length: expected 16 bytes, got {0}")]
    InvalidBlockLength(usize),

    /// An exponent outside `0..128` was given for a field element
    #[error("Exponent {0} is outside the field (must be < 128)")]
    ExponentOutOfRange(u32),

    /// Field inverse of zero, or polynomial division by the zero polynomial
    #[error("Division by zero")]
    DivisionByZero,

    /// The retry budget of the Cantor-Zassenhaus driver ran out, or the
    /// polynomial had no roots to find
    #[error("Factorization failed after {attempts} attempts")]
    FactorizationFailed { attempts: usize },

    /// No candidate root reproduced the tag of the verification message
    #[error("Key recovery failed: none of {candidates} candidates verified")]
    KeyRecoveryFailed { candidates: usize },

    /// An algebraic identity the algorithms rely on did not hold
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(&'static str),

    /// Message `n` (1-based) must carry an authentication tag
    #[error("Validation error: message {0} has no auth tag")]
    MissingAuthTag(usize),

    /// The forgery target already carries an authentication tag
    #[error("Validation error: forgery target must not carry an auth tag")]
    UnexpectedAuthTag,

    /// An AES-128 key was not 16 bytes long
    #[error("Invalid key length: expected 16 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// A GCM nonce was not 12 bytes long
    #[error("Invalid nonce length: expected 12 bytes, got {0}")]
    InvalidNonceLength(usize),

    /// Malformed base64 input
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A configuration document could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
