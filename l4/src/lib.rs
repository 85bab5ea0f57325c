//! GCM Cryptanalysis Library (L4)
//!
//! Arithmetic and attacks around the GHASH authenticator of AES-GCM:
//! the field GF(2^128), polynomials over it, Cantor-Zassenhaus root finding,
//! and the forbidden attack that forges tags once a (key, nonce) pair has
//! been reused.
//!
//! # Example
//!
//! ```rust
//! use l4::aes_gcm::AesGcm;
//! use l4::forbidden::{ForbiddenAttack, GcmMessage};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let gcm = AesGcm::new(&[7u8; 16], &[9u8; 12])?;
//! let m1 = gcm.encrypt(b"", b"first message").into_message(b"");
//! let m2 = gcm.encrypt(b"hdr", b"second message, a bit longer").into_message(b"hdr");
//! let m3 = gcm.encrypt(b"", b"third").into_message(b"");
//!
//! let target = GcmMessage::untagged(b"", b"forged");
//! let mut rng = StdRng::seed_from_u64(2024);
//! let tag = ForbiddenAttack::new().recover(&m1, &m2, &m3, &target, &mut rng)?;
//! assert_eq!(tag, gcm.auth_tag(b"", b"forged"));
//! # Ok::<(), l4::Error>(())
//! ```

/// AES-128-GCM encryption used to produce authentic records
pub mod aes_gcm;
/// Block-oriented library surface and base64 helpers
pub mod api;
/// Cantor-Zassenhaus root finding over GF(2^128)
pub mod cantor;
/// Runtime configuration
pub mod config;
/// Crate error type
pub mod error;
/// Finite field implementations
pub mod field;
/// Forbidden attack on GCM nonce reuse
pub mod forbidden;
/// GHASH evaluation
pub mod ghash;
/// Polynomial ring over a finite field
pub mod polynomial;

pub use config::Config;
pub use error::{Error, Result};
pub use field::{Block, FieldElement, GF128};
pub use forbidden::{ForbiddenAttack, GcmMessage, RecoveredKey};
pub use polynomial::{Polynomial, RingPolynomial};
