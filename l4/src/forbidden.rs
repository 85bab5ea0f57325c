//! The forbidden attack on GCM nonce reuse
//!
//! A GCM tag is `GHASH(H, A, C) + E_K(Y0)`. When two messages are
//! authenticated under the same key and nonce, `E_K(Y0)` cancels in the sum
//! of their tags:
//!
//! ```text
//! T1 + T2 = GHASH(H, A1, C1) + GHASH(H, A2, C2)
//! ```
//!
//! Both digests are polynomials in H whose coefficients are the GHASH input
//! blocks, so H is a root of
//!
//! ```text
//! f(X) = (T1 + T2) + Σ (S1ᵢ + S2ᵢ)·X^i
//! ```
//!
//! The roots of `f` are the key candidates. Each one fixes a keystream mask
//! `E_K(Y0) = GHASH(h, A1, C1) + T1`, and a third tagged message tells the
//! true H apart from extraneous roots. With H and the mask known, any message
//! under the same (key, nonce) can be tagged.

use log::{debug, warn};
use rand::Rng;

use crate::cantor::{find_zeros, linear_factor_product};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::field::{Block, GF128};
use crate::ghash::{ghash, ghash_blocks};
use crate::polynomial::{Polynomial, RingPolynomial};

/// One GCM-encrypted record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GcmMessage {
    pub associated_data: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub auth_tag: Option<Block>,
}

impl GcmMessage {
    pub fn new(associated_data: Vec<u8>, ciphertext: Vec<u8>, auth_tag: Option<Block>) -> Self {
        Self {
            associated_data,
            ciphertext,
            auth_tag,
        }
    }

    /// A record with a known authentication tag
    pub fn tagged(associated_data: &[u8], ciphertext: &[u8], auth_tag: Block) -> Self {
        Self::new(
            associated_data.to_vec(),
            ciphertext.to_vec(),
            Some(auth_tag),
        )
    }

    /// A record whose tag is to be forged
    pub fn untagged(associated_data: &[u8], ciphertext: &[u8]) -> Self {
        Self::new(associated_data.to_vec(), ciphertext.to_vec(), None)
    }

    /// GHASH input blocks of this record, highest power of H first
    pub fn ghash_blocks(&self) -> Vec<GF128> {
        ghash_blocks(&self.associated_data, &self.ciphertext)
    }

    /// GHASH digest of this record under the hash key `h`
    pub fn ghash(&self, h: GF128) -> GF128 {
        ghash(h, &self.associated_data, &self.ciphertext)
    }

    /// The tag as a field element; `position` is the 1-based message number
    /// used in the error
    fn tag(&self, position: usize) -> Result<GF128> {
        self.auth_tag
            .as_ref()
            .map(GF128::from_array)
            .ok_or(Error::MissingAuthTag(position))
    }
}

/// Hash key and keystream mask recovered from reused-nonce messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveredKey {
    /// H = E_K(0^128)
    pub auth_key: GF128,
    /// E_K(Y0) for the reused nonce
    pub keystream_mask: GF128,
}

impl RecoveredKey {
    /// Derives the mask that `auth_key` implies for a tagged message
    fn from_candidate(auth_key: GF128, message: &GcmMessage, tag: GF128) -> Self {
        Self {
            auth_key,
            keystream_mask: message.ghash(auth_key) + tag,
        }
    }

    /// Computes the tag a message would carry under the recovered key and nonce
    pub fn forge(&self, message: &GcmMessage) -> Block {
        let tag = message.ghash(self.auth_key) + self.keystream_mask;
        tag.to_block()
    }

    /// Checks a tagged message against the recovered key
    pub fn verify(&self, message: &GcmMessage) -> bool {
        message
            .auth_tag
            .is_some_and(|tag| self.forge(message) == tag)
    }
}

/// Candidate set and verification state of a single attack run
struct AttackSession {
    candidates: Vec<GF128>,
    verified: Option<RecoveredKey>,
}

impl AttackSession {
    fn new(candidates: Vec<GF128>) -> Self {
        Self {
            candidates,
            verified: None,
        }
    }

    /// Accepts the first candidate whose mask reproduces the tag of `check`
    fn verify(&mut self, reference: &GcmMessage, check: &GcmMessage) -> Result<RecoveredKey> {
        let reference_tag = reference.tag(1)?;
        let check_tag = check.tag(3)?;

        for &h in &self.candidates {
            let key = RecoveredKey::from_candidate(h, reference, reference_tag);
            let predicted = check.ghash(h) + key.keystream_mask;
            if predicted == check_tag {
                debug!("candidate {} verified against message 3", h);
                self.verified = Some(key);
                return Ok(key);
            }
        }

        warn!(
            "none of {} candidates reproduced the tag of message 3",
            self.candidates.len()
        );
        Err(Error::KeyRecoveryFailed {
            candidates: self.candidates.len(),
        })
    }

    fn forge(&self, target: &GcmMessage) -> Result<Block> {
        self.verified
            .map(|key| key.forge(target))
            .ok_or(Error::InternalInvariantViolation(
                "forging without a verified key",
            ))
    }
}

/// Builds the polynomial whose roots include the hash key of two messages
///
/// Coefficient 0 is `T1 + T2`; coefficient i >= 1 is the sum of the blocks
/// that multiply H^i in each message's GHASH. Block lists of different length
/// are aligned at the length block, which always multiplies H^1.
///
/// # Errors
/// [`Error::MissingAuthTag`] if either message has no tag
pub fn attack_polynomial(first: &GcmMessage, second: &GcmMessage) -> Result<RingPolynomial> {
    let t1 = first.tag(1)?;
    let t2 = second.tag(2)?;
    let q1 = first.ghash_blocks();
    let q2 = second.ghash_blocks();

    let power_coeff = |blocks: &[GF128], power: usize| {
        blocks
            .len()
            .checked_sub(power)
            .map_or(GF128::ZERO, |idx| blocks[idx])
    };

    let n = q1.len().max(q2.len());
    let mut coeffs = Vec::with_capacity(n + 1);
    coeffs.push(t1 + t2);
    for power in 1..=n {
        coeffs.push(power_coeff(&q1, power) + power_coeff(&q2, power));
    }

    Ok(Polynomial::new(coeffs))
}

/// Forges GCM tags from messages that reused a (key, nonce) pair
///
/// # Example
/// ```no_run
/// use l4::forbidden::{ForbiddenAttack, GcmMessage};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// # let (m1, m2, m3) = (GcmMessage::default(), GcmMessage::default(), GcmMessage::default());
/// let target = GcmMessage::untagged(b"header", b"forged ciphertext");
/// let mut rng = StdRng::seed_from_u64(1);
/// let tag = ForbiddenAttack::new().recover(&m1, &m2, &m3, &target, &mut rng)?;
/// # Ok::<(), l4::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForbiddenAttack {
    config: Config,
}

impl ForbiddenAttack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All roots of the attack polynomial of two messages in GF(2^128)
    ///
    /// # Errors
    /// [`Error::FactorizationFailed`] if there are no roots at all or the
    /// root finder runs out of attempts
    pub fn candidates<R: Rng + ?Sized>(
        &self,
        first: &GcmMessage,
        second: &GcmMessage,
        rng: &mut R,
    ) -> Result<Vec<GF128>> {
        let f = attack_polynomial(first, second)?;
        debug!("attack polynomial has degree {}", f.degree());

        let roots_only = linear_factor_product(&f)?;
        debug!(
            "{} distinct roots in GF(2^128)",
            roots_only.degree().max(0)
        );

        let candidates = find_zeros(&roots_only, rng, &self.config)?;
        if candidates.is_empty() {
            warn!("attack polynomial has no roots; messages do not share key and nonce");
            return Err(Error::FactorizationFailed { attempts: 0 });
        }
        Ok(candidates)
    }

    /// Recovers H and E_K(Y0) from three tagged messages
    ///
    /// Messages 1 and 2 build the attack polynomial; message 3 selects the
    /// true root.
    pub fn recover_key<R: Rng + ?Sized>(
        &self,
        msg1: &GcmMessage,
        msg2: &GcmMessage,
        msg3: &GcmMessage,
        rng: &mut R,
    ) -> Result<RecoveredKey> {
        msg3.tag(3)?;
        let mut session = AttackSession::new(self.candidates(msg1, msg2, rng)?);
        session.verify(msg1, msg3)
    }

    /// Forges the tag of `msg4` from three tagged messages
    ///
    /// # Errors
    /// - [`Error::MissingAuthTag`] / [`Error::UnexpectedAuthTag`] when the
    ///   tag preconditions do not hold
    /// - [`Error::FactorizationFailed`] when no candidate key could be found
    /// - [`Error::KeyRecoveryFailed`] when no candidate matches message 3
    pub fn recover<R: Rng + ?Sized>(
        &self,
        msg1: &GcmMessage,
        msg2: &GcmMessage,
        msg3: &GcmMessage,
        msg4: &GcmMessage,
        rng: &mut R,
    ) -> Result<Block> {
        if msg4.auth_tag.is_some() {
            return Err(Error::UnexpectedAuthTag);
        }
        msg3.tag(3)?;

        let mut session = AttackSession::new(self.candidates(msg1, msg2, rng)?);
        session.verify(msg1, msg3)?;
        session.forge(msg4)
    }
}
