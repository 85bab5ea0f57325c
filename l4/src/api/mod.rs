//! Block-oriented library surface
//!
//! Every field element crosses this boundary as a 16-byte GCM block and
//! every polynomial as a list of blocks (lowest degree first). A dispatch
//! layer (JSON, CLI) only has to decode base64 and call these functions.
//!
//! # Structure
//! - `helpers`: base64 encoding of bytes, blocks and block lists
//! - `types`: serializable message records

pub mod helpers;
pub mod types;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::Result;
use crate::field::{Block, GF128};
use crate::forbidden::{ForbiddenAttack, GcmMessage};
use crate::polynomial::RingPolynomial;

pub use helpers::{
    base64_to_bytes, block_from_base64, block_to_base64, blocks_from_base64, blocks_to_base64,
    bytes_to_base64, field_from_base64, polynomial_from_base64,
};
pub use types::MessageRecord;

/// Decode a block into a field element
pub fn field_from_block(bytes: &[u8]) -> Result<GF128> {
    GF128::from_block(bytes)
}

pub fn field_to_block(elem: GF128) -> Block {
    elem.to_block()
}

/// Build a field element from the exponents of its set coefficients
pub fn field_from_exponents(exponents: &[u32]) -> Result<GF128> {
    GF128::from_exponents(exponents)
}

/// Exponents of the set coefficients, ascending and without duplicates
pub fn field_to_exponents(elem: GF128) -> Vec<u32> {
    elem.to_exponents()
}

fn binary_op<F>(a: &[Block], b: &[Block], op: F) -> Result<Vec<Block>>
where
    F: FnOnce(&RingPolynomial, &RingPolynomial) -> Result<RingPolynomial>,
{
    let a = RingPolynomial::from_blocks(a);
    let b = RingPolynomial::from_blocks(b);
    Ok(op(&a, &b)?.to_blocks())
}

pub fn poly_add(a: &[Block], b: &[Block]) -> Result<Vec<Block>> {
    binary_op(a, b, |a, b| Ok(a + b))
}

pub fn poly_mul(a: &[Block], b: &[Block]) -> Result<Vec<Block>> {
    binary_op(a, b, |a, b| Ok(a * b))
}

/// Quotient of polynomial long division
pub fn poly_div(a: &[Block], b: &[Block]) -> Result<Vec<Block>> {
    binary_op(a, b, |a, b| a.floor_div(b))
}

/// Remainder of polynomial long division
pub fn poly_mod(a: &[Block], b: &[Block]) -> Result<Vec<Block>> {
    binary_op(a, b, |a, b| a.modulo(b))
}

/// Greatest common divisor by the Euclidean algorithm, not normalized
pub fn poly_gcd(a: &[Block], b: &[Block]) -> Result<Vec<Block>> {
    binary_op(a, b, |a, b| a.gcd(b))
}

pub fn poly_pow(base: &[Block], exponent: u128, modulo: Option<&[Block]>) -> Result<Vec<Block>> {
    let base = RingPolynomial::from_blocks(base);
    let modulo = modulo.map(RingPolynomial::from_blocks);
    Ok(base.pow(exponent, modulo.as_ref())?.to_blocks())
}

/// GHASH under a hash key given as a block
pub fn ghash(key: &[u8], associated_data: &[u8], ciphertext: &[u8]) -> Result<Block> {
    let h = GF128::from_block(key)?;
    let digest = crate::ghash::ghash(h, associated_data, ciphertext);
    Ok(digest.to_block())
}

/// Forge the tag of `msg4` from three tagged messages under the same key and nonce
///
/// A fresh generator seeded from the operating system drives the root finder.
pub fn forbidden_attack_recover(
    msg1: &GcmMessage,
    msg2: &GcmMessage,
    msg3: &GcmMessage,
    msg4: &GcmMessage,
) -> Result<Block> {
    forbidden_attack_recover_with(&Config::default(), msg1, msg2, msg3, msg4)
}

/// [`forbidden_attack_recover`] with an explicit configuration
pub fn forbidden_attack_recover_with(
    config: &Config,
    msg1: &GcmMessage,
    msg2: &GcmMessage,
    msg3: &GcmMessage,
    msg4: &GcmMessage,
) -> Result<Block> {
    let mut rng = StdRng::from_os_rng();
    let attack = ForbiddenAttack::with_config(*config);
    attack.recover(msg1, msg2, msg3, msg4, &mut rng)
}
