//! GHASH implementation for Galois/Counter Mode (GCM)
//!
//! GHASH is the authentication component of GCM, operating over GF(2^128).
//!
//! # Algorithm
//!
//! Given:
//! - H: Hash key (authentication key derived from encryption key)
//! - A: Additional Authenticated Data (AAD)
//! - C: Ciphertext
//!
//! GHASH computes:
//! ```text
//! X₀ = 0
//! Xᵢ = (Xᵢ₋₁ + Sᵢ) · H    for i > 0
//! S = padWithZeros(A) || padWithZeros(C) || len(A) || len(C)
//! GHASH(H, A, C) = Xₘ₊ₙ₊₁
//! ```
//!
//! Where len(A) and len(C) are 64-bit big-endian bit lengths. Unrolled, the
//! digest is the polynomial `S₁·H^(m+n+1) + ... + Sₘ₊ₙ₊₁·H`, which is what the
//! forbidden attack exploits: [`ghash_blocks`] exposes the Sᵢ so they can be
//! used as polynomial coefficients instead of being evaluated.

use crate::field::{Block, BLOCK_SIZE, GF128};

/// Splits `data` into zero-padded 16-byte blocks
fn padded_blocks(data: &[u8]) -> impl Iterator<Item = GF128> + '_ {
    data.chunks(BLOCK_SIZE).map(|chunk| {
        let mut block: Block = [0u8; BLOCK_SIZE];
        block[..chunk.len()].copy_from_slice(chunk);
        GF128::from_array(&block)
    })
}

/// Builds the final length block `len(A) || len(C)` (bit lengths, big-endian)
pub fn length_block(associated_data: &[u8], ciphertext: &[u8]) -> GF128 {
    let a_bits = (associated_data.len() as u64) * 8;
    let c_bits = (ciphertext.len() as u64) * 8;

    let mut len_block: Block = [0u8; BLOCK_SIZE];
    len_block[0..8].copy_from_slice(&a_bits.to_be_bytes());
    len_block[8..16].copy_from_slice(&c_bits.to_be_bytes());
    GF128::from_array(&len_block)
}

/// Returns the ordered block list S that GHASH consumes
///
/// AAD blocks come first, then ciphertext blocks, then the length block.
/// The first element is multiplied by the highest power of H.
pub fn ghash_blocks(associated_data: &[u8], ciphertext: &[u8]) -> Vec<GF128> {
    let mut s_blocks: Vec<GF128> = padded_blocks(associated_data)
        .chain(padded_blocks(ciphertext))
        .collect();
    s_blocks.push(length_block(associated_data, ciphertext));
    s_blocks
}

/// GHASH authentication function
///
/// # Arguments
///
/// * `h` - Hash key (element of GF(2^128))
/// * `associated_data` - Additional authenticated data (arbitrary length)
/// * `ciphertext` - Ciphertext (arbitrary length)
///
/// # Example
///
/// ```rust
/// use l4::field::GF128;
/// use l4::ghash::ghash;
///
/// let h = GF128::from_array(&[0x42; 16]);
/// let digest = ghash(h, b"metadata", b"encrypted message");
/// assert_ne!(digest, GF128::ZERO);
/// ```
pub fn ghash(h: GF128, associated_data: &[u8], ciphertext: &[u8]) -> GF128 {
    ghash_blocks(associated_data, ciphertext)
        .into_iter()
        .fold(GF128::ZERO, |x, s_i| (x + s_i) * h)
}
