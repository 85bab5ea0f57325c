//! Base64 helpers for blocks and block lists

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};
use crate::field::{Block, BLOCK_SIZE, GF128};
use crate::polynomial::RingPolynomial;

/// Encode bytes as standard base64
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64 into bytes
pub fn base64_to_bytes(s: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(s.trim())?)
}

pub fn block_to_base64(block: &Block) -> String {
    STANDARD.encode(block)
}

/// Decode a base64 string that must hold exactly one 16-byte block
pub fn block_from_base64(s: &str) -> Result<Block> {
    let bytes = base64_to_bytes(s)?;
    if bytes.len() != BLOCK_SIZE {
        return Err(Error::InvalidBlockLength(bytes.len()));
    }
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&bytes);
    Ok(block)
}

/// Decode a list of base64 blocks
pub fn blocks_from_base64<S: AsRef<str>>(blocks: &[S]) -> Result<Vec<Block>> {
    blocks.iter().map(|s| block_from_base64(s.as_ref())).collect()
}

pub fn blocks_to_base64(blocks: &[Block]) -> Vec<String> {
    blocks.iter().map(block_to_base64).collect()
}

/// Decode a field element from a base64 block
pub fn field_from_base64(s: &str) -> Result<GF128> {
    Ok(GF128::from_array(&block_from_base64(s)?))
}

/// Decode a polynomial from base64 coefficient blocks, lowest degree first
pub fn polynomial_from_base64<S: AsRef<str>>(blocks: &[S]) -> Result<RingPolynomial> {
    Ok(RingPolynomial::from_blocks(&blocks_from_base64(blocks)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_roundtrip() {
        let block = block_from_base64("CIGBAAAgAAAAAAAAAAAAAA==").unwrap();
        assert_eq!(block_to_base64(&block), "CIGBAAAgAAAAAAAAAAAAAA==");
    }

    #[test]
    fn test_block_wrong_length() {
        // 12 bytes
        assert!(matches!(
            block_from_base64("yv66vvrO263eyviI"),
            Err(Error::InvalidBlockLength(12))
        ));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(block_from_base64("***"), Err(Error::Base64(_))));
    }

    #[test]
    fn test_polynomial_from_base64() {
        let p = polynomial_from_base64(&["gAAAAAAAAAAAAAAAAAAAAA==", "AAAAAAAAAAAAAAAAAAAAAA=="])
            .unwrap();
        // Trailing zero coefficient is trimmed
        assert_eq!(p, RingPolynomial::one());
    }
}
