//! AES-128-GCM encryption for producing authentic records
//!
//! Only the mode of operation lives here; the block cipher itself is the
//! RustCrypto `aes` crate. Used to manufacture messages that share a key and
//! nonce so the forbidden attack can be exercised against real GCM output.
//!
//! Counter layout for a 96-bit nonce:
//! - `Y0 = nonce || 0x00000001` masks the tag
//! - plaintext block i is XORed with `E_K(nonce || i + 2)`

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::error::{Error, Result};
use crate::field::{Block, BLOCK_SIZE, GF128};
use crate::forbidden::GcmMessage;
use crate::ghash::ghash;

/// Nonce length in bytes
pub const NONCE_SIZE: usize = 12;

/// Output of [`AesGcm::encrypt`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub auth_tag: Block,
}

impl Sealed {
    /// Packs the ciphertext and tag together with the associated data
    pub fn into_message(self, associated_data: &[u8]) -> GcmMessage {
        GcmMessage::new(
            associated_data.to_vec(),
            self.ciphertext,
            Some(self.auth_tag),
        )
    }
}

/// AES-128-GCM under a fixed key and nonce
pub struct AesGcm {
    cipher: Aes128,
    nonce: [u8; NONCE_SIZE],
}

impl AesGcm {
    /// # Errors
    /// [`Error::InvalidKeyLength`] unless `key` is 16 bytes,
    /// [`Error::InvalidNonceLength`] unless `nonce` is 12 bytes
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        if key.len() != BLOCK_SIZE {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        let nonce: [u8; NONCE_SIZE] = nonce
            .try_into()
            .map_err(|_| Error::InvalidNonceLength(nonce.len()))?;

        Ok(Self {
            cipher: Aes128::new(GenericArray::from_slice(key)),
            nonce,
        })
    }

    fn encrypt_block(&self, input: &Block) -> Block {
        let mut block = GenericArray::clone_from_slice(input);
        self.cipher.encrypt_block(&mut block);
        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(&block);
        out
    }

    /// Counter block `nonce || counter` (32-bit big-endian counter)
    pub fn counter_block(&self, counter: u32) -> Block {
        let mut block = [0u8; BLOCK_SIZE];
        block[..NONCE_SIZE].copy_from_slice(&self.nonce);
        block[NONCE_SIZE..].copy_from_slice(&counter.to_be_bytes());
        block
    }

    /// Y0, the counter block that masks the tag
    pub fn y0(&self) -> Block {
        self.counter_block(1)
    }

    /// GHASH key H = E_K(0^128)
    pub fn auth_key(&self) -> Block {
        self.encrypt_block(&[0u8; BLOCK_SIZE])
    }

    /// E_K(Y0)
    pub fn keystream_mask(&self) -> Block {
        self.encrypt_block(&self.y0())
    }

    /// CTR-mode keystream application starting at counter 2
    ///
    /// Encryption and decryption are the same operation.
    pub fn apply_keystream(&self, data: &[u8]) -> Vec<u8> {
        data.chunks(BLOCK_SIZE)
            .zip(2u32..)
            .flat_map(|(chunk, counter)| {
                let keystream = self.encrypt_block(&self.counter_block(counter));
                chunk
                    .iter()
                    .zip(keystream)
                    .map(|(p, k)| p ^ k)
                    .collect::<Vec<u8>>()
            })
            .collect()
    }

    /// Tag over associated data and an existing ciphertext
    pub fn auth_tag(&self, associated_data: &[u8], ciphertext: &[u8]) -> Block {
        let h = GF128::from_array(&self.auth_key());
        let mask = GF128::from_array(&self.keystream_mask());
        (ghash(h, associated_data, ciphertext) + mask).to_block()
    }

    /// Encrypts `plaintext` and authenticates it together with `associated_data`
    pub fn encrypt(&self, associated_data: &[u8], plaintext: &[u8]) -> Sealed {
        let ciphertext = self.apply_keystream(plaintext);
        let auth_tag = self.auth_tag(associated_data, &ciphertext);
        Sealed {
            ciphertext,
            auth_tag,
        }
    }
}
