//! GF(2^128) as used by GHASH
//!
//! Elements are polynomials over F_2 of degree < 128, reduced modulo
//! x^128 + x^7 + x^2 + x + 1. The polynomial a_127*x^127 + ... + a_1*x + a_0
//! is stored in a `u128` where bit i holds the coefficient a_i.
//!
//! # Block encoding
//! GCM serializes field elements in a bit-reflected order: coefficient x^k
//! lives in byte k/8 at bit position 7 - (k mod 8), so the most significant
//! bit of the first byte is the coefficient of x^0.
//!
//! # Operations
//! - Addition: XOR
//! - Multiplication: shift-and-add with on-the-fly reduction
//! - Inverse: Fermat, a^(2^128 - 2)

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use super::field_trait::FieldElement;
use crate::error::{Error, Result};

/// A GCM block: 16 bytes
pub type Block = [u8; 16];

/// Size of a GCM block in bytes
pub const BLOCK_SIZE: usize = 16;

/// Low 128 bits of the reduction polynomial x^128 + x^7 + x^2 + x + 1
///
/// The x^128 term is implicit: it is the carry shifted out of a `u128`.
pub const REDUCTION_POLYNOMIAL: u128 = 0x87;

/// Element of GF(2^128)
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GF128(u128);

impl GF128 {
    /// Additive identity
    pub const ZERO: Self = Self(0);
    /// Multiplicative identity
    pub const ONE: Self = Self(1);
    /// The indeterminate x
    pub const X: Self = Self(2);
    /// Order of the multiplicative group, 2^128 - 1
    pub const ORDER_MINUS_ONE: u128 = u128::MAX;

    /// Creates an element from its coefficient bits (bit i = coefficient of x^i)
    ///
    /// Every `u128` is already reduced, so no work is needed.
    pub const fn new(bits: u128) -> Self {
        Self(bits)
    }

    /// Returns the coefficient bits
    pub const fn bits(&self) -> u128 {
        self.0
    }

    /// Decodes a 16-byte GCM block
    ///
    /// # Errors
    /// [`Error::InvalidBlockLength`] if `bytes` is not exactly 16 bytes long
    pub fn from_block(bytes: &[u8]) -> Result<Self> {
        let block: &Block = bytes
            .try_into()
            .map_err(|_| Error::InvalidBlockLength(bytes.len()))?;
        Ok(Self::from_array(block))
    }

    /// Decodes a 16-byte GCM block that is already known to have the right size
    pub fn from_array(block: &Block) -> Self {
        // Big-endian load puts byte 0 in the top bits; reflecting then moves
        // the MSB of byte 0 to bit 0.
        Self(u128::from_be_bytes(*block).reverse_bits())
    }

    /// Encodes the element as a 16-byte GCM block
    pub fn to_block(&self) -> Block {
        self.0.reverse_bits().to_be_bytes()
    }

    /// Builds an element from the exponents of its non-zero coefficients
    ///
    /// The order of `exponents` is irrelevant and repeated exponents are
    /// idempotent.
    ///
    /// # Errors
    /// [`Error::ExponentOutOfRange`] for any exponent >= 128
    pub fn from_exponents(exponents: &[u32]) -> Result<Self> {
        let mut bits = 0u128;
        for &e in exponents {
            if e >= 128 {
                return Err(Error::ExponentOutOfRange(e));
            }
            bits |= 1u128 << e;
        }
        Ok(Self(bits))
    }

    /// Returns the exponents of the non-zero coefficients in ascending order
    pub fn to_exponents(&self) -> Vec<u32> {
        (0..128).filter(|&i| (self.0 >> i) & 1 == 1).collect()
    }

    /// Carry-less multiplication modulo the reduction polynomial
    ///
    /// Walks the bits of `other` from x^0 upwards, accumulating the running
    /// multiple of `self` and folding the x^128 overflow back after every
    /// shift.
    fn multiply(&self, other: &Self) -> Self {
        let mut product = 0u128;
        let mut a = self.0;
        let b = other.0;
        for i in 0..128 {
            if (b >> i) & 1 == 1 {
                product ^= a;
            }
            let carry = a >> 127;
            a <<= 1;
            if carry == 1 {
                a ^= REDUCTION_POLYNOMIAL;
            }
        }
        Self(product)
    }
}

impl From<Block> for GF128 {
    fn from(block: Block) -> Self {
        Self::from_array(&block)
    }
}

impl From<GF128> for Block {
    fn from(elem: GF128) -> Self {
        elem.to_block()
    }
}

impl fmt::Debug for GF128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF128({})", hex::encode(self.to_block()))
    }
}

impl fmt::Display for GF128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_block()))
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Add for GF128 {
    type Output = Self;

    /// Addition in GF(2^128) is XOR
    fn add(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }
}

impl AddAssign for GF128 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for GF128 {
    type Output = Self;

    /// Subtraction is the same as addition in characteristic 2
    fn sub(self, other: Self) -> Self {
        self + other
    }
}

impl Neg for GF128 {
    type Output = Self;

    fn neg(self) -> Self {
        self
    }
}

impl Mul for GF128 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.multiply(&other)
    }
}

impl MulAssign for GF128 {
    fn mul_assign(&mut self, other: Self) {
        *self = self.multiply(&other);
    }
}

impl FieldElement for GF128 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// a^(-1) = a^(2^128 - 2) since a^(2^128 - 1) = 1 for every non-zero a
    fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self.pow(Self::ORDER_MINUS_ONE - 1))
    }
}
