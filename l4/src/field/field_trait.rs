//! Common interface for finite field elements
//!
//! The polynomial ring in [`crate::polynomial`] is generic over this trait, so
//! the same long division, gcd and exponentiation code runs over any field
//! that provides these operations.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::Result;

/// Trait defining the interface for finite field elements
///
/// # Laws
/// Field elements must satisfy:
/// - Additive identity: `a + zero() = a`
/// - Multiplicative identity: `a * one() = a`
/// - Additive inverse: `a + (-a) = zero()`
/// - Multiplicative inverse: `a * a.inverse()? = one()` (for non-zero a)
///
/// Division is deliberately not an operator: inverting zero is an error and
/// must surface as a [`crate::Error::DivisionByZero`] instead of a panic.
pub trait FieldElement:
    Sized
    + Copy
    + Debug
    + PartialEq
    + Eq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Returns the additive identity (zero) of the field
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) of the field
    fn one() -> Self;

    /// Checks if this element is the additive identity
    fn is_zero(&self) -> bool;

    /// Computes the multiplicative inverse of this element
    ///
    /// # Errors
    /// [`crate::Error::DivisionByZero`] if called on the zero element
    fn inverse(&self) -> Result<Self>;

    /// Computes `self / other`
    ///
    /// # Errors
    /// [`crate::Error::DivisionByZero`] if `other` is zero
    fn checked_div(&self, other: &Self) -> Result<Self> {
        Ok(*self * other.inverse()?)
    }

    /// Computes `self^exp` by square-and-multiply
    ///
    /// Bits of the exponent are consumed from least to most significant.
    /// `a.pow(0)` is one for every `a`, including zero.
    fn pow(&self, mut exp: u128) -> Self {
        let mut result = Self::one();
        let mut base = *self;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            exp >>= 1;
        }
        result
    }
}
