//! Finite field implementations
//!
//! - [`FieldElement`]: the trait every coefficient field implements
//! - [`GF128`]: GF(2^128) with the GHASH reduction polynomial
//!   x^128 + x^7 + x^2 + x + 1

pub mod field_trait;
pub mod gf128;

pub use field_trait::FieldElement;
pub use gf128::{Block, BLOCK_SIZE, GF128, REDUCTION_POLYNOMIAL};
