//! Polynomials over a finite field
//!
//! Coefficients are stored from lowest to highest degree:
//! `[a0, a1, a2, ...] = a0 + a1*X + a2*X^2 + ...`. The stored sequence never
//! ends in a zero coefficient, and the empty sequence is the zero polynomial,
//! so `len() == degree() + 1` always holds.
//!
//! Over GF(2^128) ([`RingPolynomial`]) this is the ring the Cantor-Zassenhaus
//! root finder and the forbidden attack work in.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::{Error, Result};
use crate::field::{Block, FieldElement, GF128};

/// Polynomial with coefficients in a field F
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polynomial<F: FieldElement> {
    coeffs: Vec<F>,
}

/// Polynomial ring over GF(2^128)
pub type RingPolynomial = Polynomial<GF128>;

/// Drops trailing zero coefficients
fn trim<F: FieldElement>(coeffs: &mut Vec<F>) {
    while coeffs.last().is_some_and(|c| c.is_zero()) {
        coeffs.pop();
    }
}

impl<F: FieldElement> Polynomial<F> {
    /// Creates a polynomial from coefficients, lowest degree first
    pub fn new(mut coeffs: Vec<F>) -> Self {
        trim(&mut coeffs);
        Polynomial { coeffs }
    }

    /// The zero polynomial
    pub fn zero() -> Self {
        Polynomial { coeffs: vec![] }
    }

    /// The constant polynomial 1
    pub fn one() -> Self {
        Polynomial {
            coeffs: vec![F::one()],
        }
    }

    /// Creates a constant polynomial
    pub fn constant(coeff: F) -> Self {
        Self::new(vec![coeff])
    }

    /// Creates the monomial `coeff * X^degree`
    pub fn monomial(coeff: F, degree: usize) -> Self {
        let mut coeffs = vec![F::zero(); degree + 1];
        coeffs[degree] = coeff;
        Self::new(coeffs)
    }

    /// Degree of the polynomial (-1 for the zero polynomial)
    pub fn degree(&self) -> i32 {
        self.coeffs.len() as i32 - 1
    }

    /// Number of stored coefficients (degree + 1)
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == F::one()
    }

    /// Coefficient of X^index; zero past the end
    pub fn coeff(&self, index: usize) -> F {
        self.coeffs.get(index).copied().unwrap_or_else(F::zero)
    }

    /// All coefficients, lowest degree first
    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    /// Leading (highest-degree) coefficient, `None` for the zero polynomial
    pub fn leading(&self) -> Option<F> {
        self.coeffs.last().copied()
    }

    /// Polynomial addition
    pub fn add(&self, other: &Self) -> Self {
        let max_len = self.len().max(other.len());
        let coeffs = (0..max_len)
            .map(|i| self.coeff(i) + other.coeff(i))
            .collect();
        Polynomial::new(coeffs)
    }

    /// Polynomial subtraction
    pub fn sub(&self, other: &Self) -> Self {
        let max_len = self.len().max(other.len());
        let coeffs = (0..max_len)
            .map(|i| self.coeff(i) - other.coeff(i))
            .collect();
        Polynomial::new(coeffs)
    }

    /// Polynomial multiplication (schoolbook convolution)
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }

        let mut result = vec![F::zero(); self.len() + other.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j] + *a * *b;
            }
        }

        Polynomial::new(result)
    }

    /// Multiplies every coefficient by a field element
    pub fn scale(&self, factor: F) -> Self {
        Polynomial::new(self.coeffs.iter().map(|c| *c * factor).collect())
    }

    /// Polynomial division with remainder
    ///
    /// Returns `(quotient, remainder)` such that
    /// `self = quotient * divisor + remainder` and
    /// `remainder.degree() < divisor.degree()`.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if `divisor` is the zero polynomial
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        let divisor_lead = divisor.leading().ok_or(Error::DivisionByZero)?;
        let divisor_lead_inv = divisor_lead.inverse()?;

        if self.len() < divisor.len() {
            return Ok((Polynomial::zero(), self.clone()));
        }

        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![F::zero(); self.len() - divisor.len() + 1];

        while remainder.len() >= divisor.len() {
            let shift = remainder.len() - divisor.len();
            let factor = remainder[remainder.len() - 1] * divisor_lead_inv;
            quotient[shift] = factor;

            // Subtract factor * X^shift * divisor
            for (i, d) in divisor.coeffs.iter().enumerate() {
                remainder[shift + i] = remainder[shift + i] - *d * factor;
            }

            if !remainder[remainder.len() - 1].is_zero() {
                return Err(Error::InternalInvariantViolation(
                    "leading term survived long division step",
                ));
            }
            trim(&mut remainder);
        }

        Ok((Polynomial::new(quotient), Polynomial::new(remainder)))
    }

    /// Remainder of the division by `divisor`
    pub fn modulo(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem(divisor)?.1)
    }

    /// Quotient of the division by `divisor`
    pub fn floor_div(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem(divisor)?.0)
    }

    /// Computes `self^exp`, optionally reduced modulo `modulus`
    ///
    /// With a modulus the accumulator and the squared base are reduced after
    /// every step, which keeps the degree below `modulus.degree()` even for
    /// exponents like (2^128 - 1) / 3.
    pub fn pow(&self, mut exp: u128, modulus: Option<&Self>) -> Result<Self> {
        let reduce = |p: Self| match modulus {
            Some(m) => p.modulo(m),
            None => Ok(p),
        };

        let mut result = Polynomial::one();
        let mut base = reduce(self.clone())?;
        while exp > 0 {
            if exp & 1 == 1 {
                result = reduce(result.mul(&base))?;
            }
            exp >>= 1;
            if exp > 0 {
                base = reduce(base.mul(&base))?;
            }
        }
        Ok(result)
    }

    /// Greatest common divisor by the Euclidean algorithm
    ///
    /// The result is not normalized; call [`Self::to_monic`] for the monic gcd.
    pub fn gcd(&self, other: &Self) -> Result<Self> {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.modulo(&b)?;
            a = b;
            b = r;
        }
        Ok(a)
    }

    /// Divides by the leading coefficient so it becomes one
    ///
    /// The zero polynomial maps to itself.
    pub fn to_monic(&self) -> Result<Self> {
        match self.leading() {
            None => Ok(self.clone()),
            Some(lead) => self.floor_div(&Polynomial::constant(lead)),
        }
    }

    /// Evaluates the polynomial at `x` with Horner's method
    pub fn eval(&self, x: &F) -> F {
        self.coeffs
            .iter()
            .rev()
            .fold(F::zero(), |acc, c| acc * *x + *c)
    }
}

impl RingPolynomial {
    /// Lifts a list of GCM blocks into polynomial coefficients, lowest degree first
    pub fn from_blocks(blocks: &[Block]) -> Self {
        Polynomial::new(blocks.iter().map(GF128::from_array).collect())
    }

    /// Encodes the coefficients as GCM blocks, lowest degree first
    pub fn to_blocks(&self) -> Vec<Block> {
        self.coeffs.iter().map(GF128::to_block).collect()
    }
}

impl<F: FieldElement> Add for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: &Polynomial<F>) -> Polynomial<F> {
        Polynomial::add(self, other)
    }
}

impl<F: FieldElement> Sub for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: &Polynomial<F>) -> Polynomial<F> {
        Polynomial::sub(self, other)
    }
}

impl<F: FieldElement> Mul for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, other: &Polynomial<F>) -> Polynomial<F> {
        Polynomial::mul(self, other)
    }
}

impl<F: FieldElement + fmt::Display> fmt::Display for Polynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms: Vec<String> = self
            .coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| match i {
                0 => format!("{}", c),
                1 => format!("{}*X", c),
                _ => format!("{}*X^{}", c, i),
            })
            .collect();

        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn poly(bits: &[u128]) -> RingPolynomial {
        Polynomial::new(bits.iter().map(|&b| GF128::new(b)).collect())
    }

    fn arb_poly(max_len: usize) -> impl Strategy<Value = RingPolynomial> {
        vec(any::<u128>(), 0..max_len).prop_map(|bits| poly(&bits))
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.degree(), 1);
        assert_eq!(poly(&[0, 0]), RingPolynomial::zero());
        assert_eq!(RingPolynomial::zero().degree(), -1);
    }

    #[test]
    fn test_coeff_past_end_is_zero() {
        let p = poly(&[5, 7]);
        assert_eq!(p.coeff(1), GF128::new(7));
        assert_eq!(p.coeff(10), GF128::ZERO);
    }

    #[test]
    fn test_add_is_sub_and_cancels() {
        let a = poly(&[1, 2, 3]);
        let b = poly(&[4, 5]);
        assert_eq!(&a + &b, &a - &b);
        assert_eq!(&a + &b, poly(&[5, 7, 3]));
        assert!((&a + &a).is_zero());
    }

    #[test]
    fn test_mul_by_one_and_zero() {
        let a = poly(&[3, 9, 27]);
        assert_eq!(&a * &RingPolynomial::one(), a);
        assert!((&a * &RingPolynomial::zero()).is_zero());
    }

    #[test]
    fn test_mul_linear_factors() {
        // (X + 1)(X + 1) = X^2 + 1 in characteristic 2
        let x_plus_one = poly(&[1, 1]);
        assert_eq!(&x_plus_one * &x_plus_one, poly(&[1, 0, 1]));
    }

    #[test]
    fn test_div_by_zero_polynomial() {
        let a = poly(&[1, 2, 3]);
        assert!(matches!(
            a.div_rem(&RingPolynomial::zero()),
            Err(Error::DivisionByZero)
        ));
        assert!(matches!(
            a.modulo(&RingPolynomial::zero()),
            Err(Error::DivisionByZero)
        ));
    }

    #[test]
    fn test_div_smaller_numerator() {
        let a = poly(&[1, 2]);
        let b = poly(&[1, 2, 3]);
        let (q, r) = a.div_rem(&b).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, a);
    }

    #[test]
    fn test_exact_division() {
        let a = poly(&[3, 1]);
        let b = poly(&[0x1234, 0xabcd, 1]);
        let product = &a * &b;
        let (q, r) = product.div_rem(&b).unwrap();
        assert_eq!(q, a);
        assert!(r.is_zero());
    }

    #[test]
    fn test_to_monic() {
        let p = poly(&[0x10, 0x20, 0x40]);
        let monic = p.to_monic().unwrap();
        assert_eq!(monic.leading(), Some(GF128::ONE));
        assert_eq!(monic.scale(GF128::new(0x40)), p);
        assert!(RingPolynomial::zero().to_monic().unwrap().is_zero());
    }

    #[test]
    fn test_pow_matches_repeated_mul() {
        let a = poly(&[7, 0, 3]);
        let cube = &(&a * &a) * &a;
        assert_eq!(a.pow(3, None).unwrap(), cube);
        assert_eq!(a.pow(0, None).unwrap(), RingPolynomial::one());
    }

    #[test]
    fn test_pow_with_modulus() {
        let a = poly(&[7, 11, 3]);
        let m = poly(&[5, 1, 0, 1]);
        let plain = a.pow(5, None).unwrap().modulo(&m).unwrap();
        assert_eq!(a.pow(5, Some(&m)).unwrap(), plain);
        assert!(a.pow(1u128 << 100, Some(&m)).unwrap().degree() < m.degree());
    }

    #[test]
    fn test_gcd_of_shared_factor() {
        let common = poly(&[0xdead, 1]);
        let a = &common * &poly(&[0xbeef, 1]);
        let b = &common * &poly(&[0xcafe, 1]);
        let g = a.gcd(&b).unwrap().to_monic().unwrap();
        assert_eq!(g, common);
    }

    #[test]
    fn test_eval_horner() {
        // p(X) = 1 + X^2, p(x) over GF(2^128) at x = X
        let p = poly(&[1, 0, 1]);
        let x = GF128::X;
        assert_eq!(p.eval(&x), GF128::ONE + x * x);
        assert_eq!(RingPolynomial::zero().eval(&x), GF128::ZERO);
    }

    #[test]
    fn test_block_roundtrip() {
        let p = poly(&[1, 0x8000, 42]);
        assert_eq!(RingPolynomial::from_blocks(&p.to_blocks()), p);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_division_identity(a in arb_poly(6), b in arb_poly(4)) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.div_rem(&b).unwrap();
            prop_assert_eq!(&(&q * &b) + &r, a);
            prop_assert!(r.degree() < b.degree());
        }

        #[test]
        fn prop_degree_of_product(a in arb_poly(5), b in arb_poly(5)) {
            prop_assume!(!a.is_zero() && !b.is_zero());
            prop_assert_eq!((&a * &b).degree(), a.degree() + b.degree());
        }

        #[test]
        fn prop_gcd_divides_both(a in arb_poly(5), b in arb_poly(5)) {
            prop_assume!(!a.is_zero() || !b.is_zero());
            let g = a.gcd(&b).unwrap();
            prop_assert!(a.modulo(&g).unwrap().is_zero());
            prop_assert!(b.modulo(&g).unwrap().is_zero());
        }
    }
}
