//! Root finding over GF(2^128) with the Cantor-Zassenhaus algorithm
//!
//! The multiplicative group of GF(2^128) has order 2^128 - 1, which is
//! divisible by 3. Raising a random element to (2^128 - 1) / 3 therefore lands
//! on one of the three cube roots of unity. For a random polynomial `h`,
//! `h^((q-1)/3) - 1` vanishes at exactly those roots `r` of the target where
//! `h(r)` falls in the coset of 1, so its gcd with the target tends to pick out
//! a proper subset of the linear factors.
//!
//! [`find_zeros`] drives [`split_once`] over an explicit worklist until every
//! fragment is linear. Randomness is always injected by the caller.

use log::{debug, trace, warn};
use rand::Rng;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::field::GF128;
use crate::polynomial::{Polynomial, RingPolynomial};

/// (2^128 - 1) / 3
pub const SPLIT_EXPONENT: u128 = GF128::ORDER_MINUS_ONE / 3;

/// Draws a polynomial with `len` uniformly random coefficients
///
/// The result may have lower degree than `len - 1` if the top coefficients
/// happen to be zero.
pub fn random_polynomial<R: Rng + ?Sized>(rng: &mut R, len: usize) -> RingPolynomial {
    Polynomial::new((0..len).map(|_| GF128::new(rng.random())).collect())
}

/// Attempts one Cantor-Zassenhaus split of `p`
///
/// `f` is the polynomial being factored overall and supplies the modulus for
/// the exponentiation; `p` is a factor of `f` that still has degree > 1. Both
/// are normalized to monic first.
///
/// # Returns
/// `Some((k1, k2))` with both factors monic and `k1 * k2 == monic(p)`, or
/// `None` if this draw did not separate any roots.
///
/// # Errors
/// [`Error::InternalInvariantViolation`] if the found divisor does not divide
/// `p` exactly; arithmetic errors from the polynomial ring propagate.
pub fn split_once<R: Rng + ?Sized>(
    f: &RingPolynomial,
    p: &RingPolynomial,
    rng: &mut R,
) -> Result<Option<(RingPolynomial, RingPolynomial)>> {
    let f = f.to_monic()?;
    let p = p.to_monic()?;

    let h = random_polynomial(rng, f.len().saturating_sub(1));
    let g = &h.pow(SPLIT_EXPONENT, Some(&f))? - &RingPolynomial::one();

    let d = p.gcd(&g)?.to_monic()?;
    if d.is_one() || d == p {
        return Ok(None);
    }

    let (k2, rest) = p.div_rem(&d)?;
    if !rest.is_zero() || &d * &k2 != p {
        return Err(Error::InternalInvariantViolation(
            "split factors do not multiply back to the fragment",
        ));
    }

    Ok(Some((d, k2.to_monic()?)))
}

/// Finds the roots of a polynomial that splits into distinct linear factors
///
/// Fragments are kept on a stack; each one of degree > 1 is split until it
/// falls apart, and each linear fragment `X + c` contributes the root `c`.
/// Degree-0 fragments carry no roots, so the zero polynomial and non-zero
/// constants return an empty list.
///
/// The precondition is not checked. Use [`linear_factor_product`] first when
/// `f` may contain repeated or non-linear irreducible factors.
///
/// # Errors
/// [`Error::FactorizationFailed`] once a single fragment has failed to split
/// `config.max_split_attempts` times in a row.
pub fn find_zeros<R: Rng + ?Sized>(
    f: &RingPolynomial,
    rng: &mut R,
    config: &Config,
) -> Result<Vec<GF128>> {
    let f = f.to_monic()?;
    debug!("finding zeros of degree {} polynomial", f.degree());

    let mut pending = vec![f.clone()];
    let mut roots = Vec::with_capacity(f.len().saturating_sub(1));

    while let Some(fragment) = pending.pop() {
        if fragment.len() <= 2 {
            // Monic X + c has the root c (characteristic 2: -c = c)
            if fragment.len() == 2 {
                roots.push(fragment.coeff(0));
            }
            continue;
        }

        let mut attempts = 0;
        loop {
            if attempts >= config.max_split_attempts {
                warn!(
                    "giving up on degree {} fragment after {} attempts",
                    fragment.degree(),
                    attempts
                );
                return Err(Error::FactorizationFailed { attempts });
            }
            attempts += 1;

            match split_once(&f, &fragment, rng)? {
                Some((k1, k2)) => {
                    trace!(
                        "split degree {} into {} + {} after {} attempts",
                        fragment.degree(),
                        k1.degree(),
                        k2.degree(),
                        attempts
                    );
                    pending.push(k1);
                    pending.push(k2);
                    break;
                }
                None => trace!("attempt {} did not split", attempts),
            }
        }
    }

    debug!("found {} roots", roots.len());
    Ok(roots)
}

/// Returns the monic product of the distinct linear factors of `f`
///
/// Computes `gcd(f, X^(2^128) - X)`. Every element of GF(2^128) is a root of
/// `X^(2^128) - X` exactly once, so the gcd keeps each root of `f` once and
/// drops irreducible factors of higher degree. X^(2^128) mod f is obtained by
/// squaring X 128 times.
pub fn linear_factor_product(f: &RingPolynomial) -> Result<RingPolynomial> {
    let f = f.to_monic()?;
    if f.degree() < 1 {
        return Ok(f);
    }

    let x = RingPolynomial::monomial(GF128::ONE, 1);
    let mut frobenius = x.modulo(&f)?;
    for _ in 0..128 {
        frobenius = frobenius.mul(&frobenius).modulo(&f)?;
    }

    f.gcd(&(&frobenius - &x))?.to_monic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn from_b64(blocks: &[&str]) -> RingPolynomial {
        Polynomial::new(
            blocks
                .iter()
                .map(|b| GF128::from_block(&STANDARD.decode(b).unwrap()).unwrap())
                .collect(),
        )
    }

    fn quartic() -> RingPolynomial {
        from_b64(&[
            "epw0AAAaWEuymwoDt5cZhA==",
            "G4HAAAAAAKnZXBcAJtBZYA==",
            "9DgAAAAAAAAAxF6Rz9wSHg==",
            "AAAAAAAAAAAAAAAA3m34+A==",
            "gAAAAAAAAAAAAAAAAAAAAA==",
        ])
    }

    fn linear(root: u128) -> RingPolynomial {
        Polynomial::new(vec![GF128::new(root), GF128::ONE])
    }

    #[test]
    fn test_split_exponent_divides_group_order() {
        assert_eq!(SPLIT_EXPONENT * 3, GF128::ORDER_MINUS_ONE);
    }

    #[test]
    fn test_random_polynomial_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = random_polynomial(&mut rng, 5);
        assert!(p.len() <= 5);
        assert!(random_polynomial(&mut rng, 0).is_zero());
    }

    #[test]
    fn test_split_once_product() {
        let f = quartic();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);

        let mut split = None;
        for _ in 0..100 {
            split = split_once(&f, &f, &mut rng).unwrap();
            if split.is_some() {
                break;
            }
        }

        let (k1, k2) = split.expect("no split in 100 attempts");
        assert_eq!((&k1 * &k2).to_monic().unwrap(), f.to_monic().unwrap());
        assert_eq!(k1.leading(), Some(GF128::ONE));
        assert_eq!(k2.leading(), Some(GF128::ONE));
        assert!(k1.degree() >= 1 && k2.degree() >= 1);
    }

    #[test]
    fn test_find_zeros_vector() {
        let f = quartic();
        let mut rng = StdRng::seed_from_u64(42);

        let mut roots = find_zeros(&f, &mut rng, &Config::default()).unwrap();
        roots.sort();

        let mut expected: Vec<GF128> = from_b64(&[
            "AAAAAAAAAAAAAAAA3q2+7w==",
            "AAAAAAAAAAAAAAAAAACrzQ==",
            "AAAAAAAAAAAAAAAAAAASNA==",
            "AAAAAAAAAAAAAAAAAMD/7g==",
        ])
        .coeffs()
        .to_vec();
        expected.sort();

        assert_eq!(roots, expected);
        for root in &roots {
            assert_eq!(f.eval(root), GF128::ZERO);
        }
    }

    #[test]
    fn test_find_zeros_of_constructed_product() {
        let f = &(&linear(0x1111) * &linear(0x2222)) * &(&linear(0x3333) * &linear(0x4444));
        let mut rng = StdRng::seed_from_u64(7);

        let scaled = f.scale(GF128::new(0x99));
        let mut roots = find_zeros(&scaled, &mut rng, &Config::default()).unwrap();
        roots.sort();

        let expected: Vec<GF128> = [0x1111, 0x2222, 0x3333, 0x4444]
            .into_iter()
            .map(GF128::new)
            .collect();
        assert_eq!(roots, expected);
    }

    #[test]
    fn test_find_zeros_trivial_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = Config::default();

        assert!(find_zeros(&RingPolynomial::zero(), &mut rng, &config)
            .unwrap()
            .is_empty());
        assert!(find_zeros(&RingPolynomial::constant(GF128::new(5)), &mut rng, &config)
            .unwrap()
            .is_empty());

        // 5*X + 5*c is linear with root c
        let scaled = linear(0xabc).scale(GF128::new(5));
        let roots = find_zeros(&scaled, &mut rng, &config).unwrap();
        assert_eq!(roots, vec![GF128::new(0xabc)]);
    }

    #[test]
    fn test_find_zeros_exhausted_budget() {
        let f = quartic();
        let mut rng = StdRng::seed_from_u64(0);
        let config = Config::default().with_max_split_attempts(0);

        assert!(matches!(
            find_zeros(&f, &mut rng, &config),
            Err(Error::FactorizationFailed { attempts: 0 })
        ));
    }

    #[test]
    fn test_find_zeros_gives_up_on_irreducible_quadratic() {
        // X^2 + X + c has no roots exactly when the trace of c is one
        let f = (0..128)
            .map(|i| {
                let c = GF128::new(1u128 << i);
                Polynomial::new(vec![c, GF128::ONE, GF128::ONE])
            })
            .find(|f| linear_factor_product(f).unwrap().is_one())
            .unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let config = Config::default().with_max_split_attempts(8);

        assert!(matches!(
            find_zeros(&f, &mut rng, &config),
            Err(Error::FactorizationFailed { attempts: 8 })
        ));
    }

    #[test]
    fn test_linear_factor_product_drops_repeated_roots() {
        let a = linear(0xaaaa);
        let b = linear(0xbbbb);
        let f = &(&a * &a) * &b;

        let product = linear_factor_product(&f).unwrap();
        assert_eq!(product, &a * &b);
    }

    #[test]
    fn test_linear_factor_product_keeps_split_polynomial() {
        let f = quartic();
        assert_eq!(linear_factor_product(&f).unwrap(), f.to_monic().unwrap());
    }

    #[test]
    fn test_linear_factor_product_trivial_inputs() {
        assert!(linear_factor_product(&RingPolynomial::zero())
            .unwrap()
            .is_zero());
        assert!(linear_factor_product(&RingPolynomial::constant(GF128::new(9)))
            .unwrap()
            .is_one());
    }
}
