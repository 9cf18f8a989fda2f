// RSA Big Integer Operations
// Number theory for key generation and encryption, on top of num-bigint

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
///
/// Square-and-multiply, walking the exponent from its most significant bit
/// down. `modulus` must be non-zero.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let base = base % modulus;
    let mut result = RsaBigInt::one();

    for bit in exp.to_radix_be(2) {
        result = (&result * &result) % modulus;
        if bit == 1 {
            result = (&result * &base) % modulus;
        }
    }

    result
}

/// Greatest common divisor (iterative Euclid)
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }

    a
}

/// Extended Euclidean Algorithm
///
/// For `0 < a < b`, returns `(g, x)` with `g = gcd(a, b)` and
/// `a * x ≡ g (mod b)`, `x` in `[0, b)`. The coefficient for `b` is not tracked.
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> Result<(RsaBigInt, RsaBigInt)> {
    if a.is_zero() || a >= b {
        return Err(Error::Precondition {
            context: format!("extended_gcd needs 0 < a < b, got a={} b={}", a, b),
        });
    }

    let modulus = BigInt::from(b.clone());
    let (mut r0, mut r1) = (modulus.clone(), BigInt::from(a.clone()));
    let (mut x0, mut x1) = (BigInt::zero(), BigInt::one());

    while !r1.is_zero() {
        let quotient = &r0 / &r1;

        let next_r = &r0 - &quotient * &r1;
        r0 = std::mem::replace(&mut r1, next_r);

        let next_x = &x0 - &quotient * &x1;
        x0 = std::mem::replace(&mut x1, next_x);
    }

    // The remainder chain starts from two positive values, so r0 is positive
    let (_, gcd) = r0.into_parts();
    let (sign, x) = x0.mod_floor(&modulus).into_parts();
    debug_assert_ne!(sign, Sign::Minus);

    Ok((gcd, x))
}

/// Compute modular inverse: a^(-1) mod m
/// Fails when a and m are not coprime
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    let not_invertible = || Error::NotInvertible {
        value: a.to_string(),
        modulus: m.to_string(),
    };

    if m.is_zero() {
        return Err(not_invertible());
    }
    if m.is_one() {
        return Ok(RsaBigInt::zero());
    }

    let reduced = a % m;
    if reduced.is_zero() {
        return Err(not_invertible());
    }

    let (gcd, x) = extended_gcd(&reduced, m)?;
    if !gcd.is_one() {
        return Err(not_invertible());
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    #[rstest]
    #[case::textbook(5, 3, 13, 8)]
    #[case::small(3, 5, 7, 5)]
    #[case::zero_exponent(9, 0, 11, 1)]
    #[case::unit_modulus(9, 4, 1, 0)]
    #[case::base_above_modulus(100, 2, 7, 4)]
    fn test_mod_pow(#[case] base: u64, #[case] exp: u64, #[case] modulus: u64, #[case] expected: u64) {
        let result = mod_pow(&from_u64(base), &from_u64(exp), &from_u64(modulus));
        assert_eq!(result, from_u64(expected));
    }

    #[test]
    fn test_mod_pow_matches_num_bigint() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let base = from_u64(rng.gen());
            let exp = from_u64(rng.gen_range(0..1_000_000));
            let modulus = from_u64(rng.gen_range(2..u64::MAX));
            assert_eq!(mod_pow(&base, &exp, &modulus), base.modpow(&exp, &modulus));
        }
    }

    #[test]
    fn test_mod_pow_beyond_machine_words() {
        // (2^127 - 1) is prime; Fermat: a^(p-1) ≡ 1 (mod p)
        let p = (from_u64(1) << 127usize) - 1u8;
        let exp = &p - 1u8;
        assert_eq!(mod_pow(&from_u64(3), &exp, &p), from_u64(1));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&from_u64(48), &from_u64(18)), from_u64(6));
        assert_eq!(gcd(&from_u64(17), &from_u64(3120)), from_u64(1));
        assert_eq!(gcd(&from_u64(7), &from_u64(0)), from_u64(7));
    }

    #[test]
    fn test_extended_gcd_exhaustive() {
        for b in 2..120u64 {
            for a in 1..b {
                let (g, x) = extended_gcd(&from_u64(a), &from_u64(b)).unwrap();
                assert_eq!(g, gcd(&from_u64(a), &from_u64(b)), "gcd({a}, {b})");
                assert!(x < from_u64(b));
                assert_eq!((from_u64(a) * &x) % from_u64(b), g, "a={a} b={b} x={x}");
            }
        }
    }

    #[rstest]
    #[case::equal(5, 5)]
    #[case::reversed(9, 4)]
    #[case::zero(0, 4)]
    fn test_extended_gcd_precondition(#[case] a: u64, #[case] b: u64) {
        let result = extended_gcd(&from_u64(a), &from_u64(b));
        assert!(matches!(result, Err(Error::Precondition { .. })));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7
        let inv = mod_inverse(&from_u64(3), &from_u64(7)).unwrap();
        assert_eq!(inv, from_u64(5));

        // Textbook RSA: e=17, φ=3120 gives d=2753
        let d = mod_inverse(&from_u64(17), &from_u64(3120)).unwrap();
        assert_eq!(d, from_u64(2753));
        assert_eq!((from_u64(17) * d) % from_u64(3120), from_u64(1));
    }

    #[test]
    fn test_mod_inverse_reduces_large_input() {
        let inv = mod_inverse(&from_u64(10), &from_u64(7)).unwrap();
        assert_eq!(inv, from_u64(5));
    }

    #[test]
    fn test_mod_inverse_not_invertible() {
        assert!(matches!(
            mod_inverse(&from_u64(6), &from_u64(9)),
            Err(Error::NotInvertible { .. })
        ));
        assert!(matches!(
            mod_inverse(&from_u64(9), &from_u64(9)),
            Err(Error::NotInvertible { .. })
        ));
        assert!(matches!(
            mod_inverse(&from_u64(3), &from_u64(0)),
            Err(Error::NotInvertible { .. })
        ));
    }
}
