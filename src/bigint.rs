//! Big integer helpers on top of `num-bigint`
//!
//! Uniform sampling by rejection and reduction of signed integers into `[0, m)`.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// Reduces a signed integer into `[0, modulus)`
pub fn reduce(value: &BigInt, modulus: &BigUint) -> BigUint {
    let m = BigInt::from(modulus.clone());
    // mod_floor is non-negative for a positive modulus
    value
        .mod_floor(&m)
        .to_biguint()
        .unwrap_or_else(BigUint::zero)
}

/// Converts a signed integer to `BigUint`, `None` when negative
pub fn to_unsigned(value: &BigInt) -> Option<BigUint> {
    match value.sign() {
        Sign::Minus => None,
        _ => value.to_biguint(),
    }
}

/// Draws a uniform integer in `[0, bound)` using rejection sampling
///
/// # Panics
/// Panics if `bound` is zero.
pub fn random_below<R: RngCore + CryptoRng + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    assert!(!bound.is_zero(), "cannot sample below zero");
    if bound.is_one() {
        return BigUint::zero();
    }

    let max = bound - 1u32;
    let bit_len = max.bits() as usize;
    let byte_len = bit_len.div_ceil(8);
    let top_bits = bit_len % 8;
    let top_mask: u8 = if top_bits == 0 {
        0xFF
    } else {
        (1u8 << top_bits) - 1
    };

    let mut bytes = vec![0u8; byte_len];
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= top_mask;

        let candidate = BigUint::from_bytes_be(&bytes);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Draws a uniform integer in `[low, high]`
///
/// # Panics
/// Panics if `low > high`.
pub fn random_in_range<R: RngCore + CryptoRng + ?Sized>(
    low: &BigUint,
    high: &BigUint,
    rng: &mut R,
) -> BigUint {
    assert!(low <= high, "empty range");
    let width = high - low + 1u32;
    low + random_below(&width, rng)
}
