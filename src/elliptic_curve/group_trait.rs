//! The `Group` capability for additively written groups

use crate::error::Result;
use num_bigint::BigUint;
use num_traits::Zero;

/// An abelian group in additive notation whose law is owned by the structure
///
/// Every method taking elements fails when an operand belongs to another group.
pub trait Group {
    type Element: Clone + PartialEq;

    /// Neutral element
    fn identity(&self) -> Self::Element;

    fn add(&self, p: &Self::Element, q: &Self::Element) -> Result<Self::Element>;

    /// Additive inverse
    fn negate(&self, p: &Self::Element) -> Result<Self::Element>;

    /// p - q = p + (-q)
    fn sub(&self, p: &Self::Element, q: &Self::Element) -> Result<Self::Element> {
        let neg_q = self.negate(q)?;
        self.add(p, &neg_q)
    }

    fn double(&self, p: &Self::Element) -> Result<Self::Element> {
        self.add(p, p)
    }

    /// Scalar multiplication k*P by double-and-add
    ///
    /// Scans the bits of `k` from the least significant one, adding the current
    /// multiple of P into the accumulator when the bit is set and doubling it
    /// afterwards. O(log k) group operations.
    fn scalar_mul(&self, p: &Self::Element, k: &BigUint) -> Result<Self::Element> {
        let mut result = self.identity();
        let mut addend = p.clone();
        let mut k = k.clone();

        while !k.is_zero() {
            if k.bit(0) {
                result = self.add(&result, &addend)?;
            }
            k >>= 1;
            if !k.is_zero() {
                addend = self.double(&addend)?;
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Z/12 under addition
    struct Z12;

    impl Group for Z12 {
        type Element = u32;

        fn identity(&self) -> u32 {
            0
        }

        fn add(&self, p: &u32, q: &u32) -> Result<u32> {
            Ok((p + q) % 12)
        }

        fn negate(&self, p: &u32) -> Result<u32> {
            Ok((12 - p) % 12)
        }
    }

    #[test]
    fn test_default_scalar_mul() {
        for k in 0..40u32 {
            assert_eq!(
                Z12.scalar_mul(&5, &BigUint::from(k)).unwrap(),
                (5 * k) % 12
            );
        }
    }

    #[test]
    fn test_default_sub_and_double() {
        assert_eq!(Z12.sub(&3, &5).unwrap(), 10);
        assert_eq!(Z12.double(&7).unwrap(), 2);
    }
}
