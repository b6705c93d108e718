//! The `Field` capability
//!
//! A field is a structure that owns the arithmetic of its elements. Elements only
//! carry a handle to their field and forward every operation to it, so the
//! membership check happens in one place.

use crate::error::{EcError, Result};
use num_bigint::BigUint;
use num_traits::Zero;

/// Arithmetic of a finite field, performed by the structure on its elements
///
/// # Laws
/// - `add(a, zero()) = a`, `mul(a, one()) = a`
/// - `add(a, neg(a)) = zero()`
/// - `mul(a, inverse(a)) = one()` for non-zero `a`
///
/// Every method that takes elements fails with `EcError::FieldMismatch` when an
/// operand belongs to a different field.
pub trait Field {
    /// Element type of the field
    type Element: Clone + PartialEq;

    /// Additive identity
    fn zero(&self) -> Self::Element;

    /// Multiplicative identity
    fn one(&self) -> Self::Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element>;

    fn neg(&self, a: &Self::Element) -> Result<Self::Element>;

    /// Subtraction (a - b = a + (-b))
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        let neg_b = self.neg(b)?;
        self.add(a, &neg_b)
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element>;

    /// Multiplicative inverse, `None` for zero
    fn inverse(&self, a: &Self::Element) -> Result<Option<Self::Element>>;

    /// Division (a / b = a * b^(-1)), `EcError::DivisionByZero` when `b` is zero
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        match self.inverse(b)? {
            Some(inv) => self.mul(a, &inv),
            None => Err(EcError::DivisionByZero),
        }
    }

    /// Exponentiation with square-and-multiply
    /// Complexity: O(log(exp)) multiplications
    fn pow(&self, base: &Self::Element, exp: &BigUint) -> Result<Self::Element> {
        let mut result = self.one();
        let mut square = base.clone();
        let mut e = exp.clone();

        while !e.is_zero() {
            if e.bit(0) {
                result = self.mul(&result, &square)?;
            }
            square = self.mul(&square, &square)?;
            e >>= 1;
        }

        Ok(result)
    }

    /// Euler's criterion; zero counts as a residue
    fn is_quadratic_residue(&self, a: &Self::Element) -> Result<bool>;

    /// A square root of `a`, `None` when `a` is not a quadratic residue
    fn sqrt(&self, a: &Self::Element) -> Result<Option<Self::Element>>;
}
