//! Prime field F_p with a runtime modulus
//!
//! `PrimeField` is a cheap shared handle; every `FpElement` keeps a clone of the
//! handle of the field it was created in. Arithmetic is performed by the field
//! through the [`Field`] trait, the operator impls on `FpElement` forward to it.

use super::field_trait::Field;
use super::sqrt;
use crate::bigint;
use crate::config::SearchLimits;
use crate::error::{EcError, Result};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use once_cell::sync::OnceCell;
use rand::{CryptoRng, RngCore};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

#[derive(Debug)]
struct FieldInner {
    modulus: BigUint,
    limits: SearchLimits,
    /// Least quadratic non-residue, found on the first square root
    non_residue: OnceCell<BigUint>,
}

/// The prime field F_p
///
/// The modulus is assumed to be prime; no primality test is run, and a composite
/// modulus gives meaningless results rather than an error. Two handles describe
/// the same field iff their moduli are equal.
#[derive(Clone, Debug)]
pub struct PrimeField {
    inner: Arc<FieldInner>,
}

impl PrimeField {
    /// Creates F_p with default search limits
    ///
    /// # Errors
    /// `EcError::InvalidModulus` if `p <= 1`.
    pub fn new<T: Into<BigInt>>(p: T) -> Result<Self> {
        Self::with_limits(p, SearchLimits::default())
    }

    pub fn with_limits<T: Into<BigInt>>(p: T, limits: SearchLimits) -> Result<Self> {
        let p: BigInt = p.into();
        let modulus = match bigint::to_unsigned(&p) {
            Some(m) if m > BigUint::one() => m,
            _ => {
                return Err(EcError::InvalidModulus(
                    bigint::to_unsigned(&p).unwrap_or_default(),
                ));
            }
        };
        Ok(Self {
            inner: Arc::new(FieldInner {
                modulus,
                limits,
                non_residue: OnceCell::new(),
            }),
        })
    }

    /// The prime p
    pub fn modulus(&self) -> &BigUint {
        &self.inner.modulus
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.inner.limits
    }

    /// Reduces any integer modulo p
    pub fn element<T: Into<BigInt>>(&self, value: T) -> FpElement {
        let value = bigint::reduce(&value.into(), self.modulus());
        self.wrap(value)
    }

    /// Passes an element of this field through unchanged
    pub fn coerce(&self, element: &FpElement) -> Result<FpElement> {
        self.check(element)?;
        Ok(element.clone())
    }

    /// Whether `element` belongs to this field
    pub fn contains(&self, element: &FpElement) -> bool {
        element.field == *self
    }

    /// Uniform element of [0, p)
    pub fn random_element<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> FpElement {
        self.wrap(bigint::random_below(self.modulus(), rng))
    }

    /// Uniform element of [1, p)
    pub fn random_nonzero_element<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> FpElement {
        let high = self.modulus() - 1u32;
        self.wrap(bigint::random_in_range(&BigUint::one(), &high, rng))
    }

    /// The cached least quadratic non-residue, computed on first use
    pub(crate) fn non_residue(&self) -> Result<&BigUint> {
        self.inner
            .non_residue
            .get_or_try_init(|| sqrt::find_non_residue(self))
    }

    /// Builds an element from an already reduced value
    pub(crate) fn wrap(&self, value: BigUint) -> FpElement {
        debug_assert!(&value < self.modulus());
        FpElement {
            value,
            field: self.clone(),
        }
    }

    pub(crate) fn check(&self, element: &FpElement) -> Result<()> {
        if self.contains(element) {
            Ok(())
        } else {
            Err(EcError::FieldMismatch {
                left: self.modulus().clone(),
                right: element.modulus().clone(),
            })
        }
    }

    pub(crate) fn add_values(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % self.modulus()
    }

    pub(crate) fn mul_values(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % self.modulus()
    }

    pub(crate) fn neg_value(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            self.modulus() - a
        }
    }

    /// Square-and-multiply on raw reduced values
    pub(crate) fn pow_value(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        let mut result = BigUint::one() % self.modulus();
        let mut square = base.clone();
        let mut e = exp.clone();

        while !e.is_zero() {
            if e.bit(0) {
                result = self.mul_values(&result, &square);
            }
            square = self.mul_values(&square, &square);
            e >>= 1;
        }

        result
    }

    /// Inverse by the Extended Euclidean Algorithm on (a, p)
    ///
    /// Finds the Bezout coefficient s with s*a + t*p = 1 and reduces it mod p.
    pub(crate) fn inverse_value(&self, a: &BigUint) -> Option<BigUint> {
        if a.is_zero() {
            return None;
        }

        let mut r = BigInt::from(self.modulus().clone());
        let mut new_r = BigInt::from(a.clone());
        let mut t = BigInt::zero();
        let mut new_t = BigInt::one();

        while !new_r.is_zero() {
            let quotient = &r / &new_r;

            let next_t = &t - &quotient * &new_t;
            t = std::mem::replace(&mut new_t, next_t);

            let next_r = &r - &quotient * &new_r;
            r = std::mem::replace(&mut new_r, next_r);
        }

        // gcd(a, p) != 1 only happens for a composite modulus
        if !r.is_one() {
            return None;
        }
        Some(bigint::reduce(&t, self.modulus()))
    }
}

impl PartialEq for PrimeField {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.modulus == other.inner.modulus
    }
}

impl Eq for PrimeField {}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F_{}", self.modulus())
    }
}

impl Field for PrimeField {
    type Element = FpElement;

    fn zero(&self) -> FpElement {
        self.wrap(BigUint::zero())
    }

    fn one(&self) -> FpElement {
        self.wrap(BigUint::one())
    }

    fn add(&self, a: &FpElement, b: &FpElement) -> Result<FpElement> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.wrap(self.add_values(&a.value, &b.value)))
    }

    fn neg(&self, a: &FpElement) -> Result<FpElement> {
        self.check(a)?;
        Ok(self.wrap(self.neg_value(&a.value)))
    }

    fn mul(&self, a: &FpElement, b: &FpElement) -> Result<FpElement> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.wrap(self.mul_values(&a.value, &b.value)))
    }

    fn inverse(&self, a: &FpElement) -> Result<Option<FpElement>> {
        self.check(a)?;
        Ok(self.inverse_value(&a.value).map(|v| self.wrap(v)))
    }

    fn pow(&self, base: &FpElement, exp: &BigUint) -> Result<FpElement> {
        self.check(base)?;
        Ok(self.wrap(self.pow_value(&base.value, exp)))
    }

    fn is_quadratic_residue(&self, a: &FpElement) -> Result<bool> {
        self.check(a)?;
        Ok(sqrt::is_residue(self, &a.value))
    }

    fn sqrt(&self, a: &FpElement) -> Result<Option<FpElement>> {
        self.check(a)?;
        Ok(sqrt::tonelli_shanks(self, &a.value)?.map(|v| self.wrap(v)))
    }
}

/// Element of a prime field F_p
///
/// The value is always reduced into [0, p).
#[derive(Clone)]
pub struct FpElement {
    value: BigUint,
    field: PrimeField,
}

impl FpElement {
    /// The reduced value in [0, p)
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn modulus(&self) -> &BigUint {
        self.field.modulus()
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }

    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.value.clone())
    }

    pub fn checked_add(&self, other: &FpElement) -> Result<FpElement> {
        self.field.add(self, other)
    }

    pub fn checked_sub(&self, other: &FpElement) -> Result<FpElement> {
        self.field.sub(self, other)
    }

    pub fn checked_mul(&self, other: &FpElement) -> Result<FpElement> {
        self.field.mul(self, other)
    }

    /// `self * other^(-1)`
    ///
    /// # Errors
    /// `EcError::DivisionByZero` if `other` is zero, `EcError::FieldMismatch` across fields.
    pub fn checked_div(&self, other: &FpElement) -> Result<FpElement> {
        self.field.div(self, other)
    }

    /// p - a (0 for 0)
    pub fn additive_inverse(&self) -> FpElement {
        self.field.wrap(self.field.neg_value(&self.value))
    }

    /// `None` for zero
    pub fn multiplicative_inverse(&self) -> Option<FpElement> {
        self.field.inverse_value(&self.value).map(|v| self.field.wrap(v))
    }

    /// Raises to a non-negative integer power
    ///
    /// # Errors
    /// `EcError::NegativeExponent` for a negative exponent.
    pub fn pow<E: Into<BigInt>>(&self, exp: E) -> Result<FpElement> {
        let exp: BigInt = exp.into();
        match bigint::to_unsigned(&exp) {
            Some(exp) => self.field.pow(self, &exp),
            None => Err(EcError::NegativeExponent(exp)),
        }
    }

    pub fn square(&self) -> FpElement {
        self.field.wrap(self.field.mul_values(&self.value, &self.value))
    }

    pub fn is_quadratic_residue(&self) -> bool {
        sqrt::is_residue(&self.field, &self.value)
    }

    /// A square root by Tonelli-Shanks, `Ok(None)` for non-residues
    ///
    /// # Errors
    /// `EcError::SearchExhausted` when a bounded search gives up, which for a prime
    /// modulus does not happen with the default limits.
    pub fn sqrt(&self) -> Result<Option<FpElement>> {
        self.field.sqrt(self)
    }
}

impl PartialEq for FpElement {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.value == other.value
    }
}

impl Eq for FpElement {}

impl PartialEq<i64> for FpElement {
    fn eq(&self, other: &i64) -> bool {
        self.value == bigint::reduce(&BigInt::from(*other), self.modulus())
    }
}

impl PartialEq<u64> for FpElement {
    fn eq(&self, other: &u64) -> bool {
        self.value == BigUint::from(*other) % self.modulus()
    }
}

impl Hash for FpElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.modulus().hash(state);
        self.value.hash(state);
    }
}

/// Values compare only within one field
impl PartialOrd for FpElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.field != other.field {
            return None;
        }
        Some(self.value.cmp(&other.value))
    }
}

/// The reduced value, so an element can serve as an exponent or scalar
impl From<&FpElement> for BigInt {
    fn from(element: &FpElement) -> Self {
        element.to_bigint()
    }
}

impl From<FpElement> for BigInt {
    fn from(element: FpElement) -> Self {
        BigInt::from(element.value)
    }
}

impl fmt::Display for FpElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Debug for FpElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.value, self.modulus())
    }
}

// Operators forward to the checked forms and panic on misuse, integer operands
// are reduced into the element's field first.
macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $checked:ident) => {
        impl $op<&FpElement> for &FpElement {
            type Output = FpElement;

            fn $method(self, rhs: &FpElement) -> FpElement {
                self.$checked(rhs).unwrap_or_else(|err| panic!("{}", err))
            }
        }

        impl $op<FpElement> for FpElement {
            type Output = FpElement;

            fn $method(self, rhs: FpElement) -> FpElement {
                <&FpElement as $op<&FpElement>>::$method(&self, &rhs)
            }
        }

        impl $op<&FpElement> for FpElement {
            type Output = FpElement;

            fn $method(self, rhs: &FpElement) -> FpElement {
                <&FpElement as $op<&FpElement>>::$method(&self, rhs)
            }
        }

        impl $op<FpElement> for &FpElement {
            type Output = FpElement;

            fn $method(self, rhs: FpElement) -> FpElement {
                <&FpElement as $op<&FpElement>>::$method(self, &rhs)
            }
        }

        impl $op<i64> for &FpElement {
            type Output = FpElement;

            fn $method(self, rhs: i64) -> FpElement {
                let rhs = self.field.element(rhs);
                <&FpElement as $op<&FpElement>>::$method(self, &rhs)
            }
        }

        impl $op<i64> for FpElement {
            type Output = FpElement;

            fn $method(self, rhs: i64) -> FpElement {
                <&FpElement as $op<i64>>::$method(&self, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, checked_add);
impl_binary_op!(Sub, sub, checked_sub);
impl_binary_op!(Mul, mul, checked_mul);
impl_binary_op!(Div, div, checked_div);

impl Neg for &FpElement {
    type Output = FpElement;

    fn neg(self) -> FpElement {
        self.additive_inverse()
    }
}

impl Neg for FpElement {
    type Output = FpElement;

    fn neg(self) -> FpElement {
        self.additive_inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn f17() -> PrimeField {
        PrimeField::new(17).unwrap()
    }

    #[test]
    fn test_invalid_moduli() {
        assert!(matches!(PrimeField::new(1), Err(EcError::InvalidModulus(_))));
        assert!(matches!(PrimeField::new(0), Err(EcError::InvalidModulus(_))));
        assert!(matches!(PrimeField::new(-7), Err(EcError::InvalidModulus(_))));
        assert!(PrimeField::new(2).is_ok());
    }

    #[test]
    fn test_element_reduction() {
        let field = f17();
        assert_eq!(field.element(20).value(), &BigUint::from(3u32));
        assert_eq!(field.element(-1).value(), &BigUint::from(16u32));
        assert_eq!(field.element(BigUint::from(34u32)), 0i64);
    }

    #[test]
    fn test_compare_with_integers() {
        let field = f17();
        let a = field.element(5);
        assert_eq!(a, 5i64);
        assert_eq!(a, 22i64);
        assert_eq!(a, -12i64);
        assert_eq!(a, 5u64);
        assert_ne!(a, 6i64);
    }

    #[test]
    fn test_arithmetic() {
        let field = f17();
        let a = field.element(5);
        let b = field.element(12);

        assert_eq!(&a + &b, 0i64);
        assert_eq!(&a - &b, 10i64);
        assert_eq!(&a * &b, 9i64); // 60 = 3*17 + 9
        assert_eq!(-&a, 12i64);
        assert_eq!(&a + 20, 8i64);
        assert_eq!(&a * -1, 12i64);
    }

    #[test]
    fn test_inverse() {
        let field = f17();
        let a = field.element(5);
        let inv = a.multiplicative_inverse().unwrap();
        assert_eq!(inv, 7i64); // 5 * 7 = 35 = 2*17 + 1
        assert!(field.zero().multiplicative_inverse().is_none());
    }

    #[test]
    fn test_division() {
        let field = f17();
        let a = field.element(6);
        let b = field.element(3);
        assert_eq!(&a / &b, 2i64);
        assert!(matches!(
            a.checked_div(&field.zero()),
            Err(EcError::DivisionByZero)
        ));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_division_operator_panics_on_zero() {
        let field = f17();
        let _ = field.element(3) / field.zero();
    }

    #[test]
    fn test_pow() {
        let field = f17();
        let a = field.element(3);
        assert_eq!(a.pow(0).unwrap(), 1i64);
        assert_eq!(a.pow(1).unwrap(), 3i64);
        assert_eq!(a.pow(4).unwrap(), 13i64); // 81 = 4*17 + 13
        assert_eq!(a.pow(16).unwrap(), 1i64); // Fermat
        assert_eq!(field.zero().pow(0).unwrap(), 1i64);
        assert_eq!(field.zero().pow(5).unwrap(), 0i64);
    }

    #[test]
    fn test_negative_exponent_rejected() {
        let field = f17();
        assert!(matches!(
            field.element(3).pow(-1),
            Err(EcError::NegativeExponent(_))
        ));
    }

    #[test]
    fn test_field_mismatch() {
        let a = f17().element(3);
        let b = PrimeField::new(19).unwrap().element(3);
        assert!(matches!(
            a.checked_add(&b),
            Err(EcError::FieldMismatch { .. })
        ));
        assert_ne!(a, b);
        assert_eq!(a.partial_cmp(&b), None);
    }

    #[test]
    #[should_panic(expected = "field mismatch")]
    fn test_operator_panics_on_field_mismatch() {
        let a = f17().element(3);
        let b = PrimeField::new(19).unwrap().element(3);
        let _ = a * b;
    }

    #[test]
    fn test_same_modulus_is_same_field() {
        let a = f17().element(3);
        let b = f17().element(4);
        assert_eq!(&a + &b, 7i64);
        assert!(f17().coerce(&a).is_ok());
        assert!(PrimeField::new(19).unwrap().coerce(&a).is_err());
    }

    #[test]
    fn test_ordering_within_field() {
        let field = f17();
        assert!(field.element(3) < field.element(4));
        assert!(field.element(20) < field.element(4));
    }

    #[test]
    fn test_random_elements_in_range() {
        let field = f17();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(field.random_element(&mut rng).value() < field.modulus());
            assert!(!field.random_nonzero_element(&mut rng).is_zero());
        }
    }

    #[test]
    fn test_element_as_exponent() {
        let field = f17();
        let exponent = field.element(20);
        // exponent reduces to 3
        assert_eq!(field.element(2).pow(&exponent).unwrap(), 8i64);
        assert_eq!(field.element(2).pow(exponent).unwrap(), 8i64);
        assert_eq!(BigInt::from(&field.element(-1)), BigInt::from(16));
    }

    #[test]
    fn test_display() {
        let field = f17();
        assert_eq!(field.to_string(), "F_17");
        assert_eq!(field.element(5).to_string(), "5");
        assert_eq!(format!("{:?}", field.element(5)), "5 (mod 17)");
    }

    #[test]
    fn test_field_trait_dispatch() {
        let field = f17();
        let a = field.element(4);
        assert_eq!(Field::pow(&field, &a, &BigUint::from(2u32)).unwrap(), 16i64);
        assert!(field.is_quadratic_residue(&a).unwrap());
        assert_eq!(field.inverse(&field.zero()).unwrap(), None);
    }
}
