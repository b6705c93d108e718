//! Curve points

use super::curve::EllipticCurve;
use super::group_trait::Group;
use crate::bigint;
use crate::error::{EcError, Result};
use crate::field::FpElement;
use num_bigint::{BigInt, BigUint};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A point of a curve, with no reference to the curve itself
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Point {
    /// The point at infinity (identity element)
    Infinity,
    /// A point with affine coordinates (x, y)
    Affine { x: FpElement, y: FpElement },
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "O"),
            Point::Affine { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

/// A point bound to the curve it lies on
///
/// Only the curve's factories create these, so the coordinates always satisfy
/// the curve equation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CurvePoint {
    curve: EllipticCurve,
    point: Point,
}

impl CurvePoint {
    pub(crate) fn new_unchecked(curve: EllipticCurve, point: Point) -> Self {
        debug_assert!(curve.is_on_curve(&point));
        Self { curve, point }
    }

    pub fn curve(&self) -> &EllipticCurve {
        &self.curve
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn into_point(self) -> Point {
        self.point
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self.point, Point::Infinity)
    }

    /// Abscissa, `None` at infinity
    pub fn x(&self) -> Option<&FpElement> {
        match &self.point {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    /// Ordinate, `None` at infinity
    pub fn y(&self) -> Option<&FpElement> {
        match &self.point {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }

    /// # Errors
    /// `EcError::CurveMismatch` if `other` lies on another curve.
    pub fn checked_add(&self, other: &CurvePoint) -> Result<CurvePoint> {
        self.curve.add(self, other)
    }

    pub fn checked_sub(&self, other: &CurvePoint) -> Result<CurvePoint> {
        self.curve.sub(self, other)
    }

    pub fn negate(&self) -> CurvePoint {
        CurvePoint {
            curve: self.curve.clone(),
            point: self.curve.negate_point(&self.point),
        }
    }

    pub fn double(&self) -> Result<CurvePoint> {
        self.curve.double(self)
    }

    /// k * self by double-and-add
    ///
    /// # Errors
    /// `EcError::NegativeScalar` for k < 0; reduce negative scalars modulo the
    /// group order before calling.
    pub fn scalar_mul<K: Into<BigInt>>(&self, k: K) -> Result<CurvePoint> {
        let k: BigInt = k.into();
        match bigint::to_unsigned(&k) {
            Some(k) => self.curve.scalar_mul(self, &k),
            None => Err(EcError::NegativeScalar(k)),
        }
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.point)
    }
}

// Point arithmetic through operators panics on points of different curves, use
// the checked forms to get an error instead.
macro_rules! impl_point_op {
    ($op:ident, $method:ident, $checked:ident) => {
        impl $op<&CurvePoint> for &CurvePoint {
            type Output = CurvePoint;

            fn $method(self, rhs: &CurvePoint) -> CurvePoint {
                self.$checked(rhs).unwrap_or_else(|err| panic!("{}", err))
            }
        }

        impl $op<CurvePoint> for CurvePoint {
            type Output = CurvePoint;

            fn $method(self, rhs: CurvePoint) -> CurvePoint {
                <&CurvePoint as $op<&CurvePoint>>::$method(&self, &rhs)
            }
        }

        impl $op<&CurvePoint> for CurvePoint {
            type Output = CurvePoint;

            fn $method(self, rhs: &CurvePoint) -> CurvePoint {
                <&CurvePoint as $op<&CurvePoint>>::$method(&self, rhs)
            }
        }
    };
}

impl_point_op!(Add, add, checked_add);
impl_point_op!(Sub, sub, checked_sub);

impl Neg for &CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        self.negate()
    }
}

impl Neg for CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        self.negate()
    }
}

impl Mul<&BigUint> for &CurvePoint {
    type Output = CurvePoint;

    fn mul(self, k: &BigUint) -> CurvePoint {
        self.curve
            .scalar_mul(self, k)
            .unwrap_or_else(|err| panic!("{}", err))
    }
}

impl Mul<u64> for &CurvePoint {
    type Output = CurvePoint;

    fn mul(self, k: u64) -> CurvePoint {
        self * &BigUint::from(k)
    }
}

/// Scalar given as a field element, multiplied by its reduced value
impl Mul<&FpElement> for &CurvePoint {
    type Output = CurvePoint;

    fn mul(self, k: &FpElement) -> CurvePoint {
        self * k.value()
    }
}
