//! Short Weierstrass curves y^2 = x^3 + ax + b over F_p
//!
//! Implements the Chord-Tangent Law for group operations:
//! - For distinct points P, Q: the line through P and Q meets the curve at -R, so P + Q = R
//! - For P = Q: the tangent line at P meets the curve at -R, so 2P = R
//! - The point at infinity O is the identity element

use super::group_trait::Group;
use super::point::{CurvePoint, Point};
use crate::error::{EcError, Result, Search};
use crate::field::{FpElement, PrimeField};
use num_bigint::BigInt;
use rand::{CryptoRng, RngCore};
use std::fmt;

/// An elliptic curve y^2 = x^3 + ax + b over a prime field
///
/// Construction guarantees 4a^3 + 27b^2 != 0 (mod p). Two curves are equal when
/// they share the field and the coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EllipticCurve {
    field: PrimeField,
    a: FpElement,
    b: FpElement,
}

impl EllipticCurve {
    /// Creates a curve from coefficients in one field
    ///
    /// # Errors
    /// `EcError::FieldMismatch` if `a` and `b` live in different fields,
    /// `EcError::SingularCurve` if the discriminant vanishes.
    pub fn new(a: FpElement, b: FpElement) -> Result<Self> {
        let field = a.field().clone();
        let b = field.coerce(&b)?;

        if Self::is_singular(&a, &b) {
            return Err(EcError::SingularCurve(field.modulus().clone()));
        }

        Ok(Self { field, a, b })
    }

    /// Creates a curve over F_p from integer coefficients
    ///
    /// # Errors
    /// `EcError::InvalidModulus` if `p <= 1`, `EcError::SingularCurve` if
    /// 4a^3 + 27b^2 = 0 (mod p).
    pub fn from_integers<A, B, P>(a: A, b: B, p: P) -> Result<Self>
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
        P: Into<BigInt>,
    {
        let field = PrimeField::new(p)?;
        Self::new(field.element(a), field.element(b))
    }

    /// Draws random coefficients until the curve is non-singular
    pub fn random<R: RngCore + CryptoRng + ?Sized>(field: &PrimeField, rng: &mut R) -> Result<Self> {
        let limit = field.limits().random_curve_attempts;
        for attempt in 0..limit {
            let a = field.random_element(rng);
            let b = field.random_element(rng);
            if !Self::is_singular(&a, &b) {
                log::debug!("random curve found after {} attempts", attempt + 1);
                return Ok(Self {
                    field: field.clone(),
                    a,
                    b,
                });
            }
            log::trace!("rejected singular coefficients a={}, b={}", a, b);
        }
        Err(EcError::exhausted(Search::RandomCurve, limit))
    }

    fn is_singular(a: &FpElement, b: &FpElement) -> bool {
        let discriminant = a.square() * a * 4i64 + b.square() * 27i64;
        discriminant.is_zero()
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn a(&self) -> &FpElement {
        &self.a
    }

    pub fn b(&self) -> &FpElement {
        &self.b
    }

    /// Right-hand side x^3 + ax + b
    pub fn rhs(&self, x: &FpElement) -> Result<FpElement> {
        self.field.check(x)?;
        Ok(self.rhs_unchecked(x))
    }

    fn rhs_unchecked(&self, x: &FpElement) -> FpElement {
        x.square() * x + &self.a * x + &self.b
    }

    /// Whether the integer pair (x, y) satisfies the curve equation
    pub fn contains<X: Into<BigInt>, Y: Into<BigInt>>(&self, x: X, y: Y) -> bool {
        let x = self.field.element(x);
        let y = self.field.element(y);
        self.contains_elements(&x, &y)
    }

    /// Whether (x, y) lies on the curve; elements of other fields never do
    pub fn contains_elements(&self, x: &FpElement, y: &FpElement) -> bool {
        self.field.contains(x) && self.field.contains(y) && y.square() == self.rhs_unchecked(x)
    }

    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => self.contains_elements(x, y),
        }
    }

    /// Creates a point from integer coordinates
    ///
    /// # Errors
    /// `EcError::PointNotOnCurve` if y^2 != x^3 + ax + b.
    pub fn point<X: Into<BigInt>, Y: Into<BigInt>>(&self, x: X, y: Y) -> Result<CurvePoint> {
        let x = self.field.element(x);
        let y = self.field.element(y);
        self.point_from_elements(x, y)
    }

    pub fn point_from_elements(&self, x: FpElement, y: FpElement) -> Result<CurvePoint> {
        self.field.check(&x)?;
        self.field.check(&y)?;
        if !self.contains_elements(&x, &y) {
            return Err(EcError::PointNotOnCurve {
                x: x.value().clone(),
                y: y.value().clone(),
            });
        }
        Ok(CurvePoint::new_unchecked(self.clone(), Point::Affine { x, y }))
    }

    /// Wraps a bare point, checking membership
    pub fn bind(&self, point: Point) -> Result<CurvePoint> {
        match point {
            Point::Infinity => Ok(self.point_at_infinity()),
            Point::Affine { x, y } => self.point_from_elements(x, y),
        }
    }

    pub fn point_at_infinity(&self) -> CurvePoint {
        CurvePoint::new_unchecked(self.clone(), Point::Infinity)
    }

    /// The point with abscissa `x` and the Tonelli-Shanks root as ordinate,
    /// `None` when x^3 + ax + b is not a square
    pub fn lift_x(&self, x: &FpElement) -> Result<Option<CurvePoint>> {
        let rhs = self.rhs(x)?;
        let lifted = rhs.sqrt()?.map(|y| {
            CurvePoint::new_unchecked(self.clone(), Point::Affine { x: x.clone(), y })
        });
        Ok(lifted)
    }

    /// Samples abscissas until one lifts to the curve
    ///
    /// # Errors
    /// `EcError::SearchExhausted` after `SearchLimits::random_point_attempts` misses.
    pub fn random_point<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Result<CurvePoint> {
        let limit = self.field.limits().random_point_attempts;
        for attempt in 0..limit {
            let x = self.field.random_element(rng);
            if let Some(point) = self.lift_x(&x)? {
                log::trace!("random point found after {} attempts", attempt + 1);
                return Ok(point);
            }
        }
        Err(EcError::exhausted(Search::RandomPoint, limit))
    }

    fn check_point(&self, p: &CurvePoint) -> Result<()> {
        if p.curve() == self {
            Ok(())
        } else {
            Err(EcError::CurveMismatch)
        }
    }

    /// The group law on bare points of this curve
    ///
    /// Case order matters: identities first, then P + (-P), so the slope
    /// denominators below are never zero for a prime modulus.
    pub(crate) fn add_points(&self, p: &Point, q: &Point) -> Result<Point> {
        let (xp, yp, xq, yq) = match (p, q) {
            (Point::Infinity, _) => return Ok(q.clone()),
            (_, Point::Infinity) => return Ok(p.clone()),
            (Point::Affine { x: xp, y: yp }, Point::Affine { x: xq, y: yq }) => (xp, yp, xq, yq),
        };

        // vertical line
        if xp == xq && *yq == -yp {
            return Ok(Point::Infinity);
        }

        let slope = if xp == xq && yp == yq {
            // tangent
            let numerator = xp.square() * 3i64 + &self.a;
            let denominator = yp * 2i64;
            numerator.checked_div(&denominator)?
        } else {
            // chord
            (yq - yp).checked_div(&(xq - xp))?
        };

        let xr = slope.square() - xp - xq;
        let yr = yp + &slope * &(&xr - xp);
        Ok(Point::Affine { x: xr, y: -yr })
    }

    pub(crate) fn negate_point(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: -y,
            },
        }
    }
}

impl Group for EllipticCurve {
    type Element = CurvePoint;

    fn identity(&self) -> CurvePoint {
        self.point_at_infinity()
    }

    fn add(&self, p: &CurvePoint, q: &CurvePoint) -> Result<CurvePoint> {
        self.check_point(p)?;
        self.check_point(q)?;
        let sum = self.add_points(p.point(), q.point())?;
        Ok(CurvePoint::new_unchecked(self.clone(), sum))
    }

    fn negate(&self, p: &CurvePoint) -> Result<CurvePoint> {
        self.check_point(p)?;
        Ok(CurvePoint::new_unchecked(
            self.clone(),
            self.negate_point(p.point()),
        ))
    }
}

impl fmt::Display for EllipticCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y^2 = x^3 + {}x + {} (mod {})",
            self.a,
            self.b,
            self.field.modulus()
        )
    }
}
