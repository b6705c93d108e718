use ec_elgamal::{CurvePoint, EcError, EllipticCurve, Group, Point};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use proptest::prelude::*;
use proptest::sample::select;
use rand::SeedableRng;
use rand::rngs::StdRng;

const PRIMES: &[u64] = &[
    5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101,
    103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193, 197,
    199,
];

/// A non-singular curve over a small prime field with three random points on it
fn curve_with_points() -> impl Strategy<Value = (EllipticCurve, CurvePoint, CurvePoint, CurvePoint)>
{
    (select(PRIMES), 0u64..200, 0u64..200, any::<u64>())
        .prop_filter_map("singular curve", |(p, a, b, seed)| {
            let curve = EllipticCurve::from_integers(a, b, p).ok()?;
            let mut rng = StdRng::seed_from_u64(seed);
            let points = (
                curve.random_point(&mut rng).ok()?,
                curve.random_point(&mut rng).ok()?,
                curve.random_point(&mut rng).ok()?,
            );
            Some((curve, points.0, points.1, points.2))
        })
}

/// #E(F_p) by counting the roots of y^2 = x^3 + ax + b for every x
fn group_order(curve: &EllipticCurve) -> u64 {
    let p = curve.field().modulus();
    let p_u64 = u64::try_from(p).unwrap();
    let mut count = 1;
    for x in 0..p_u64 {
        let rhs = curve.rhs(&curve.field().element(x)).unwrap();
        if rhs.is_zero() {
            count += 1;
        } else if rhs.is_quadratic_residue() {
            count += 2;
        }
    }
    count
}

proptest! {
    #[test]
    fn random_points_lie_on_the_curve((curve, p, q, _r) in curve_with_points()) {
        prop_assert!(curve.is_on_curve(p.point()));
        prop_assert!(curve.is_on_curve(q.point()));
        prop_assert!(curve.is_on_curve((&p + &q).point()));
    }

    #[test]
    fn point_minus_itself_is_infinity((curve, p, _q, _r) in curve_with_points()) {
        prop_assert_eq!(&p + &(-&p), curve.point_at_infinity());
        prop_assert_eq!(&p - &p, curve.point_at_infinity());
    }

    #[test]
    fn infinity_is_neutral((curve, p, _q, _r) in curve_with_points()) {
        let o = curve.point_at_infinity();
        prop_assert_eq!(&p + &o, p.clone());
        prop_assert_eq!(&o + &p, p);
        prop_assert_eq!(&o + &o, o);
    }

    #[test]
    fn addition_is_commutative((_curve, p, q, _r) in curve_with_points()) {
        prop_assert_eq!(&p + &q, &q + &p);
    }

    #[test]
    fn addition_is_associative((_curve, p, q, r) in curve_with_points()) {
        prop_assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));
    }

    #[test]
    fn scalar_multiplication_distributes(
        (_curve, p, _q, _r) in curve_with_points(),
        m in 0u64..500,
        n in 0u64..500,
    ) {
        prop_assert_eq!(&p * (m + n), &(&p * m) + &(&p * n));
    }

    #[test]
    fn scalar_multiplication_matches_repeated_addition(
        (curve, p, _q, _r) in curve_with_points(),
        k in 0u64..40,
    ) {
        let mut sum = curve.point_at_infinity();
        for _ in 0..k {
            sum = &sum + &p;
        }
        prop_assert_eq!(p.scalar_mul(k).unwrap(), sum);
    }

    #[test]
    fn group_order_annihilates_points((curve, p, q, _r) in curve_with_points()) {
        let order = group_order(&curve);
        prop_assert!((&p * order).is_infinity());
        prop_assert!((&q * order).is_infinity());
    }

    #[test]
    fn construction_rejects_singular_curves(a in -5i64..100, b in -5i64..100, p in -5i64..50) {
        let result = EllipticCurve::from_integers(a, b, p);
        if p <= 1 {
            prop_assert!(matches!(result, Err(EcError::InvalidModulus(_))));
        } else {
            let discriminant = BigInt::from(4) * BigInt::from(a).pow(3) + BigInt::from(27) * BigInt::from(b).pow(2);
            if discriminant.is_multiple_of(&BigInt::from(p)) {
                prop_assert!(matches!(result, Err(EcError::SingularCurve(_))));
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}

#[test]
fn test_known_multiples() {
    // y^2 = x^3 + 2x + 2 over F_17, generated by (5, 1) of order 19
    let curve = EllipticCurve::from_integers(2, 2, 17).unwrap();
    let p = curve.point(5, 1).unwrap();
    let expected = [
        (5, 1),
        (6, 3),
        (10, 6),
        (3, 1),
        (9, 16),
        (16, 13),
        (0, 6),
        (13, 7),
        (7, 6),
        (7, 11),
        (13, 10),
        (0, 11),
        (16, 4),
        (9, 1),
        (3, 16),
        (10, 11),
        (6, 14),
        (5, 16),
    ];
    for (k, (x, y)) in expected.iter().enumerate() {
        let multiple = &p * (k as u64 + 1);
        assert_eq!(multiple, curve.point(*x, *y).unwrap(), "{}P", k + 1);
    }
    assert!((&p * 19u64).is_infinity());
    assert_eq!(group_order(&curve), 19);
}

#[test]
fn test_point_not_on_curve() {
    let curve = EllipticCurve::from_integers(2, 2, 17).unwrap();
    assert!(matches!(
        curve.point(5, 2),
        Err(EcError::PointNotOnCurve { .. })
    ));
    assert!(!curve.contains(5, 2));
    assert!(curve.contains(5, 1));
}

#[test]
fn test_bind_checks_membership() {
    let curve = EllipticCurve::from_integers(2, 2, 17).unwrap();
    let field = curve.field();
    let good = Point::Affine {
        x: field.element(6),
        y: field.element(3),
    };
    let bad = Point::Affine {
        x: field.element(6),
        y: field.element(4),
    };
    assert!(curve.bind(good).is_ok());
    assert!(curve.bind(bad).is_err());
    assert!(curve.bind(Point::Infinity).unwrap().is_infinity());
}

#[test]
fn test_group_trait_on_curve() {
    let curve = EllipticCurve::from_integers(2, 2, 17).unwrap();
    let p = curve.point(5, 1).unwrap();
    assert_eq!(curve.identity(), curve.point_at_infinity());
    assert_eq!(curve.double(&p).unwrap(), curve.point(6, 3).unwrap());
    assert_eq!(
        curve.scalar_mul(&p, &BigUint::from(19u32)).unwrap(),
        curve.identity()
    );

    let other = EllipticCurve::from_integers(1, 1, 17).unwrap();
    assert!(matches!(
        other.add(&p, &p),
        Err(EcError::CurveMismatch)
    ));
}
