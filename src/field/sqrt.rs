//! Quadratic residues and Tonelli-Shanks square roots in F_p

use super::prime::PrimeField;
use crate::error::{EcError, Result, Search};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Euler's criterion: a is a residue iff a^((p-1)/2) = 1, zero is a residue
pub(crate) fn is_residue(field: &PrimeField, a: &BigUint) -> bool {
    if a.is_zero() {
        return true;
    }
    let exp = (field.modulus() - 1u32) >> 1;
    field.pow_value(a, &exp).is_one()
}

/// Linear scan from 0 for the least quadratic non-residue
pub(crate) fn find_non_residue(field: &PrimeField) -> Result<BigUint> {
    let limit = field.limits().non_residue_candidates;
    let mut candidate = BigUint::zero();
    let mut attempts = 0;

    while attempts < limit && &candidate < field.modulus() {
        if !is_residue(field, &candidate) {
            log::debug!("non-residue {} found in {}", candidate, field);
            return Ok(candidate);
        }
        candidate += 1u32;
        attempts += 1;
    }

    Err(EcError::exhausted(Search::NonResidue, attempts))
}

/// Tonelli-Shanks
///
/// Returns `Ok(None)` for non-residues. For p = 2 every element is its own root.
/// An exhausted iteration cap means `a` passed Euler's criterion without being a
/// square, which only happens for a composite modulus.
pub(crate) fn tonelli_shanks(field: &PrimeField, a: &BigUint) -> Result<Option<BigUint>> {
    if !is_residue(field, a) {
        return Ok(None);
    }

    let p = field.modulus();
    if *p == BigUint::from(2u32) {
        return Ok(Some(a.clone()));
    }
    if a.is_zero() {
        return Ok(Some(BigUint::zero()));
    }

    // p - 1 = q * 2^s with q odd
    let p_minus_one = p - 1u32;
    let s = p_minus_one.trailing_zeros().unwrap_or(0);
    let q = &p_minus_one >> s;

    let z = field.non_residue()?;

    let mut m = s;
    let mut c = field.pow_value(z, &q);
    let mut t = field.pow_value(a, &q);
    let mut r = field.pow_value(a, &((&q + 1u32) >> 1));

    let limit = field.limits().tonelli_shanks_iterations;
    for _ in 0..limit {
        if t.is_zero() {
            return Ok(Some(BigUint::zero()));
        }
        if t.is_one() {
            return Ok(Some(r));
        }

        // least i in (0, m) with t^(2^i) = 1
        let mut i = 0u64;
        let mut probe = t.clone();
        while !probe.is_one() {
            i += 1;
            if i >= m {
                return Err(EcError::exhausted(Search::TonelliShanks, i as usize));
            }
            probe = field.mul_values(&probe, &probe);
        }

        let mut b = c;
        for _ in 0..(m - i - 1) {
            b = field.mul_values(&b, &b);
        }

        m = i;
        c = field.mul_values(&b, &b);
        t = field.mul_values(&t, &c);
        r = field.mul_values(&r, &b);
    }

    Err(EcError::exhausted(Search::TonelliShanks, limit))
}

#[cfg(test)]
mod tests {
    use crate::config::SearchLimits;
    use crate::error::{EcError, Search};
    use crate::field::PrimeField;
    use num_traits::Zero;

    fn residues(p: u64) -> Vec<u64> {
        let mut squares: Vec<u64> = (0..p).map(|x| (x * x) % p).collect();
        squares.sort_unstable();
        squares.dedup();
        squares
    }

    #[test]
    fn test_residue_classification_mod_17() {
        let field = PrimeField::new(17).unwrap();
        let expected = residues(17);
        for v in 0..17u64 {
            assert_eq!(
                field.element(v).is_quadratic_residue(),
                expected.contains(&v),
                "wrong classification of {}",
                v
            );
        }
    }

    #[test]
    fn test_sqrt_all_residues_small_primes() {
        // 17 and 41 have 2-adicity 4 and 3, 23 has 1
        for p in [3u64, 5, 7, 13, 17, 23, 41, 97] {
            let field = PrimeField::new(p).unwrap();
            for v in 0..p {
                let a = field.element(v);
                match a.sqrt().unwrap() {
                    Some(root) => assert_eq!(root.square(), a, "bad root of {} mod {}", v, p),
                    None => assert!(!a.is_quadratic_residue()),
                }
            }
        }
    }

    #[test]
    fn test_non_residue_returns_none() {
        let field = PrimeField::new(17).unwrap();
        assert!(field.element(3).sqrt().unwrap().is_none());
    }

    #[test]
    fn test_sqrt_of_zero() {
        let field = PrimeField::new(13).unwrap();
        assert_eq!(field.element(0).sqrt().unwrap().unwrap(), 0i64);
    }

    #[test]
    fn test_p_equals_two() {
        let field = PrimeField::new(2).unwrap();
        assert_eq!(field.element(0).sqrt().unwrap().unwrap(), 0i64);
        assert_eq!(field.element(1).sqrt().unwrap().unwrap(), 1i64);
    }

    #[test]
    fn test_non_residue_cached() {
        let field = PrimeField::new(17).unwrap();
        let first = field.non_residue().unwrap().clone();
        assert_eq!(first, 3u32.into());
        assert!(std::ptr::eq(
            field.non_residue().unwrap(),
            field.non_residue().unwrap()
        ));
    }

    #[test]
    fn test_cache_shared_across_threads() {
        let field = PrimeField::new(1_000_003).unwrap();
        std::thread::scope(|scope| {
            for t in 1..=4u64 {
                let field = field.clone();
                scope.spawn(move || {
                    let a = field.element(t * 7919).square();
                    assert_eq!(a.sqrt().unwrap().unwrap().square(), a);
                });
            }
        });
        assert!(!field.non_residue().unwrap().is_zero());
    }

    #[test]
    fn test_non_residue_search_exhausted() {
        let limits = SearchLimits {
            non_residue_candidates: 2,
            ..SearchLimits::default()
        };
        let field = PrimeField::with_limits(17, limits).unwrap();
        // 0 and 1 are both residues
        let err = field.element(4).sqrt().unwrap_err();
        assert!(matches!(
            err,
            EcError::SearchExhausted {
                search: Search::NonResidue,
                attempts: 2
            }
        ));
    }

    #[test]
    fn test_tonelli_shanks_iterations_exhausted() {
        let limits = SearchLimits {
            tonelli_shanks_iterations: 0,
            ..SearchLimits::default()
        };
        let field = PrimeField::with_limits(17, limits).unwrap();
        // 2 = 6^2 is a residue, so the main loop is reached
        let err = field.element(2).sqrt().unwrap_err();
        assert!(matches!(
            err,
            EcError::SearchExhausted {
                search: Search::TonelliShanks,
                attempts: 0
            }
        ));
        // non-residues are classified before the loop
        assert!(field.element(3).sqrt().unwrap().is_none());
    }

    #[test]
    fn test_large_prime_sqrt() {
        // 2^127 - 1
        let p = (num_bigint::BigUint::from(1u32) << 127u32) - 1u32;
        let field = PrimeField::new(p).unwrap();
        let x = field.element(123_456_789_u64);
        let root = x.square().sqrt().unwrap().unwrap();
        assert_eq!(root.square(), x.square());
    }

    #[test]
    fn test_high_two_adicity_prime() {
        // 257 - 1 = 2^8
        let field = PrimeField::new(257).unwrap();
        for v in 1..257u64 {
            let a = field.element(v).square();
            assert_eq!(a.sqrt().unwrap().unwrap().square(), a);
        }
    }
}
