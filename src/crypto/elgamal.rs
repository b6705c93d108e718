//! ElGamal encryption on elliptic curves
//!
//! Key material is a base point `alpha`, a public point `beta = k * alpha` and
//! the private scalar `k`. A plaintext integer `m` is embedded as a curve point
//! whose abscissa is `λ·m + i` for the least offset `i` that lands on the curve
//! (Koblitz-style), and the ciphertext is the pair
//!
//! ```text
//! C1 = x * alpha
//! C2 = M + x * beta
//! ```
//!
//! for a fresh random `x`. Decryption recovers `M = C2 - k * C1` and the
//! plaintext as `floor(M.x / λ)`.
//!
//! # Security
//! This is a teaching implementation: arithmetic is variable time and the base
//! point is not checked for a large prime order.

use crate::bigint;
use crate::config::ElGamalConfig;
use crate::elliptic_curve::{CurvePoint, EllipticCurve};
use crate::error::{EcError, Result, Search};
use crate::field::PrimeField;
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use rand::{CryptoRng, RngCore};

/// Output of key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElGamalKeys {
    /// Base point
    pub alpha: CurvePoint,
    /// Public point, `private_key * alpha`
    pub beta: CurvePoint,
    /// Private scalar k with 1 < k < p - 1
    pub private_key: BigUint,
}

impl ElGamalKeys {
    pub fn curve(&self) -> &EllipticCurve {
        self.alpha.curve()
    }

    /// Splits into `(alpha, beta, k)`
    pub fn into_parts(self) -> (CurvePoint, CurvePoint, BigUint) {
        (self.alpha, self.beta, self.private_key)
    }
}

/// Ciphertext pair (C1, C2)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: CurvePoint,
    pub c2: CurvePoint,
}

/// Generates keys over F_p using the thread-local RNG
///
/// # Errors
/// `EcError::InvalidModulus` if `p < 5` (no scalar satisfies 1 < k < p - 1),
/// `EcError::SearchExhausted` if no curve or base point was found.
pub fn generate_keys<T: Into<BigInt>>(p: T) -> Result<ElGamalKeys> {
    let field = PrimeField::new(p)?;
    generate_keys_with_rng(&field, &mut rand::rng())
}

/// Picks a random curve over `field`, a random base point and a random private scalar
pub fn generate_keys_with_rng<R: RngCore + CryptoRng + ?Sized>(
    field: &PrimeField,
    rng: &mut R,
) -> Result<ElGamalKeys> {
    let p = field.modulus();
    if *p < BigUint::from(5u32) {
        return Err(EcError::InvalidModulus(p.clone()));
    }

    let curve = EllipticCurve::random(field, rng)?;
    let alpha = curve.random_point(rng)?;

    // 1 < k < p - 1
    let low = BigUint::from(2u32);
    let high = p - 2u32;
    let private_key = bigint::random_in_range(&low, &high, rng);

    let beta = alpha.scalar_mul(private_key.clone())?;
    log::debug!("generated ElGamal keys on {}, alpha = {}", curve, alpha);

    Ok(ElGamalKeys {
        alpha,
        beta,
        private_key,
    })
}

/// Maps a plaintext to a curve point
///
/// Tries abscissas `λ·m + i` for `i = 0, 1, ...` below the configured cap and
/// returns the first one whose right-hand side is a square.
///
/// # Errors
/// `EcError::MessageTooLarge` if `λ·m + cap - 1 >= p` (decoding would wrap),
/// `EcError::SearchExhausted` if every offset misses the curve.
pub fn embed(message: &BigUint, curve: &EllipticCurve, config: &ElGamalConfig) -> Result<CurvePoint> {
    config.validate()?;

    let field = curve.field();
    let lambda = BigUint::from(config.embedding_parameter);
    let base = &lambda * message;
    let largest = &base + (config.max_embedding_attempts - 1);
    if message >= field.modulus() || &largest >= field.modulus() {
        return Err(EcError::MessageTooLarge {
            message: message.clone(),
            modulus: field.modulus().clone(),
        });
    }

    for offset in 0..config.max_embedding_attempts {
        let x = field.element(&base + offset);
        if let Some(point) = curve.lift_x(&x)? {
            log::trace!("embedded message {} with offset {}", message, offset);
            return Ok(point);
        }
    }

    Err(EcError::exhausted(
        Search::Embedding,
        config.max_embedding_attempts,
    ))
}

/// Recovers the plaintext from an embedded point
pub fn extract(point: &CurvePoint, config: &ElGamalConfig) -> Result<BigUint> {
    config.validate()?;
    let x = point.x().ok_or(EcError::InvalidCiphertext)?;
    Ok(x.value() / config.embedding_parameter)
}

/// Encrypts `message` for the holder of the private key behind `beta`, using the
/// thread-local RNG
pub fn encrypt(
    message: &BigUint,
    alpha: &CurvePoint,
    beta: &CurvePoint,
    config: &ElGamalConfig,
) -> Result<Ciphertext> {
    encrypt_with_rng(message, alpha, beta, config, &mut rand::rng())
}

/// # Errors
/// `EcError::CurveMismatch` if `alpha` and `beta` lie on different curves, plus
/// the failures of [`embed`].
pub fn encrypt_with_rng<R: RngCore + CryptoRng + ?Sized>(
    message: &BigUint,
    alpha: &CurvePoint,
    beta: &CurvePoint,
    config: &ElGamalConfig,
    rng: &mut R,
) -> Result<Ciphertext> {
    let curve = alpha.curve();
    if curve != beta.curve() {
        return Err(EcError::CurveMismatch);
    }

    let message_point = embed(message, curve, config)?;

    let x = bigint::random_in_range(&BigUint::one(), &(curve.field().modulus() - 1u32), rng);
    let c1 = alpha.scalar_mul(x.clone())?;
    let c2 = message_point.checked_add(&beta.scalar_mul(x)?)?;

    Ok(Ciphertext { c1, c2 })
}

/// Decrypts (C1, C2) with the private scalar `k`
///
/// # Errors
/// `EcError::CurveMismatch` if the two points lie on different curves,
/// `EcError::InvalidCiphertext` if the recovered point is the point at infinity.
pub fn decrypt(
    c1: &CurvePoint,
    c2: &CurvePoint,
    config: &ElGamalConfig,
    private_key: &BigUint,
) -> Result<BigUint> {
    if c1.curve() != c2.curve() {
        return Err(EcError::CurveMismatch);
    }

    // k * C1 = k * x * alpha = x * beta
    let shared = c1.scalar_mul(private_key.clone())?;
    let message_point = c2.checked_sub(&shared)?;
    extract(&message_point, config)
}

impl Ciphertext {
    pub fn decrypt(&self, config: &ElGamalConfig, private_key: &BigUint) -> Result<BigUint> {
        decrypt(&self.c1, &self.c2, config, private_key)
    }
}
