//! Error types shared by the field, curve and ElGamal layers.

use num_bigint::{BigInt, BigUint};
use std::fmt;
use thiserror::Error;

/// Result type for field, curve and ElGamal operations
pub type Result<T> = std::result::Result<T, EcError>;

/// Which bounded search ran out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    /// Linear scan for a quadratic non-residue
    NonResidue,
    /// Main loop of Tonelli-Shanks
    TonelliShanks,
    /// Rejection sampling of a random curve point
    RandomPoint,
    /// Rejection sampling of non-singular curve coefficients
    RandomCurve,
    /// Search for the embedding offset of a plaintext
    Embedding,
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Search::NonResidue => "quadratic non-residue search",
            Search::TonelliShanks => "Tonelli-Shanks iteration",
            Search::RandomPoint => "random point search",
            Search::RandomCurve => "random curve search",
            Search::Embedding => "message embedding search",
        };
        f.write_str(name)
    }
}

/// Error types for field, curve and ElGamal operations
#[derive(Debug, Error)]
pub enum EcError {
    /// The modulus cannot define a field (p <= 1), or is too small for the requested operation
    #[error("invalid modulus {0}")]
    InvalidModulus(BigUint),

    /// Operands belong to fields with different moduli
    #[error("field mismatch: element of F_{left} combined with element of F_{right}")]
    FieldMismatch { left: BigUint, right: BigUint },

    /// Operands belong to different curves
    #[error("points belong to different curves")]
    CurveMismatch,

    /// 4a^3 + 27b^2 vanishes modulo p
    #[error("curve is singular: 4a^3 + 27b^2 = 0 (mod {0})")]
    SingularCurve(BigUint),

    /// The pair does not satisfy y^2 = x^3 + ax + b
    #[error("point ({x}, {y}) is not on the curve")]
    PointNotOnCurve { x: BigUint, y: BigUint },

    /// Division by the zero element
    #[error("division by zero")]
    DivisionByZero,

    /// Field exponentiation was given a negative exponent
    #[error("negative exponent {0}")]
    NegativeExponent(BigInt),

    /// Scalar multiplication was given a negative scalar
    #[error("negative scalar {0}")]
    NegativeScalar(BigInt),

    /// A bounded search gave up
    #[error("{search} exhausted after {attempts} attempts")]
    SearchExhausted { search: Search, attempts: usize },

    /// The plaintext cannot be embedded and decoded without wrapping modulo p
    #[error("message {message} is not representable in F_{modulus} with the current embedding")]
    MessageTooLarge { message: BigUint, modulus: BigUint },

    /// Decryption produced the point at infinity
    #[error("ciphertext does not decrypt to an affine point")]
    InvalidCiphertext,

    /// ElGamal parameters under which decoding would not be exact
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed serialized value
    #[error("decode error: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EcError {
    pub(crate) fn exhausted(search: Search, attempts: usize) -> Self {
        log::warn!("{} exhausted after {} attempts", search, attempts);
        EcError::SearchExhausted { search, attempts }
    }
}
