//! # Elliptic-curve ElGamal over prime fields
//!
//! From-scratch arithmetic for auditing and teaching: prime fields with runtime
//! moduli, Tonelli-Shanks square roots, the elliptic curve group law and an
//! ElGamal scheme that encrypts integers embedded as curve points.
//!
//! ## Quick Start
//!
//! ```rust
//! use ec_elgamal::{EllipticCurve, PrimeField};
//!
//! let field = PrimeField::new(17).unwrap();
//! let a = field.element(5);
//! let b = field.element(12);
//! assert_eq!(&a + &b, 0i64);
//! assert_eq!(a.multiplicative_inverse().unwrap(), 7i64);
//!
//! let curve = EllipticCurve::from_integers(2, 2, 17).unwrap();
//! let p = curve.point(5, 1).unwrap();
//! assert_eq!(&p + &p, curve.point(6, 3).unwrap());
//! ```
//!
//! ## Module Overview
//!
//! - [`field`] - Prime field arithmetic (𝔽_p), residues and square roots
//! - [`elliptic_curve`] - Curves y² = x³ + ax + b over 𝔽_p and their point group
//! - [`crypto`] - ElGamal key generation, encryption and decryption
//! - [`serialization`] - JSON forms of curves, points, ciphertexts and public keys
//! - [`config`] - Search limits and ElGamal parameters
//!
//! ## Security Warning
//!
//! Nothing here runs in constant time. Use it to learn from, not to protect data.

pub mod bigint;
pub mod config;
pub mod crypto;
pub mod elliptic_curve;
pub mod error;
pub mod field;
pub mod serialization;

// Re-export commonly used types for convenience
pub use config::{ElGamalConfig, SearchLimits};
pub use crypto::{Ciphertext, ElGamalKeys};
pub use elliptic_curve::{CurvePoint, EllipticCurve, Group, Point};
pub use error::{EcError, Result, Search};
pub use field::{Field, FpElement, PrimeField};
pub use serialization::{
    SerializableCiphertext, SerializableCurve, SerializablePoint, SerializablePublicKey,
    SerializationFormat,
};
