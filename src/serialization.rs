//! Serialization of public values: curves, points, ciphertexts and public keys
//! Integers are written in base 10, base 16 or base 64
//!
//! Deserialization re-validates everything: the curve must be non-singular and
//! every point must satisfy its equation.

use crate::crypto::{Ciphertext, ElGamalKeys};
use crate::elliptic_curve::{CurvePoint, EllipticCurve};
use crate::error::{EcError, Result};
use base64::Engine;
use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ==================== Serialization Format Enum ====================

/// Format for serializing numeric values
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationFormat {
    #[serde(rename = "base10")]
    #[default]
    Base10,
    #[serde(rename = "base16")]
    Base16,
    #[serde(rename = "base64")]
    Base64,
}

impl SerializationFormat {
    /// Convert BigUint to string in this format
    pub fn encode(&self, value: &BigUint) -> String {
        match self {
            SerializationFormat::Base10 => value.to_str_radix(10),
            SerializationFormat::Base16 => value.to_str_radix(16),
            SerializationFormat::Base64 => {
                base64::engine::general_purpose::STANDARD.encode(value.to_bytes_be())
            }
        }
    }

    /// Parse string in this format to BigUint
    pub fn decode(&self, s: &str) -> Result<BigUint> {
        match self {
            SerializationFormat::Base10 => BigUint::parse_bytes(s.as_bytes(), 10)
                .ok_or_else(|| EcError::Decode(format!("invalid base10 integer: {}", s))),
            SerializationFormat::Base16 => {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                BigUint::parse_bytes(digits.as_bytes(), 16)
                    .ok_or_else(|| EcError::Decode(format!("invalid base16 integer: {}", s)))
            }
            SerializationFormat::Base64 => base64::engine::general_purpose::STANDARD
                .decode(s)
                .map(|bytes| BigUint::from_bytes_be(&bytes))
                .map_err(|e| EcError::Decode(format!("base64 decode error: {}", e))),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

// ==================== Curve Serialization ====================

/// Serializable representation of a curve y^2 = x^3 + ax + b (mod p)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SerializableCurve {
    pub a: String,
    pub b: String,
    pub modulus: String,
    #[serde(default)]
    pub format: SerializationFormat,
}

impl SerializableCurve {
    pub fn from_curve(curve: &EllipticCurve, format: SerializationFormat) -> Self {
        SerializableCurve {
            a: format.encode(curve.a().value()),
            b: format.encode(curve.b().value()),
            modulus: format.encode(curve.field().modulus()),
            format,
        }
    }

    /// Rebuilds the curve, rejecting singular parameters
    pub fn to_curve(&self) -> Result<EllipticCurve> {
        let a = self.format.decode(&self.a)?;
        let b = self.format.decode(&self.b)?;
        let p = self.format.decode(&self.modulus)?;
        EllipticCurve::from_integers(a, b, p)
    }

    pub fn to_json(&self) -> Result<String> {
        to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}

// ==================== Point Serialization ====================

/// Serializable representation of a curve point, coordinates absent at infinity
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SerializablePoint {
    pub curve: SerializableCurve,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl SerializablePoint {
    pub fn from_point(point: &CurvePoint, format: SerializationFormat) -> Self {
        SerializablePoint {
            curve: SerializableCurve::from_curve(point.curve(), format),
            x: point.x().map(|x| format.encode(x.value())),
            y: point.y().map(|y| format.encode(y.value())),
        }
    }

    /// Rebuilds the point, checking it lies on the curve
    pub fn to_point(&self) -> Result<CurvePoint> {
        let curve = self.curve.to_curve()?;
        let format = self.curve.format;
        match (&self.x, &self.y) {
            (None, None) => Ok(curve.point_at_infinity()),
            (Some(x), Some(y)) => curve.point(format.decode(x)?, format.decode(y)?),
            _ => Err(EcError::Decode(
                "a point needs both coordinates or neither".to_string(),
            )),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}

// ==================== Ciphertext Serialization ====================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SerializableCiphertext {
    pub c1: SerializablePoint,
    pub c2: SerializablePoint,
}

impl SerializableCiphertext {
    pub fn from_ciphertext(ciphertext: &Ciphertext, format: SerializationFormat) -> Self {
        SerializableCiphertext {
            c1: SerializablePoint::from_point(&ciphertext.c1, format),
            c2: SerializablePoint::from_point(&ciphertext.c2, format),
        }
    }

    pub fn to_ciphertext(&self) -> Result<Ciphertext> {
        let c1 = self.c1.to_point()?;
        let c2 = self.c2.to_point()?;
        if c1.curve() != c2.curve() {
            return Err(EcError::CurveMismatch);
        }
        Ok(Ciphertext { c1, c2 })
    }

    pub fn to_json(&self) -> Result<String> {
        to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}

// ==================== Public Key Serialization ====================

/// The public half (alpha, beta) of an ElGamal key; the private scalar is never serialized
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SerializablePublicKey {
    pub alpha: SerializablePoint,
    pub beta: SerializablePoint,
}

impl SerializablePublicKey {
    pub fn from_keys(keys: &ElGamalKeys, format: SerializationFormat) -> Self {
        SerializablePublicKey {
            alpha: SerializablePoint::from_point(&keys.alpha, format),
            beta: SerializablePoint::from_point(&keys.beta, format),
        }
    }

    /// Returns `(alpha, beta)`
    pub fn to_points(&self) -> Result<(CurvePoint, CurvePoint)> {
        let alpha = self.alpha.to_point()?;
        let beta = self.beta.to_point()?;
        if alpha.curve() != beta.curve() {
            return Err(EcError::CurveMismatch);
        }
        Ok((alpha, beta))
    }

    pub fn to_json(&self) -> Result<String> {
        to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}
