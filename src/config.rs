//! Tunable bounds for the probabilistic searches and the ElGamal embedding.
//!
//! Every retry loop in the crate reads its cap from one of these structs, so a
//! caller that hits `EcError::SearchExhausted` can retry with larger limits.

use crate::error::{EcError, Result};
use serde::{Deserialize, Serialize};

/// Caps for the bounded searches performed by fields and curves
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SearchLimits {
    /// Candidates tried when scanning for a quadratic non-residue
    pub non_residue_candidates: usize,
    /// Iterations of the Tonelli-Shanks main loop
    pub tonelli_shanks_iterations: usize,
    /// Abscissas sampled when looking for a random curve point
    pub random_point_attempts: usize,
    /// Coefficient pairs sampled when looking for a non-singular curve
    pub random_curve_attempts: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            non_residue_candidates: 1 << 20,
            tonelli_shanks_iterations: 4096,
            random_point_attempts: 1024,
            random_curve_attempts: 1024,
        }
    }
}

/// Parameters agreed on out of band by both ElGamal parties
///
/// A plaintext `m` is embedded as the abscissa `λ·m + i` for the smallest offset
/// `i < max_embedding_attempts` that lands on the curve. Decoding computes
/// `floor(x / λ)`, which only recovers `m` when every offset is below `λ`, so
/// [`validate`](Self::validate) requires `λ >= max_embedding_attempts`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ElGamalConfig {
    /// The embedding parameter λ
    pub embedding_parameter: u64,
    /// Offsets tried before giving up on a plaintext
    pub max_embedding_attempts: usize,
}

impl Default for ElGamalConfig {
    fn default() -> Self {
        Self {
            embedding_parameter: 128,
            max_embedding_attempts: 128,
        }
    }
}

impl ElGamalConfig {
    pub fn new(embedding_parameter: u64, max_embedding_attempts: usize) -> Result<Self> {
        let config = Self {
            embedding_parameter,
            max_embedding_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that decoding by floor division is exact
    pub fn validate(&self) -> Result<()> {
        if self.max_embedding_attempts == 0 {
            return Err(EcError::InvalidConfig(
                "max_embedding_attempts must be positive".to_string(),
            ));
        }
        if self.embedding_parameter < self.max_embedding_attempts as u64 {
            return Err(EcError::InvalidConfig(format!(
                "embedding parameter {} is smaller than the embedding search cap {}",
                self.embedding_parameter, self.max_embedding_attempts
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
