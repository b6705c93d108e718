//! Prime field arithmetic
//!
//! - `field_trait`: the [`Field`] capability implemented by algebraic structures
//! - `prime`: [`PrimeField`] handles and their [`FpElement`] values
//! - `sqrt`: Euler's criterion and Tonelli-Shanks

pub mod field_trait;
pub mod prime;
mod sqrt;

pub use field_trait::Field;
pub use prime::{FpElement, PrimeField};
