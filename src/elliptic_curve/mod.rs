//! Elliptic curve groups over prime fields
//!
//! Short Weierstrass form y^2 = x^3 + ax + b, affine coordinates with a tagged
//! point at infinity.

mod curve;
pub mod group_trait;
mod point;

pub use curve::EllipticCurve;
pub use group_trait::Group;
pub use point::{CurvePoint, Point};
