//! # bio_math - Vector Math
//!
//! The handful of vector operations the simulation needs: distances for
//! attack ranges, normalized aim directions, and planar rotation for
//! spreading bullet fans around the vertical axis.

pub mod vector;

pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}
