//! Vector and quaternion primitives.
//!
//! `Vec3` is a thin re-export of `nalgebra`'s vector type — its algebra is
//! already idiomatic and there is nothing to add. `Quat` is a small
//! newtype that owns the specific formulas this simulator relies on
//! (Hamilton product, axis-angle construction, ZYX Euler extraction,
//! vector rotation) so they stay independently testable instead of
//! hiding behind `nalgebra::UnitQuaternion`'s built-ins.

pub mod quat;

pub use nalgebra::Vector3 as Vec3;
pub use quat::Quat;
