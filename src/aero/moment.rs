//! Aerodynamic restoring moment from CP-CG offset (§4.4 "Restoring moment").

use crate::math::Vec3;

/// Restoring moment magnitude, applied about `body_axis x v_hat`,
/// negated so it reduces the angle of attack. Zero below the speed/AoA
/// thresholds spec.md names (no meaningful aero moment at near-zero
/// dynamic pressure).
pub fn restoring_moment(
    body_axis: &Vec3<f64>,
    velocity: &Vec3<f64>,
    density: f64,
    cn_alpha: f64,
    alpha: f64,
    reference_area: f64,
    cp_to_cg: f64,
) -> Vec3<f64> {
    let speed = velocity.norm();
    if speed <= 0.1 || alpha.abs() <= 1e-3 {
        return Vec3::zeros();
    }
    let v_hat = velocity / speed;
    let axis = body_axis.cross(&v_hat);
    let axis_norm = axis.norm();
    if axis_norm < 1e-12 {
        return Vec3::zeros();
    }
    let magnitude = 0.5 * density * speed * speed * cn_alpha * alpha * reference_area * cp_to_cg;
    -(axis / axis_norm) * magnitude
}
