//! Mass breakdown and moment-of-inertia approximation (§3 `RocketMass`).

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Per-component centers of mass, measured from the nose tip along the
/// rocket's long axis. Mass moments of inertia are *not* stored here —
/// they are recomputed every step from current total mass and length via
/// the cylinder-plus-point approximation, since mass (propellant) and
/// length (staged-away sections) both change over a flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketMass {
    pub dry_mass: f64,
    pub nose_cg: f64,
    pub body_cg: f64,
    pub fins_cg: f64,
    pub recovery_cg: f64,
    pub motor_casing_cg: f64,
}

/// Principal moments of inertia [Ixx, Iyy, Izz] (roll axis = z, per
/// spec.md §3): `Ixx = Iyy = m*L^2/12 + m*R^2/4`, `Izz = m*R^2/2`.
pub fn inertia(total_mass: f64, length: f64, radius: f64) -> Vec3<f64> {
    let ixx = total_mass * length * length / 12.0 + total_mass * radius * radius / 4.0;
    let izz = total_mass * radius * radius / 2.0;
    Vec3::new(ixx, ixx, izz)
}

/// Structural component mass fractions used to collapse `RocketMass`'s
/// per-component centers into a single structural CG. The data model
/// (§3 `RocketMass`) gives positions but not per-component masses, so a
/// typical hobby-rocket breakdown stands in: nose 15%, body 45%, fins
/// 20%, recovery gear 10%, motor mount/casing hardware 10%.
const NOSE_FRACTION: f64 = 0.15;
const BODY_FRACTION: f64 = 0.45;
const FINS_FRACTION: f64 = 0.20;
const RECOVERY_FRACTION: f64 = 0.10;
const MOTOR_MOUNT_FRACTION: f64 = 0.10;

/// Structural CG (motor excluded), from the nose tip, m.
pub fn structural_cg(mass: &RocketMass) -> f64 {
    mass.nose_cg * NOSE_FRACTION
        + mass.body_cg * BODY_FRACTION
        + mass.fins_cg * FINS_FRACTION
        + mass.recovery_cg * RECOVERY_FRACTION
        + mass.motor_casing_cg * MOTOR_MOUNT_FRACTION
}

/// Mass-weighted CG of structure plus the current motor load (§4.10
/// "mass-weighted CG computed over supplied components and the current
/// motor load"), from the nose tip, m. `motor_mass_now` is the motor's
/// current total mass (casing + remaining propellant); it is assumed to
/// act at `mass.motor_casing_cg`, shifting forward as propellant burns.
pub fn center_of_gravity(mass: &RocketMass, motor_mass_now: f64) -> f64 {
    let structural = structural_cg(mass);
    let total = mass.dry_mass + motor_mass_now;
    if total <= 0.0 {
        return structural;
    }
    (mass.dry_mass * structural + motor_mass_now * mass.motor_casing_cg) / total
}
