//! Barrowman-style aerodynamic model (§4.4).
//!
//! Split into CP/normal-force-slope (`barrowman`), the five-term drag
//! decomposition (`drag`), and the restoring moment (`moment`) — each is
//! independently testable, and `AeroModel` composes them into the single
//! call the flight engine's derivative function makes per step.

pub mod barrowman;
pub mod drag;
pub mod moment;

use crate::atmosphere::Atmo;
use crate::math::Vec3;
use crate::vehicle::geometry::RocketGeometry;

/// Aerodynamic forces and moment resolved in the requested frames for a
/// single instant.
#[derive(Debug, Clone, Copy)]
pub struct AeroOutput {
    /// Drag force, world/inertial frame (opposes relative velocity).
    pub drag_force: Vec3<f64>,
    /// Restoring moment, computed about `body_axis x v_hat`.
    pub restoring_moment: Vec3<f64>,
    pub mach: f64,
    pub cp: f64,
    pub cn_alpha: f64,
    pub cd: f64,
}

/// Evaluate the full aero model at one instant.
///
/// `relative_velocity` is velocity relative to the air mass (world
/// frame); `body_axis` is the vehicle's +body-y axis in world frame;
/// `cg` is the current center of gravity from the nose tip, m;
/// `drag_factor` scales the drag coefficient (Monte Carlo's
/// `drag_factor` perturbation; 1.0 for a nominal flight).
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    geom: &RocketGeometry,
    atmo: &Atmo,
    relative_velocity: &Vec3<f64>,
    body_axis: &Vec3<f64>,
    cg: f64,
    drag_factor: f64,
) -> AeroOutput {
    let speed = relative_velocity.norm();
    let (cp, cn_alpha) = barrowman::center_of_pressure(geom);
    let mach = if atmo.sound_speed > 1e-6 {
        speed / atmo.sound_speed
    } else {
        0.0
    };

    let alpha = if speed > 1e-6 {
        let cos_alpha = (relative_velocity.dot(body_axis) / speed).clamp(-1.0, 1.0);
        cos_alpha.acos()
    } else {
        0.0
    };

    let reynolds = if atmo.viscosity > 1e-12 {
        atmo.density * speed * geom.total_length() / atmo.viscosity
    } else {
        0.0
    };

    let cd = drag::total_drag_coefficient(
        geom,
        &drag::DragInputs { reynolds, mach, alpha },
    ) * drag_factor;

    let ref_area = geom.reference_area();
    let drag_force = if speed > 1e-6 {
        let q = 0.5 * atmo.density * speed * speed;
        -relative_velocity.normalize() * (q * cd * ref_area)
    } else {
        Vec3::zeros()
    };

    let moment = moment::restoring_moment(
        body_axis,
        relative_velocity,
        atmo.density,
        cn_alpha,
        alpha,
        ref_area,
        cp - cg,
    );

    AeroOutput {
        drag_force,
        restoring_moment: moment,
        mach,
        cp,
        cn_alpha,
        cd,
    }
}
