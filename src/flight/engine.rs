//! Flight engine: derivative assembly, phase machine, trajectory
//! sampling, termination (§4.6).
//!
//! `log::debug!`/`log::warn!` mark phase transitions and early
//! terminations, one line each, the way the rest of the crate logs.

use crate::aero;
use crate::atmosphere::{self, AtmosphereOverrides};
use crate::config::{Configuration, SimConfig};
use crate::error::CoreError;
use crate::flight::events::{EventKind, FlightEvent};
use crate::flight::state::{FlightPhase, Kinematics};
use crate::flight::wind::WindModel;
use crate::integrator::rk4_step;
use crate::math::{Quat, Vec3};
use crate::recovery;
use crate::staging;
use crate::vehicle::mass::inertia;
use crate::vehicle::StageStack;

const GIMBAL_LIMIT: f64 = 0.15;
const TRAJECTORY_PERIOD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrajectoryPoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub mach: f64,
    pub aoa: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FlightOutcome {
    Completed,
    IntegrationLimitReached,
    NumericalBreakdown { time: f64 },
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FlightResult {
    pub apogee: f64,
    pub apogee_time: f64,
    pub max_velocity: f64,
    pub max_acceleration: f64,
    pub max_mach: f64,
    pub flight_time: f64,
    pub landing_velocity: f64,
    pub trajectory: Vec<TrajectoryPoint>,
    pub events: Vec<FlightEvent>,
    pub outcome: FlightOutcome,
}

/// Gimbal command: (pitch about body x, yaw about body z), clamped to
/// `±GIMBAL_LIMIT` radians. Default is "no active TVC" (unguided,
/// finned stabilization only) — the hook exists so callers and tests
/// can exercise the gimbal moment-arm sign convention.
pub type GimbalProgram<'a> = dyn Fn(f64, &Kinematics) -> (f64, f64) + 'a;

fn no_gimbal(_t: f64, _k: &Kinematics) -> (f64, f64) {
    (0.0, 0.0)
}

struct ActiveVehicle {
    mass: f64,
    thrust_magnitude: f64,
    cg: f64,
    body_length: f64,
    body_radius: f64,
}

fn active_stage_index(stack: &StageStack) -> usize {
    stack
        .stages
        .iter()
        .position(|s| !s.separated)
        .unwrap_or(stack.stages.len() - 1)
}

fn propellant_remaining(motor: &crate::motor::Motor, elapsed: f64) -> f64 {
    if elapsed <= 0.0 {
        motor.propellant_mass
    } else if elapsed >= motor.burn_time {
        0.0
    } else {
        (motor.propellant_mass - motor.mass_flow_rate(elapsed) * elapsed).max(0.0)
    }
}

fn evaluate_vehicle(stack: &StageStack, active_idx: usize, t: f64) -> ActiveVehicle {
    let active = &stack.stages[active_idx];
    let mut mass = 0.0;
    let mut thrust = 0.0;
    let mut active_motor_mass_now = active.motor.loaded_mass();

    for (offset, stage) in stack.stages[active_idx..].iter().enumerate().filter(|(_, s)| !s.separated) {
        if stage.ignited {
            let elapsed = t - stage.ignition_time.unwrap_or(t);
            let motor_mass_now = stage.motor.dry_mass + propellant_remaining(&stage.motor, elapsed);
            mass += stage.mass.dry_mass + motor_mass_now;
            thrust += stage.motor.thrust_at(elapsed);
            if offset == 0 {
                active_motor_mass_now = motor_mass_now;
            }
        } else {
            mass += stage.total_mass();
        }
    }

    // CG tracked for the active stage only — the composite multi-stage
    // CG including still-attached upper stages is out of scope here;
    // the active stage's own breakdown dominates once boosters separate.
    let cg = crate::vehicle::mass::center_of_gravity(&active.mass, active_motor_mass_now);

    ActiveVehicle {
        mass: mass.max(1e-6),
        thrust_magnitude: thrust,
        cg,
        body_length: active.geometry.total_length(),
        body_radius: active.geometry.body_radius,
    }
}

#[allow(clippy::too_many_arguments)]
fn derivative(
    t: f64,
    y: &[f64; 13],
    stack: &StageStack,
    active_idx: usize,
    wind: &WindModel,
    overrides: &AtmosphereOverrides,
    gimbal: &GimbalProgram,
    drag_factor: f64,
) -> [f64; 13] {
    let k = Kinematics::from_array(*y);
    let vehicle = evaluate_vehicle(stack, active_idx, t);
    let active = &stack.stages[active_idx];

    let atmo = atmosphere::isa_with(k.altitude(), overrides);
    let wind_v = wind.velocity_at(k.altitude(), t);
    let relative_velocity = k.vel - wind_v;

    let body_axis = k.body_axis();
    let aero_out = aero::evaluate(&active.geometry, &atmo, &relative_velocity, &body_axis, vehicle.cg, drag_factor);

    let (gimbal_y, gimbal_z) = gimbal(t, &k);
    let gy = gimbal_y.clamp(-GIMBAL_LIMIT, GIMBAL_LIMIT);
    let gz = gimbal_z.clamp(-GIMBAL_LIMIT, GIMBAL_LIMIT);
    let thrust_dir_body =
        Vec3::new(gz.sin(), gy.cos() * gz.cos(), -gy.sin()).normalize();
    let thrust_body = thrust_dir_body * vehicle.thrust_magnitude;
    let thrust_world = k.quat.rotate(&thrust_body);

    let gravity_world = Vec3::new(0.0, -atmo.gravity, 0.0);

    let dvel = gravity_world + (thrust_world + aero_out.drag_force) / vehicle.mass;

    let omega_quat = Quat::new(0.0, k.omega.x, k.omega.y, k.omega.z);
    let dquat_raw = k.quat.hamilton(&omega_quat);
    let dquat = Quat::new(
        0.5 * dquat_raw.w,
        0.5 * dquat_raw.x,
        0.5 * dquat_raw.y,
        0.5 * dquat_raw.z,
    );

    let inertia_vec = inertia(vehicle.mass, vehicle.body_length, vehicle.body_radius);
    let moment_body = k.quat.conjugate().rotate(&aero_out.restoring_moment);

    let nozzle_arm = Vec3::new(0.0, -(vehicle.body_length - vehicle.cg), 0.0);
    let gimbal_moment_body = nozzle_arm.cross(&thrust_body);
    let total_moment = moment_body + gimbal_moment_body;

    let domega = Vec3::new(
        (total_moment.x - (inertia_vec.z - inertia_vec.y) * k.omega.y * k.omega.z) / inertia_vec.x,
        (total_moment.y - (inertia_vec.x - inertia_vec.z) * k.omega.x * k.omega.z) / inertia_vec.y,
        (total_moment.z - (inertia_vec.y - inertia_vec.x) * k.omega.x * k.omega.y) / inertia_vec.z,
    );

    [
        k.vel.x, k.vel.y, k.vel.z,
        dvel.x, dvel.y, dvel.z,
        dquat.w, dquat.x, dquat.y, dquat.z,
        domega.x, domega.y, domega.z,
    ]
}

/// Fly a configuration to completion (or early termination), using the
/// default "no active TVC" gimbal program.
pub fn fly(config: &Configuration) -> Result<FlightResult, CoreError> {
    fly_with_gimbal(config, &no_gimbal)
}

/// Fly a configuration with a supplied gimbal program (mainly for
/// exercising the gimbal moment-arm sign convention in tests).
pub fn fly_with_gimbal(config: &Configuration, gimbal: &GimbalProgram) -> Result<FlightResult, CoreError> {
    config.validate()?;
    let mut stack = config.stack.clone();
    let sim = &config.sim;

    let mut k = Kinematics::default();
    let mut t = 0.0;
    let mut phase = FlightPhase::PreLaunch;
    let mut events = Vec::new();
    let mut trajectory = Vec::new();
    let mut next_sample = 0.0;

    let mut apogee = 0.0;
    let mut apogee_time = 0.0;
    let mut max_velocity = 0.0_f64;
    let mut max_acceleration = 0.0_f64;
    let mut max_mach = 0.0_f64;
    let mut prev_vy = 0.0;
    let mut outcome = FlightOutcome::Completed;

    events.push(FlightEvent::new(0.0, EventKind::Liftoff, 0.0, 0.0));

    let max_steps = (sim.t_max / sim.dt) as usize + 1;

    for _ in 0..max_steps {
        if phase == FlightPhase::Landed {
            break;
        }
        if t >= sim.t_max {
            outcome = FlightOutcome::IntegrationLimitReached;
            log::warn!("flight hit t_max={:.1}s before landing", sim.t_max);
            break;
        }

        let active_idx = active_stage_index(&stack);
        let staging_events = staging::step(&mut stack, t, k.altitude(), k.vel);
        for &i in &staging_events.ignited {
            events.push(FlightEvent::new(t, EventKind::Ignition { stage: i }, k.altitude(), k.vel.norm()));
            if phase == FlightPhase::PreLaunch {
                phase = FlightPhase::Powered;
                log::debug!("liftoff at t={:.3}s", t);
            }
        }
        for &i in &staging_events.burned_out {
            events.push(FlightEvent::new(t, EventKind::Burnout { stage: i }, k.altitude(), k.vel.norm()));
        }
        for &i in &staging_events.separated {
            events.push(FlightEvent::new(t, EventKind::Separation { stage: i }, k.altitude(), k.vel.norm()));
        }

        let y = k.to_array();
        let y_new = rk4_step(t, &y, sim.dt, |tt, yy| {
            derivative(
                tt,
                yy,
                &stack,
                active_idx,
                &config.wind,
                &config.atmosphere_overrides,
                gimbal,
                config.aero_drag_factor,
            )
        });

        if y_new.iter().any(|v| !v.is_finite()) {
            outcome = FlightOutcome::NumericalBreakdown { time: t };
            events.push(FlightEvent::new(t, EventKind::NumericalBreakdown, k.altitude(), k.vel.norm()));
            log::warn!("numerical breakdown at t={:.3}s", t);
            break;
        }

        let mut k_new = Kinematics::from_array(y_new);
        let raw_norm = k_new.quat.norm();
        if (raw_norm - 1.0).abs() > 1e-3 {
            outcome = FlightOutcome::NumericalBreakdown { time: t };
            events.push(FlightEvent::new(t, EventKind::NumericalBreakdown, k.altitude(), k.vel.norm()));
            log::warn!("quaternion norm deviation {:.4} at t={:.3}s", raw_norm, t);
            break;
        }
        k_new.quat = k_new.quat.normalize();

        let dt = sim.dt;
        t += dt;

        let accel = (k_new.vel - k.vel).norm() / dt;
        max_acceleration = max_acceleration.max(accel);
        max_velocity = max_velocity.max(k_new.vel.norm());

        let atmo = atmosphere::isa_with(k_new.altitude(), &config.atmosphere_overrides);
        let wind_v = config.wind.velocity_at(k_new.altitude(), t);
        let relative_speed = (k_new.vel - wind_v).norm();
        let mach = if atmo.sound_speed > 1e-6 { relative_speed / atmo.sound_speed } else { 0.0 };
        max_mach = max_mach.max(mach);

        let active_after = active_stage_index(&stack);
        let thrust_now = evaluate_vehicle(&stack, active_after, t).thrust_magnitude;

        match phase {
            FlightPhase::Powered => {
                if thrust_now <= 0.0 {
                    phase = FlightPhase::Coasting;
                    log::debug!("burnout -> coasting at t={:.3}s", t);
                }
            }
            FlightPhase::Coasting => {
                if prev_vy > 0.0 && k_new.vel.y <= 0.0 && k_new.altitude() > 10.0 {
                    phase = FlightPhase::Descent;
                    apogee = k_new.altitude();
                    apogee_time = t;
                    events.push(FlightEvent::new(t, EventKind::Apogee, k_new.altitude(), k_new.vel.norm()));
                    log::debug!("apogee {:.1}m at t={:.3}s", apogee, t);
                }
            }
            _ => {}
        }

        if k_new.altitude() > apogee {
            apogee = k_new.altitude();
            apogee_time = t;
        }

        if phase != FlightPhase::Landed && k_new.altitude() <= 0.0 && t > 0.1 {
            k_new.pos.y = 0.0;
            k_new.vel.x *= 0.1;
            k_new.vel.z *= 0.1;
            phase = FlightPhase::Landed;
            events.push(FlightEvent::new(t, EventKind::Landing, 0.0, k_new.vel.norm()));
            log::debug!("landing at t={:.3}s", t);
        }

        prev_vy = k_new.vel.y;
        k = k_new;

        if t >= next_sample {
            trajectory.push(TrajectoryPoint {
                t, x: k.pos.x, y: k.pos.y, z: k.pos.z,
                vx: k.vel.x, vy: k.vel.y, vz: k.vel.z,
                mach, aoa: 0.0,
            });
            next_sample += TRAJECTORY_PERIOD;
        }
    }

    let landing_velocity = if phase == FlightPhase::Landed { k.vel.norm() } else { 0.0 };

    Ok(FlightResult {
        apogee,
        apogee_time,
        max_velocity,
        max_acceleration,
        max_mach,
        flight_time: t,
        landing_velocity,
        trajectory,
        events,
        outcome,
    })
}

/// Drift the departed stage and recovery-configured final stage to the
/// ground, producing the `RecoveryResult` (§4.7 "Dual-deploy descent").
pub fn recover(result: &FlightResult, config: &Configuration, mass: f64) -> recovery::RecoveryResult {
    let apogee_pos = Vec3::new(0.0, result.apogee, 0.0);
    recovery::descend(
        &config.recovery,
        mass,
        apogee_pos,
        result.apogee_time,
        &config.wind,
        &config.atmosphere_overrides,
    )
}
