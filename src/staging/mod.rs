//! Multi-stage ignition/separation trigger evaluation (§4.7 "Multi-stage
//! triggers"). Pure functions over `Stage` flags — the flight engine
//! calls these once per committed step, ignitions before separations,
//! so a sustainer can ignite on the same step its booster separates.

use crate::math::Vec3;
use crate::vehicle::stage::{IgnitionTrigger, SeparationTrigger, Stage};
use crate::vehicle::StageStack;

/// Evaluate whether `stage` should ignite at this instant.
fn should_ignite(
    stage: &Stage,
    t: f64,
    altitude: f64,
    vertical_velocity: f64,
    prior_stage_separated: bool,
    prior_separation_time: Option<f64>,
) -> bool {
    if stage.ignited {
        return false;
    }
    match stage.ignition_trigger {
        IgnitionTrigger::Liftoff => t >= 0.0,
        IgnitionTrigger::Delay(delay) => t >= delay,
        IgnitionTrigger::Altitude(h_ign) => altitude >= h_ign,
        IgnitionTrigger::Apogee => vertical_velocity <= 0.0 && altitude > 100.0,
        IgnitionTrigger::Separation => {
            prior_stage_separated
                && prior_separation_time.map(|t_sep| t - t_sep >= 0.0).unwrap_or(false)
        }
    }
}

/// Evaluate whether `stage` should separate at this instant.
fn should_separate(stage: &Stage, t: f64, altitude: f64, speed: f64) -> bool {
    if stage.separated || !stage.ignited {
        return false;
    }
    match stage.separation_trigger {
        SeparationTrigger::Burnout { delay } => {
            stage.burned_out
                && stage
                    .ignition_time
                    .map(|t_ign| t - t_ign - stage.motor.burn_time >= delay)
                    .unwrap_or(false)
        }
        SeparationTrigger::Timer(delay) => {
            stage.ignition_time.map(|t_ign| t - t_ign >= delay).unwrap_or(false)
        }
        SeparationTrigger::Altitude(h_sep) => altitude >= h_sep,
        SeparationTrigger::Velocity(v_sep) => speed >= v_sep,
        SeparationTrigger::Command => false,
    }
}

/// One step's worth of staging state transitions. Returns the indices
/// that ignited and separated this step, in evaluation order, for the
/// caller to log as causally-ordered events.
#[derive(Debug, Default, Clone)]
pub struct StagingEvents {
    pub ignited: Vec<usize>,
    pub burned_out: Vec<usize>,
    pub separated: Vec<usize>,
}

/// Evaluate and apply ignition then separation triggers for every stage
/// in the stack, in stack order (§4.7 "Ordering").
pub fn step(stack: &mut StageStack, t: f64, altitude: f64, velocity: Vec3<f64>) -> StagingEvents {
    let mut events = StagingEvents::default();
    let speed = velocity.norm();

    // Look ahead to whether each stage will separate this step, before any
    // stage state is mutated, so an i-th stage's ignition can see its prior
    // stage's separation from the same step (zero-delay back-to-back staging).
    let will_separate: Vec<bool> = (0..stack.stages.len())
        .map(|i| should_separate(&stack.stages[i], t, altitude, speed))
        .collect();

    for i in 0..stack.stages.len() {
        let prior_separated = i == 0 || stack.stages[i - 1].separated || will_separate[i - 1];
        let prior_separation_time = if i == 0 {
            None
        } else if will_separate[i - 1] {
            Some(t)
        } else {
            stack.stages[i - 1].separation_time
        };
        let stage = &mut stack.stages[i];
        if should_ignite(stage, t, altitude, velocity.y, prior_separated, prior_separation_time) {
            stage.ignited = true;
            stage.ignition_time = Some(t);
            events.ignited.push(i);
        }
    }

    for i in 0..stack.stages.len() {
        let stage = &mut stack.stages[i];
        if stage.ignited && !stage.burned_out {
            if let Some(t_ign) = stage.ignition_time {
                if t - t_ign >= stage.motor.burn_time {
                    stage.burned_out = true;
                    events.burned_out.push(i);
                }
            }
        }
    }

    for i in 0..stack.stages.len() {
        let stage = &mut stack.stages[i];
        if should_separate(stage, t, altitude, speed) {
            stage.separated = true;
            stage.separation_time = Some(t);
            events.separated.push(i);
        }
    }

    events
}

/// Simplified 1-D ballistic model for a departed stage (Cd=1.0 tumbling),
/// coarse fixed-step Euler integration to record its impact time/position.
pub fn departed_stage_impact(
    mut altitude: f64,
    mut vertical_velocity: f64,
    mass: f64,
    reference_area: f64,
    gravity: f64,
    air_density_at: impl Fn(f64) -> f64,
) -> f64 {
    const CD_TUMBLING: f64 = 1.0;
    let dt = 0.05;
    let mut t = 0.0;
    while altitude > 0.0 && t < 600.0 {
        let rho = air_density_at(altitude);
        let q = 0.5 * rho * vertical_velocity * vertical_velocity;
        let drag_accel = (q * CD_TUMBLING * reference_area / mass) * vertical_velocity.signum();
        let accel = -gravity - drag_accel;
        vertical_velocity += accel * dt;
        altitude += vertical_velocity * dt;
        t += dt;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::Motor;
    use crate::vehicle::mass::RocketMass;
    use crate::vehicle::geometry::{NoseShape, RocketGeometry, SurfaceRoughness};

    fn simple_stage(name: &str, ignition: IgnitionTrigger, separation: SeparationTrigger) -> Stage {
        let geom = RocketGeometry::new(
            0.03, 0.5, 0.1, NoseShape::Ogive, 3, 0.1, 0.05, 0.08, 0.03, 0.003, None,
            SurfaceRoughness::Standard,
        )
        .unwrap();
        let mass = RocketMass {
            dry_mass: 1.0,
            nose_cg: 0.1,
            body_cg: 0.4,
            fins_cg: 0.55,
            recovery_cg: 0.3,
            motor_casing_cg: 0.5,
        };
        let motor = Motor::constant_thrust("M", 0.2, 0.1, 2.0, 50.0).unwrap();
        Stage::new(name, geom, mass, motor, ignition, separation, 0.0)
    }

    #[test]
    fn booster_ignites_at_liftoff() {
        let mut stack = StageStack::new(vec![simple_stage(
            "Booster",
            IgnitionTrigger::Liftoff,
            SeparationTrigger::Burnout { delay: 0.0 },
        )]);
        let events = step(&mut stack, 0.0, 0.0, Vec3::zeros());
        assert_eq!(events.ignited, vec![0]);
        assert!(stack.stages[0].ignited);
    }

    #[test]
    fn sustainer_ignites_same_step_as_booster_separation_with_zero_delay() {
        let mut stack = StageStack::new(vec![
            simple_stage("Booster", IgnitionTrigger::Liftoff, SeparationTrigger::Burnout { delay: 0.0 }),
            simple_stage("Sustainer", IgnitionTrigger::Separation, SeparationTrigger::Timer(5.0)),
        ]);
        step(&mut stack, 0.0, 0.0, Vec3::zeros());
        stack.stages[0].burned_out = true;
        let events = step(&mut stack, 2.0, 500.0, Vec3::new(0.0, 100.0, 0.0));
        assert!(events.separated.contains(&0));
        assert!(events.ignited.contains(&1));
    }
}
