//! Cross-module scenario tests (spec.md §8 "Scenarios").

use rocket_sim::config::{Configuration, LaunchConditions, SimConfig};
use rocket_sim::flight::{self, EventKind, WindModel};
use rocket_sim::flutter::{self, FinPlanform};
use rocket_sim::integrator::rk4_step;
use rocket_sim::material::{Material, MaterialCategory};
use rocket_sim::motor::{Motor, ThrustPoint};
use rocket_sim::recovery::{Canopy, RecoveryConfig};
use rocket_sim::stability;
use rocket_sim::vehicle::{
    IgnitionTrigger, NoseShape, RocketGeometry, RocketMass, SeparationTrigger, Stage, StageStack,
    SurfaceRoughness,
};

fn alpha_iii_geometry() -> RocketGeometry {
    RocketGeometry::new(
        0.0122, 0.240, 0.090, NoseShape::Ogive, 3, 0.07, 0.03, 0.04, 0.03, 0.003, None,
        SurfaceRoughness::Smooth,
    )
    .unwrap()
}

fn alpha_iii_mass() -> RocketMass {
    RocketMass {
        dry_mass: 0.028,
        nose_cg: 0.04,
        body_cg: 0.15,
        fins_cg: 0.22,
        recovery_cg: 0.10,
        motor_casing_cg: 0.21,
    }
}

fn c6_curve() -> Vec<ThrustPoint> {
    vec![
        ThrustPoint { time: 0.0, thrust: 0.0 },
        ThrustPoint { time: 0.1, thrust: 14.0 },
        ThrustPoint { time: 0.2, thrust: 12.5 },
        ThrustPoint { time: 0.6, thrust: 6.0 },
        ThrustPoint { time: 1.0, thrust: 5.5 },
        ThrustPoint { time: 1.6, thrust: 5.0 },
        ThrustPoint { time: 1.86, thrust: 0.0 },
    ]
}

fn alpha_iii_configuration() -> Configuration {
    let motor = Motor::from_curve("C6-5", 0.0179, 0.0123, 1.86, c6_curve()).unwrap();
    let stage = Stage::new(
        "sustainer",
        alpha_iii_geometry(),
        alpha_iii_mass(),
        motor,
        IgnitionTrigger::Liftoff,
        SeparationTrigger::Burnout { delay: 5.0 },
        0.0,
    );

    Configuration {
        stack: StageStack::new(vec![stage]),
        recovery: RecoveryConfig::SingleDeploy {
            canopy: Canopy { diameter: 0.30, drag_coefficient: 0.75 },
        },
        launch: LaunchConditions::default(),
        wind: WindModel::calm(),
        atmosphere_overrides: Default::default(),
        sim: SimConfig::default(),
        aero_drag_factor: 1.0,
    }
}

#[test]
fn drop_test_matches_analytic_free_fall() {
    // Property 6: thrust-off, gravity-only, no-drag flight from height h
    // with zero initial velocity lands at t = sqrt(2h/g).
    const G: f64 = 9.806_65;
    const H: f64 = 100.0;

    let mut y = [H, 0.0]; // [altitude, velocity]
    let dt = 1.0e-3;
    let mut t = 0.0;
    while y[0] > 0.0 {
        y = rk4_step(t, &y, dt, |_t, y| [y[1], -G]);
        t += dt;
    }

    let expected = (2.0 * H / G).sqrt();
    assert!((t - expected).abs() / expected < 1.0e-3, "landing time {t} vs expected {expected}");

    let landing_speed = (-y[1]).abs();
    let expected_speed = (2.0 * G * H).sqrt();
    assert!((landing_speed - expected_speed).abs() / expected_speed < 1.0e-3);
}

#[test]
fn estes_alpha_iii_c6_5_flies_within_expected_envelope() {
    let config = alpha_iii_configuration();
    let result = flight::fly(&config).expect("valid configuration flies");

    assert!((200.0..=700.0).contains(&result.apogee), "apogee {} out of range", result.apogee);
    assert!(
        (60.0..=180.0).contains(&result.max_velocity),
        "max velocity {} out of range",
        result.max_velocity
    );
    assert!(
        (15.0..=60.0).contains(&result.flight_time),
        "flight time {} out of range",
        result.flight_time
    );

    let kinds: Vec<&EventKind> = result.events.iter().map(|e| &e.kind).collect();
    let ignition_idx = kinds.iter().position(|k| matches!(k, EventKind::Ignition { .. })).unwrap();
    let burnout_idx = kinds.iter().position(|k| matches!(k, EventKind::Burnout { .. })).unwrap();
    let apogee_idx = kinds.iter().position(|k| matches!(k, EventKind::Apogee)).unwrap();
    let landing_idx = kinds.iter().position(|k| matches!(k, EventKind::Landing)).unwrap();

    assert!(ignition_idx < burnout_idx);
    assert!(burnout_idx < apogee_idx);
    assert!(apogee_idx < landing_idx);
}

#[test]
fn flutter_g10_100_50_80_3mm_meets_narts_thresholds() {
    let fin = FinPlanform::new(0.100, 0.050, 0.080, 0.003).unwrap();
    let g10 = Material::preset(MaterialCategory::FiberglassG10);
    let atmo = rocket_sim::atmosphere::isa(0.0);

    let v_f = flutter::flutter_velocity(&fin, g10.shear_modulus, atmo.pressure, atmo.sound_speed);
    assert!(v_f > 100.0, "expected V_f > 100 m/s, got {v_f}");

    let result = flutter::analyze(&fin, g10.shear_modulus, atmo.pressure, atmo.sound_speed, 150.0);
    assert!(result.safety_factor >= 1.5, "safety factor {} at v_max=150", result.safety_factor);

    let thicker = FinPlanform::new(0.100, 0.050, 0.080, 0.005).unwrap();
    let v_f_thicker = flutter::flutter_velocity(&thicker, g10.shear_modulus, atmo.pressure, atmo.sound_speed);
    assert!(v_f_thicker > v_f, "thicker fin should raise flutter velocity monotonically");
}

#[test]
fn stability_margin_of_ogive_three_fin_geometry_is_in_expected_band() {
    let geom = alpha_iii_geometry();
    let (cp, _cn_alpha) = rocket_sim::aero::barrowman::center_of_pressure(&geom);
    let cg = rocket_sim::vehicle::mass::center_of_gravity(&alpha_iii_mass(), 0.0179 + 0.0123);

    let total_length = geom.total_length();
    let cp_fraction = cp / total_length;
    assert!((0.55..=0.95).contains(&cp_fraction), "CP fraction {cp_fraction} out of rear-body band");

    let result = stability::analyze(cp, cg, geom.body_diameter());
    assert!(
        (1.0..=2.5).contains(&result.margin_calibers),
        "margin {} calibers out of range",
        result.margin_calibers
    );
}

#[test]
fn monte_carlo_n50_matches_nominal_within_tolerance() {
    let base = alpha_iii_configuration();
    let nominal = flight::fly(&base).unwrap();

    let variation = rocket_sim::montecarlo::ParameterVariation::default();
    let run_config = rocket_sim::montecarlo::RunConfig::new(12345, 50);
    let result = rocket_sim::montecarlo::run(&base, &variation, &run_config);

    assert_eq!(result.trials_run, 50);
    assert!((result.apogee.mean - nominal.apogee).abs() / nominal.apogee < 0.10);
    assert!(result.apogee.stddev > 0.0);
    assert_eq!(result.apogee_histogram.counts.iter().sum::<usize>(), result.trials_succeeded);
    assert_eq!(result.landing_points.len(), result.trials_succeeded);
}

#[test]
fn two_stage_flight_orders_events_causally() {
    let booster_motor = Motor::from_curve("C6-booster", 0.0179, 0.0123, 1.86, c6_curve()).unwrap();
    let booster = Stage::new(
        "booster",
        alpha_iii_geometry(),
        alpha_iii_mass(),
        booster_motor,
        IgnitionTrigger::Liftoff,
        SeparationTrigger::Burnout { delay: 0.1 },
        0.0,
    );

    let sustainer_motor = Motor::from_curve("C6-sustainer", 0.0179, 0.0123, 1.86, c6_curve()).unwrap();
    let sustainer = Stage::new(
        "sustainer",
        alpha_iii_geometry(),
        alpha_iii_mass(),
        sustainer_motor,
        IgnitionTrigger::Separation,
        SeparationTrigger::Timer(500.0),
        0.240,
    );

    let config = Configuration {
        stack: StageStack::new(vec![booster, sustainer]),
        recovery: RecoveryConfig::SingleDeploy {
            canopy: Canopy { diameter: 0.30, drag_coefficient: 0.75 },
        },
        launch: LaunchConditions::default(),
        wind: WindModel::calm(),
        atmosphere_overrides: Default::default(),
        sim: SimConfig::default(),
        aero_drag_factor: 1.0,
    };

    let result = flight::fly(&config).expect("valid two-stage configuration flies");

    let mut times = Vec::new();
    let mut order = Vec::new();
    let mut separation_altitude = None;
    for event in &result.events {
        times.push(event.time);
        match event.kind {
            EventKind::Liftoff => order.push("LIFTOFF"),
            EventKind::Ignition { stage: 0 } => order.push("IGNITION(0)"),
            EventKind::Separation { stage: 0 } => {
                order.push("SEPARATION(0)");
                separation_altitude = event.altitude;
            }
            EventKind::Ignition { stage: 1 } => order.push("IGNITION(1)"),
            EventKind::Apogee => order.push("APOGEE"),
            EventKind::Landing => order.push("LANDING"),
            _ => {}
        }
    }

    for pair in times.windows(2) {
        assert!(pair[1] >= pair[0], "event times must be non-decreasing");
    }

    let expected = vec!["LIFTOFF", "IGNITION(0)", "SEPARATION(0)", "IGNITION(1)", "APOGEE", "LANDING"];
    assert_eq!(order, expected);
    assert!(separation_altitude.unwrap_or(0.0) > 0.0);
}
