use rocket_sim::atmosphere;
use rocket_sim::config::{Configuration, LaunchConditions, SimConfig};
use rocket_sim::flight;
use rocket_sim::motor::{Motor, ThrustPoint};
use rocket_sim::recovery::{Canopy, RecoveryConfig};
use rocket_sim::vehicle::{
    IgnitionTrigger, NoseShape, RocketGeometry, RocketMass, SeparationTrigger, Stage,
    StageStack, SurfaceRoughness,
};

/// An Estes C6-5-style thrust curve (RASP-style samples, N vs s).
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
    let geometry = RocketGeometry::new(
        0.0122,               // body radius, m (BT-56, 24mm OD)
        0.240,                // body length, m
        0.090,                // nose length, m
        NoseShape::Ogive,
        3,
        0.07,  // fin root chord, m
        0.03,  // fin tip chord, m
        0.04,  // fin semi-span, m
        0.03,  // fin sweep distance, m
        0.003, // fin thickness, m
        None,
        SurfaceRoughness::Smooth,
    )
    .expect("valid geometry");

    let mass = RocketMass {
        dry_mass: 0.028,
        nose_cg: 0.04,
        body_cg: 0.15,
        fins_cg: 0.22,
        recovery_cg: 0.10,
        motor_casing_cg: 0.21,
    };

    let motor = Motor::from_curve("C6-5", 0.0179, 0.0123, 1.86, c6_curve()).expect("valid motor");

    let stage = Stage::new(
        "sustainer",
        geometry,
        mass,
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
        wind: rocket_sim::flight::WindModel::calm(),
        atmosphere_overrides: Default::default(),
        sim: SimConfig::default(),
        aero_drag_factor: 1.0,
    }
}

fn main() {
    let config = alpha_iii_configuration();
    let result = flight::fly(&config).expect("valid configuration flies");
    let recovery = flight::recover(&result, &config, config.stack.total_mass());

    println!();
    println!("====================================================================");
    println!("  ROCKET FLIGHT SIMULATION — Alpha III (C6-5)");
    println!("====================================================================");
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in &result.events {
        println!(
            "  {:<12} t={:>6.2}s  alt={:>7.1}m  vel={:>6.1}m/s",
            format!("{:?}", event.kind),
            event.time,
            event.altitude.unwrap_or(0.0),
            event.velocity.unwrap_or(0.0),
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Apogee:        {:>8.1} m    at t={:.2}s",
        result.apogee, result.apogee_time
    );
    println!(
        "  Max velocity:  {:>8.1} m/s  (Mach {:.2})",
        result.max_velocity,
        result.max_velocity / atmosphere::isa(0.0).sound_speed
    );
    println!("  Max accel:     {:>8.1} m/s^2", result.max_acceleration);
    println!("  Flight time:   {:>8.1} s", result.flight_time);
    println!(
        "  Landing:       {:>8.1} m/s, drift {:.1} m",
        recovery.landing_velocity, recovery.drift_distance
    );
    println!();

    println!("  Trajectory (sampled)");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>8}",
        "t (s)", "alt (m)", "vel (m/s)", "Mach"
    );
    let sample_interval = (result.trajectory.len() / 30).max(1);
    for (i, p) in result.trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != result.trajectory.len() - 1 {
            continue;
        }
        let speed = (p.vx * p.vx + p.vy * p.vy + p.vz * p.vz).sqrt();
        println!("  {:>7.2}  {:>9.1}  {:>9.1}  {:>8.3}", p.t, p.y, speed, p.mach);
    }

    println!();
    println!("====================================================================");
    println!();
}
