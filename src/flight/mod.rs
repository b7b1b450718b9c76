//! The flight engine: state, wind, phase machine, event log, and the
//! derivative assembly that drives the RK4 integrator (§4.6).

pub mod engine;
pub mod events;
pub mod state;
pub mod wind;

pub use engine::{fly, fly_with_gimbal, recover, FlightOutcome, FlightResult, TrajectoryPoint};
pub use events::{EventKind, FlightEvent};
pub use state::{FlightPhase, Kinematics};
pub use wind::WindModel;
