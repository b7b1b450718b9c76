//! Append-only flight event log (§3 "event log", §6 `FlightResult`
//! event tuples `(t, type, payload)`).

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EventKind {
    Liftoff,
    Ignition { stage: usize },
    Burnout { stage: usize },
    Separation { stage: usize },
    Apogee,
    Landing,
    NumericalBreakdown,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct FlightEvent {
    pub time: f64,
    pub kind: EventKind,
    pub altitude: Option<f64>,
    pub velocity: Option<f64>,
}

impl FlightEvent {
    pub fn new(time: f64, kind: EventKind, altitude: f64, velocity: f64) -> Self {
        FlightEvent { time, kind, altitude: Some(altitude), velocity: Some(velocity) }
    }
}
