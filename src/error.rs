//! Core error kinds.
//!
//! Configuration errors surface immediately at construction; a flight
//! never starts with an invalid vehicle. `NumericalBreakdown` terminates
//! an in-progress flight but is carried as a `FlightOutcome` on the
//! returned `FlightResult` rather than as a bare `Err`, since spec
//! requires the partial trajectory and event log to still be returned.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("numerical breakdown at t={time:.3}s")]
    NumericalBreakdown { time: f64 },
}

pub type CoreResult<T> = Result<T, CoreError>;
