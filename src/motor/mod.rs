//! Thrust-curve motor model.
//!
//! A motor is immutable once built; the propellant actually remaining at
//! a given moment lives in `FlightState`, not here. `thrust_at`/
//! `mass_flow_rate` never panic at runtime — only `Motor::new` can
//! reject a malformed curve.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// One point of an ordered thrust curve: (time since ignition, thrust).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrustPoint {
    pub time: f64,
    pub thrust: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motor {
    pub designation: String,
    pub dry_mass: f64,
    pub propellant_mass: f64,
    pub burn_time: f64,
    pub curve: Option<Vec<ThrustPoint>>,
    average_thrust: f64,
}

impl Motor {
    /// Build a motor from a curve (parsed RASP/ENG samples, e.g.). `t0`
    /// must be 0, time must be monotone non-decreasing, and thrust at
    /// `burn_time` must be (approximately) zero.
    pub fn from_curve(
        designation: impl Into<String>,
        dry_mass: f64,
        propellant_mass: f64,
        burn_time: f64,
        curve: Vec<ThrustPoint>,
    ) -> CoreResult<Motor> {
        if dry_mass <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "motor dry_mass must be positive".into(),
            ));
        }
        if propellant_mass < 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "motor propellant_mass must be non-negative".into(),
            ));
        }
        if burn_time <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "motor burn_time must be positive".into(),
            ));
        }
        if curve.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "thrust curve must have at least one point".into(),
            ));
        }
        if curve[0].time != 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "thrust curve must start at t=0".into(),
            ));
        }
        if (curve.last().unwrap().time - burn_time).abs() > 1e-6 {
            return Err(CoreError::InvalidConfiguration(
                "thrust curve must end at t=burn_time".into(),
            ));
        }
        for w in curve.windows(2) {
            if w[1].time < w[0].time {
                return Err(CoreError::InvalidConfiguration(
                    "thrust curve time must be monotone non-decreasing".into(),
                ));
            }
        }

        let average_thrust = trapezoid_impulse(&curve) / burn_time;

        Ok(Motor {
            designation: designation.into(),
            dry_mass,
            propellant_mass,
            burn_time,
            curve: Some(curve),
            average_thrust,
        })
    }

    /// Build a motor with a constant-thrust approximation (no curve).
    pub fn constant_thrust(
        designation: impl Into<String>,
        dry_mass: f64,
        propellant_mass: f64,
        burn_time: f64,
        thrust: f64,
    ) -> CoreResult<Motor> {
        if dry_mass <= 0.0 || propellant_mass < 0.0 || burn_time <= 0.0 || thrust <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "motor parameters must be positive".into(),
            ));
        }
        Ok(Motor {
            designation: designation.into(),
            dry_mass,
            propellant_mass,
            burn_time,
            curve: None,
            average_thrust: thrust,
        })
    }

    /// Thrust at time `t` since ignition. Zero outside `[0, burn_time)`.
    pub fn thrust_at(&self, t: f64) -> f64 {
        if t < 0.0 || t >= self.burn_time {
            return 0.0;
        }
        match &self.curve {
            None => self.average_thrust,
            Some(curve) => interpolate(curve, t),
        }
    }

    /// Propellant mass flow rate at time `t` (positive magnitude; the
    /// flight engine applies the sign). Constant during burn, zero after.
    pub fn mass_flow_rate(&self, t: f64) -> f64 {
        if t < 0.0 || t >= self.burn_time || self.burn_time <= 0.0 {
            0.0
        } else {
            self.propellant_mass / self.burn_time
        }
    }

    pub fn total_impulse(&self) -> f64 {
        match &self.curve {
            Some(curve) => trapezoid_impulse(curve),
            None => self.average_thrust * self.burn_time,
        }
    }

    pub fn average_thrust(&self) -> f64 {
        self.average_thrust
    }

    pub fn max_thrust(&self) -> f64 {
        match &self.curve {
            Some(curve) => curve.iter().map(|p| p.thrust).fold(0.0_f64, f64::max),
            None => self.average_thrust,
        }
    }

    pub fn loaded_mass(&self) -> f64 {
        self.dry_mass + self.propellant_mass
    }

    /// A copy of this motor with thrust scaled by `thrust_factor` and
    /// burn duration scaled by `burn_time_factor` (Monte Carlo
    /// perturbation, §4.8). Propellant mass is unchanged; mass flow
    /// rate adjusts implicitly through the new burn time.
    pub fn scaled(&self, thrust_factor: f64, burn_time_factor: f64) -> Motor {
        let burn_time = self.burn_time * burn_time_factor;
        let curve = self.curve.as_ref().map(|points| {
            points
                .iter()
                .map(|p| ThrustPoint { time: p.time * burn_time_factor, thrust: p.thrust * thrust_factor })
                .collect()
        });
        Motor {
            designation: self.designation.clone(),
            dry_mass: self.dry_mass,
            propellant_mass: self.propellant_mass,
            burn_time,
            curve,
            average_thrust: self.average_thrust * thrust_factor,
        }
    }
}

fn trapezoid_impulse(curve: &[ThrustPoint]) -> f64 {
    curve
        .windows(2)
        .map(|w| {
            let dt = w[1].time - w[0].time;
            0.5 * (w[0].thrust + w[1].thrust) * dt
        })
        .sum()
}

fn interpolate(curve: &[ThrustPoint], t: f64) -> f64 {
    // curve is sorted by time; find the bracketing pair.
    let idx = match curve.binary_search_by(|p| p.time.partial_cmp(&t).unwrap()) {
        Ok(i) => return curve[i].thrust,
        Err(i) => i,
    };
    if idx == 0 {
        return curve[0].thrust;
    }
    if idx >= curve.len() {
        return curve[curve.len() - 1].thrust;
    }
    let (a, b) = (&curve[idx - 1], &curve[idx]);
    let span = b.time - a.time;
    if span <= 0.0 {
        return a.thrust;
    }
    let frac = (t - a.time) / span;
    a.thrust + frac * (b.thrust - a.thrust)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estes_c6() -> Motor {
        // Roughly shaped after an Estes C6 curve: spike then tail-off.
        let curve = vec![
            ThrustPoint { time: 0.0, thrust: 0.0 },
            ThrustPoint { time: 0.05, thrust: 14.0 },
            ThrustPoint { time: 0.1, thrust: 10.0 },
            ThrustPoint { time: 0.5, thrust: 5.0 },
            ThrustPoint { time: 1.6, thrust: 5.0 },
            ThrustPoint { time: 1.86, thrust: 0.0 },
        ];
        Motor::from_curve("C6-5", 0.0258, 0.0122, 1.86, curve).unwrap()
    }

    #[test]
    fn thrust_zero_outside_burn() {
        let m = estes_c6();
        assert_eq!(m.thrust_at(-0.1), 0.0);
        assert_eq!(m.thrust_at(2.0), 0.0);
        assert_eq!(m.thrust_at(1.86), 0.0);
    }

    #[test]
    fn thrust_interpolates_between_points() {
        let m = estes_c6();
        let t = m.thrust_at(0.075);
        assert!(t > 10.0 && t < 14.0);
    }

    #[test]
    fn mass_flow_constant_during_burn_then_zero() {
        let m = estes_c6();
        let rate = m.mass_flow_rate(0.5);
        assert!((rate - 0.0122 / 1.86).abs() < 1e-9);
        assert_eq!(m.mass_flow_rate(2.0), 0.0);
    }

    #[test]
    fn no_curve_uses_average_thrust() {
        let m = Motor::constant_thrust("Generic", 1.0, 0.5, 2.0, 100.0).unwrap();
        assert_eq!(m.thrust_at(1.0), 100.0);
        assert_eq!(m.thrust_at(2.0), 0.0);
    }

    #[test]
    fn rejects_non_monotone_curve() {
        let curve = vec![
            ThrustPoint { time: 0.0, thrust: 0.0 },
            ThrustPoint { time: 1.0, thrust: 10.0 },
            ThrustPoint { time: 0.5, thrust: 5.0 },
        ];
        assert!(Motor::from_curve("Bad", 1.0, 0.1, 1.0, curve).is_err());
    }

    #[test]
    fn total_impulse_matches_trapezoid() {
        let m = estes_c6();
        assert!(m.total_impulse() > 0.0);
        assert!((m.average_thrust() - m.total_impulse() / m.burn_time).abs() < 1e-9);
    }
}
