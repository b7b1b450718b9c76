//! Kinematic state carried by the integrator and the flight phase tag
//! (§3 `FlightState`).

use crate::math::{Quat, Vec3};

/// Position, velocity, attitude and body-rate — the 13 scalars the RK4
/// integrator actually steps. Propellant mass is *not* part of this
/// vector: it is a deterministic function of elapsed burn time, derived
/// from the active stage's motor (§3 "Motor objects are immutable;
/// current propellant lives in the flight state, not the motor" — here
/// it lives in elapsed time instead, which determines the same thing).
#[derive(Debug, Clone, Copy)]
pub struct Kinematics {
    pub pos: Vec3<f64>,
    pub vel: Vec3<f64>,
    pub quat: Quat,
    pub omega: Vec3<f64>,
}

impl Kinematics {
    pub fn to_array(self) -> [f64; 13] {
        [
            self.pos.x, self.pos.y, self.pos.z,
            self.vel.x, self.vel.y, self.vel.z,
            self.quat.w, self.quat.x, self.quat.y, self.quat.z,
            self.omega.x, self.omega.y, self.omega.z,
        ]
    }

    pub fn from_array(y: [f64; 13]) -> Kinematics {
        Kinematics {
            pos: Vec3::new(y[0], y[1], y[2]),
            vel: Vec3::new(y[3], y[4], y[5]),
            quat: Quat::new(y[6], y[7], y[8], y[9]),
            omega: Vec3::new(y[10], y[11], y[12]),
        }
    }

    /// Altitude above the launch site (world +y).
    pub fn altitude(&self) -> f64 {
        self.pos.y
    }

    /// Body +y axis (thrust axis) in world frame.
    pub fn body_axis(&self) -> Vec3<f64> {
        self.quat.rotate(&Vec3::new(0.0, 1.0, 0.0))
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Kinematics {
            pos: Vec3::zeros(),
            vel: Vec3::zeros(),
            quat: Quat::identity(),
            omega: Vec3::zeros(),
        }
    }
}

/// Flight phase machine (§4.6 "Phase machine").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    PreLaunch,
    Powered,
    Coasting,
    Descent,
    Landed,
}
