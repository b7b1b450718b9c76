//! Ground-speed/direction/gust wind model (§4.6 "Wind model").
//!
//! Deterministic sinusoid, isolated here per spec.md §9 so it can later
//! be swapped for a Dryden/von Kármán filter without touching the
//! integrator or engine.

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindModel {
    /// Ground-level wind speed, m/s.
    pub base_speed: f64,
    /// Compass bearing the wind blows *from*, degrees clockwise from
    /// north (world +x = north, world +z = east).
    pub direction_deg: f64,
    /// Gust amplitude, m/s.
    pub gust_amplitude: f64,
}

impl WindModel {
    pub fn calm() -> Self {
        WindModel { base_speed: 0.0, direction_deg: 0.0, gust_amplitude: 0.0 }
    }

    /// Wind velocity in the world frame at the given altitude and time.
    pub fn velocity_at(&self, altitude: f64, t: f64) -> Vec3<f64> {
        let scaled = (altitude.max(10.0) / 10.0).powf(0.15);
        let gust = self.gust_amplitude * ((0.5 * t).sin() + 0.5 * (1.3 * t).sin());
        let speed = self.base_speed * scaled + gust;

        // Downwind bearing = wind source bearing + 180 deg.
        let bearing = (self.direction_deg + 180.0).to_radians();
        Vec3::new(speed * bearing.cos(), 0.0, speed * bearing.sin())
    }
}
