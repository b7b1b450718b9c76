//! Recovery descent model (§3 `RecoveryConfig`, §4.7 "Dual-deploy descent").

use crate::atmosphere::{self, AtmosphereOverrides};
use crate::error::{CoreError, CoreResult};
use crate::flight::wind::WindModel;
use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// One parachute's drag characteristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Canopy {
    pub diameter: f64,
    pub drag_coefficient: f64,
}

impl Canopy {
    pub fn drag_area(&self) -> f64 {
        self.drag_coefficient * std::f64::consts::PI * (self.diameter / 2.0).powi(2)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum RecoveryConfig {
    SingleDeploy { canopy: Canopy },
    DualDeploy { drogue: Canopy, main: Canopy, main_deploy_altitude: f64 },
}

impl RecoveryConfig {
    pub fn validate(&self) -> CoreResult<()> {
        let positive = |d: f64, label: &str| -> CoreResult<()> {
            if d <= 0.0 {
                return Err(CoreError::InvalidConfiguration(format!(
                    "{label} drag-area coefficient must be positive"
                )));
            }
            Ok(())
        };
        match self {
            RecoveryConfig::SingleDeploy { canopy } => positive(canopy.drag_area(), "canopy"),
            RecoveryConfig::DualDeploy { drogue, main, main_deploy_altitude } => {
                positive(drogue.drag_area(), "drogue")?;
                positive(main.drag_area(), "main")?;
                if *main_deploy_altitude <= 0.0 {
                    return Err(CoreError::InvalidConfiguration(
                        "main_deploy_altitude must be positive".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Outcome of the descent-under-canopy phase (§6 `RecoveryResult`).
#[derive(Debug, Clone, Copy)]
pub struct RecoveryResult {
    pub landing_position: Vec3<f64>,
    pub landing_velocity: f64,
    pub drift_distance: f64,
    pub drift_bearing_deg: f64,
}

/// Terminal velocity under a canopy: `v_t = sqrt(2mg / (rho*Cd*A))`.
pub fn terminal_velocity(mass: f64, gravity: f64, density: f64, drag_area: f64) -> f64 {
    (2.0 * mass * gravity / (density * drag_area)).sqrt()
}

/// Integrate descent from `apogee_position`/`apogee_time` to the ground,
/// drifting laterally with the wind profile. Dual-deploy descends at the
/// drogue terminal velocity until `main_deploy_altitude`, then at the
/// main terminal velocity to the ground; single-deploy is the
/// degenerate one-phase case.
pub fn descend(
    config: &RecoveryConfig,
    mass: f64,
    apogee_position: Vec3<f64>,
    apogee_time: f64,
    wind: &WindModel,
    atmosphere_overrides: &AtmosphereOverrides,
) -> RecoveryResult {
    let dt = 0.05;
    let mut pos = apogee_position;
    let mut t = apogee_time;

    let phases: Vec<(f64, f64)> = match config {
        RecoveryConfig::SingleDeploy { canopy } => vec![(0.0, canopy.drag_area())],
        RecoveryConfig::DualDeploy { drogue, main, main_deploy_altitude } => {
            vec![(*main_deploy_altitude, drogue.drag_area()), (0.0, main.drag_area())]
        }
    };

    let mut last_v_t = 0.0;
    for (floor, drag_area) in phases {
        while pos.y > floor {
            let atmo = atmosphere::isa_with(pos.y, atmosphere_overrides);
            let v_t = terminal_velocity(mass, atmo.gravity, atmo.density, drag_area);
            last_v_t = v_t;
            let wind_v = wind.velocity_at(pos.y, t);
            let step = dt.min((pos.y - floor).max(1e-6) / v_t.max(1e-6));
            pos.y -= v_t * step;
            pos.x += wind_v.x * step;
            pos.z += wind_v.z * step;
            t += step;
            if step < 1e-9 {
                break;
            }
        }
        pos.y = pos.y.max(floor);
    }
    pos.y = 0.0;

    let drift = Vec3::new(pos.x - apogee_position.x, 0.0, pos.z - apogee_position.z);
    let drift_distance = drift.norm();
    let drift_bearing_deg = if drift_distance > 1e-9 {
        (drift.z.atan2(drift.x).to_degrees() + 360.0) % 360.0
    } else {
        0.0
    };

    RecoveryResult {
        landing_position: pos,
        landing_velocity: last_v_t,
        drift_distance,
        drift_bearing_deg,
    }
}

/// Cardinal direction label for a bearing in degrees clockwise from north.
pub fn cardinal_direction(bearing_deg: f64) -> &'static str {
    const DIRS: [&str; 8] =
        ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = (((bearing_deg % 360.0) + 360.0) % 360.0 / 45.0).round() as usize % 8;
    DIRS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_deploy_reaches_ground() {
        let config = RecoveryConfig::SingleDeploy {
            canopy: Canopy { diameter: 0.6, drag_coefficient: 1.5 },
        };
        let result = descend(
            &config,
            0.5,
            Vec3::new(0.0, 200.0, 0.0),
            10.0,
            &WindModel::calm(),
            &AtmosphereOverrides::default(),
        );
        assert!((result.landing_position.y).abs() < 1e-9);
        assert!(result.landing_velocity > 0.0);
    }

    #[test]
    fn dual_deploy_drifts_downwind() {
        let config = RecoveryConfig::DualDeploy {
            drogue: Canopy { diameter: 0.3, drag_coefficient: 1.2 },
            main: Canopy { diameter: 0.9, drag_coefficient: 1.5 },
            main_deploy_altitude: 150.0,
        };
        let wind = WindModel { base_speed: 5.0, direction_deg: 0.0, gust_amplitude: 0.0 };
        let result = descend(
            &config,
            0.5,
            Vec3::new(0.0, 300.0, 0.0),
            10.0,
            &wind,
            &AtmosphereOverrides::default(),
        );
        assert!(result.drift_distance > 0.0);
    }

    #[test]
    fn cardinal_direction_wraps() {
        assert_eq!(cardinal_direction(0.0), "N");
        assert_eq!(cardinal_direction(90.0), "E");
        assert_eq!(cardinal_direction(359.0), "N");
    }
}
