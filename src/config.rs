//! Top-level flight configuration (§6 "Inputs" `Configuration`).

use crate::atmosphere::AtmosphereOverrides;
use crate::error::{CoreError, CoreResult};
use crate::flight::wind::WindModel;
use crate::recovery::RecoveryConfig;
use crate::vehicle::StageStack;
use serde::{Deserialize, Serialize};

/// Launch rail and site parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaunchConditions {
    pub rail_length: f64,
    pub inclination_deg: f64,
    pub heading_deg: f64,
    pub base_altitude: f64,
}

impl Default for LaunchConditions {
    fn default() -> Self {
        LaunchConditions {
            rail_length: 1.0,
            inclination_deg: 90.0,
            heading_deg: 0.0,
            base_altitude: 0.0,
        }
    }
}

/// Fixed-step integrator configuration for a single flight (§4.5, §4.6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    pub dt: f64,
    pub t_max: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig { dt: crate::integrator::DEFAULT_STEP, t_max: 120.0 }
    }
}

impl SimConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.dt < crate::integrator::MIN_STEP || self.dt > crate::integrator::MAX_STEP {
            return Err(CoreError::InvalidConfiguration(format!(
                "dt must be in [{}, {}], got {}",
                crate::integrator::MIN_STEP,
                crate::integrator::MAX_STEP,
                self.dt
            )));
        }
        if self.t_max <= 0.0 {
            return Err(CoreError::InvalidConfiguration("t_max must be positive".into()));
        }
        Ok(())
    }
}

/// A complete, self-contained flight scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub stack: StageStack,
    pub recovery: RecoveryConfig,
    pub launch: LaunchConditions,
    pub wind: WindModel,
    pub atmosphere_overrides: AtmosphereOverrides,
    pub sim: SimConfig,
    /// Multiplier applied to the aerodynamic drag coefficient (Monte
    /// Carlo's `drag_factor` perturbation; 1.0 for a nominal flight).
    pub aero_drag_factor: f64,
}

impl Configuration {
    pub fn validate(&self) -> CoreResult<()> {
        if self.stack.stages.is_empty() {
            return Err(CoreError::InvalidConfiguration("stage stack must not be empty".into()));
        }
        self.recovery.validate()?;
        self.sim.validate()?;
        Ok(())
    }
}
