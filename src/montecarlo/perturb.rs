//! Perturbation sampling and application (§4.8 `ParameterVariation`).

use super::generators::gaussian;
use crate::config::Configuration;
use crate::recovery::{Canopy, RecoveryConfig};
use rand::Rng;

/// Default standard deviations / Bernoulli probabilities, per spec.md's
/// `ParameterVariation` table. Each field can be overridden independently.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ParameterVariation {
    pub dry_mass_sigma_kg: f64,
    pub thrust_factor_sigma: f64,
    pub burn_time_factor_sigma: f64,
    pub inclination_sigma_deg: f64,
    pub heading_sigma_deg: f64,
    pub wind_speed_sigma: f64,
    pub wind_direction_sigma_deg: f64,
    pub drag_factor_sigma: f64,
    pub parachute_cds_factor_sigma: f64,
    pub deployment_lag_sigma_s: f64,
    pub motor_cato_probability: f64,
    pub chute_failure_probability: f64,
    pub separation_failure_probability: f64,
}

impl Default for ParameterVariation {
    fn default() -> Self {
        ParameterVariation {
            dry_mass_sigma_kg: 0.005,
            thrust_factor_sigma: 0.03,
            burn_time_factor_sigma: 0.05,
            inclination_sigma_deg: 1.0,
            heading_sigma_deg: 2.0,
            wind_speed_sigma: 1.5,
            wind_direction_sigma_deg: 15.0,
            drag_factor_sigma: 0.05,
            parachute_cds_factor_sigma: 0.10,
            deployment_lag_sigma_s: 0.5,
            motor_cato_probability: 0.001,
            chute_failure_probability: 0.005,
            separation_failure_probability: 0.002,
        }
    }
}

fn clamp_factor(f: f64) -> f64 {
    f.clamp(0.5, 1.5)
}

impl ParameterVariation {
    pub fn sample(&self, rng: &mut impl Rng) -> Perturbation {
        Perturbation {
            dry_mass_delta_kg: gaussian(rng, 0.0, self.dry_mass_sigma_kg),
            thrust_factor: clamp_factor(gaussian(rng, 1.0, self.thrust_factor_sigma)),
            burn_time_factor: clamp_factor(gaussian(rng, 1.0, self.burn_time_factor_sigma)),
            inclination_delta_deg: gaussian(rng, 0.0, self.inclination_sigma_deg),
            heading_delta_deg: gaussian(rng, 0.0, self.heading_sigma_deg),
            wind_speed: gaussian(rng, 0.0, self.wind_speed_sigma).max(0.0),
            wind_direction_delta_deg: gaussian(rng, 0.0, self.wind_direction_sigma_deg).rem_euclid(360.0),
            drag_factor: clamp_factor(gaussian(rng, 1.0, self.drag_factor_sigma)),
            parachute_cds_factor: clamp_factor(gaussian(rng, 1.0, self.parachute_cds_factor_sigma)),
            deployment_lag_s: gaussian(rng, 0.0, self.deployment_lag_sigma_s).max(0.0),
            motor_cato: rng.gen_bool(self.motor_cato_probability),
            chute_failure: rng.gen_bool(self.chute_failure_probability),
            separation_failure: rng.gen_bool(self.separation_failure_probability),
        }
    }
}

/// One trial's drawn perturbation, ready to apply to a nominal `Configuration`.
#[derive(Debug, Clone, Copy)]
pub struct Perturbation {
    pub dry_mass_delta_kg: f64,
    pub thrust_factor: f64,
    pub burn_time_factor: f64,
    pub inclination_delta_deg: f64,
    pub heading_delta_deg: f64,
    pub wind_speed: f64,
    pub wind_direction_delta_deg: f64,
    pub drag_factor: f64,
    pub parachute_cds_factor: f64,
    pub deployment_lag_s: f64,
    pub motor_cato: bool,
    pub chute_failure: bool,
    pub separation_failure: bool,
}

impl Perturbation {
    /// Returns a new `Configuration` with this perturbation applied.
    pub fn apply(&self, base: &Configuration) -> Configuration {
        let mut config = base.clone();

        for stage in config.stack.stages.iter_mut() {
            stage.mass.dry_mass = (stage.mass.dry_mass + self.dry_mass_delta_kg).max(1e-6);
            stage.motor = stage.motor.scaled(self.thrust_factor, self.burn_time_factor);
        }

        config.launch.inclination_deg += self.inclination_delta_deg;
        config.launch.heading_deg = (config.launch.heading_deg + self.heading_delta_deg).rem_euclid(360.0);

        config.wind.base_speed = self.wind_speed;
        config.wind.direction_deg = (config.wind.direction_deg + self.wind_direction_delta_deg).rem_euclid(360.0);

        config.recovery = scale_recovery(&config.recovery, self.parachute_cds_factor, self.deployment_lag_s);

        config.aero_drag_factor *= self.drag_factor;
        config
    }
}

fn scale_canopy(canopy: &Canopy, factor: f64) -> Canopy {
    Canopy { diameter: canopy.diameter * factor.sqrt(), drag_coefficient: canopy.drag_coefficient }
}

/// Deployment lag is approximated as extra fall before the main opens:
/// a lower `main_deploy_altitude` gives the drogue phase more time.
fn scale_recovery(config: &RecoveryConfig, cds_factor: f64, deployment_lag_s: f64) -> RecoveryConfig {
    match config {
        RecoveryConfig::SingleDeploy { canopy } => {
            RecoveryConfig::SingleDeploy { canopy: scale_canopy(canopy, cds_factor) }
        }
        RecoveryConfig::DualDeploy { drogue, main, main_deploy_altitude } => {
            let drogue_terminal_guess = 20.0; // m/s, typical drogue descent rate
            let lag_altitude_loss = deployment_lag_s * drogue_terminal_guess;
            RecoveryConfig::DualDeploy {
                drogue: scale_canopy(drogue, cds_factor),
                main: scale_canopy(main, cds_factor),
                main_deploy_altitude: (main_deploy_altitude - lag_altitude_loss).max(10.0),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn clamp_factor_bounds_extremes() {
        assert_eq!(clamp_factor(10.0), 1.5);
        assert_eq!(clamp_factor(-10.0), 0.5);
        assert_eq!(clamp_factor(1.0), 1.0);
    }

    #[test]
    fn sample_is_deterministic_for_fixed_seed() {
        let variation = ParameterVariation::default();
        let mut rng1 = ChaCha8Rng::seed_from_u64(99);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);
        let a = variation.sample(&mut rng1);
        let b = variation.sample(&mut rng2);
        assert_eq!(a.dry_mass_delta_kg, b.dry_mass_delta_kg);
        assert_eq!(a.thrust_factor, b.thrust_factor);
    }

    #[test]
    fn wind_speed_is_never_negative() {
        let variation = ParameterVariation::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            assert!(variation.sample(&mut rng).wind_speed >= 0.0);
        }
    }
}
