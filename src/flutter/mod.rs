//! Fin-flutter analyzer, NARTS formula (§4.9).

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FlutterStatus {
    Excellent,
    Good,
    Adequate,
    Marginal,
    Unsafe,
}

impl FlutterStatus {
    fn from_safety_factor(sf: f64) -> FlutterStatus {
        if sf >= 2.0 {
            FlutterStatus::Excellent
        } else if sf >= 1.5 {
            FlutterStatus::Good
        } else if sf >= 1.25 {
            FlutterStatus::Adequate
        } else if sf >= 1.0 {
            FlutterStatus::Marginal
        } else {
            FlutterStatus::Unsafe
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct FlutterResult {
    pub flutter_velocity: f64,
    pub safety_factor: f64,
    pub status: FlutterStatus,
}

/// A single fin's planform and thickness, as fed to the NARTS estimate.
/// `thickness_ratio` (τ = t/Cr) appears as `(1/τ)^3` in the flutter
/// formula, so construction rejects a zero or negative root chord or
/// thickness (spec.md §9: "guard against τ = 0 at construction").
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct FinPlanform {
    pub root_chord: f64,
    pub tip_chord: f64,
    pub span: f64,
    pub thickness: f64,
}

impl FinPlanform {
    pub fn new(root_chord: f64, tip_chord: f64, span: f64, thickness: f64) -> CoreResult<Self> {
        if root_chord <= 0.0 || thickness <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "fin root chord and thickness must be positive".into(),
            ));
        }
        if tip_chord < 0.0 || span <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "fin tip chord must be non-negative and span positive".into(),
            ));
        }
        Ok(FinPlanform { root_chord, tip_chord, span, thickness })
    }

    pub fn aspect_ratio(&self) -> f64 {
        2.0 * self.span / (self.root_chord + self.tip_chord)
    }

    pub fn taper_ratio(&self) -> f64 {
        self.tip_chord / self.root_chord
    }

    pub fn thickness_ratio(&self) -> f64 {
        self.thickness / self.root_chord
    }
}

/// Critical flutter velocity, m/s, via the NARTS closed form:
/// `V_f = a * sqrt(G / (1.337*AR^3*P/(AR+2) * (lambda+1)/2 * (1/tau)^3))`.
pub fn flutter_velocity(fin: &FinPlanform, shear_modulus: f64, pressure: f64, sound_speed: f64) -> f64 {
    let ar = fin.aspect_ratio();
    let lambda = fin.taper_ratio();
    let tau = fin.thickness_ratio();

    let denom = 1.337 * ar.powi(3) * pressure / (ar + 2.0) * (lambda + 1.0) / 2.0 * (1.0 / tau).powi(3);
    sound_speed * (shear_modulus / denom).sqrt()
}

/// Evaluate flutter margin at a given maximum flight velocity.
pub fn analyze(
    fin: &FinPlanform,
    shear_modulus: f64,
    pressure: f64,
    sound_speed: f64,
    v_max: f64,
) -> FlutterResult {
    let v_f = flutter_velocity(fin, shear_modulus, pressure, sound_speed);
    let safety_factor = if v_max > 0.0 { v_f / v_max } else { f64::INFINITY };
    FlutterResult { flutter_velocity: v_f, safety_factor, status: FlutterStatus::from_safety_factor(safety_factor) }
}

/// Inverse solver: given a target flutter velocity, solve for the
/// thickness ratio `tau` (and hence minimum thickness `Cr*tau`) that
/// would achieve it, holding planform and ambient conditions fixed.
pub fn minimum_thickness_for_target(
    fin: &FinPlanform,
    shear_modulus: f64,
    pressure: f64,
    sound_speed: f64,
    target_flutter_velocity: f64,
) -> CoreResult<f64> {
    if target_flutter_velocity <= 0.0 {
        return Err(CoreError::InvalidConfiguration("target flutter velocity must be positive".into()));
    }
    let ar = fin.aspect_ratio();
    let lambda = fin.taper_ratio();
    let a_coeff = 1.337 * ar.powi(3) * pressure / (ar + 2.0) * (lambda + 1.0) / 2.0;

    // V_f^2 = a^2 * G / (a_coeff * tau^-3)  =>  tau^3 = a_coeff * G * a^2 / V_f^2
    let tau_cubed = a_coeff * shear_modulus * sound_speed * sound_speed / (target_flutter_velocity * target_flutter_velocity);
    let tau = tau_cubed.cbrt();
    Ok(fin.root_chord * tau)
}
