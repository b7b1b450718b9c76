//! Static stability margin analyzer (§4.10).

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StabilityClass {
    Unstable,
    MarginallyUnstable,
    MarginallyStable,
    Stable,
    VeryStable,
    OverStable,
    SeverelyOverStable,
}

impl StabilityClass {
    fn from_calibers(margin: f64) -> StabilityClass {
        if margin < 0.5 {
            StabilityClass::Unstable
        } else if margin < 1.0 {
            StabilityClass::MarginallyUnstable
        } else if margin < 1.5 {
            StabilityClass::MarginallyStable
        } else if margin < 2.0 {
            StabilityClass::Stable
        } else if margin < 2.5 {
            StabilityClass::VeryStable
        } else if margin < 3.5 {
            StabilityClass::OverStable
        } else {
            StabilityClass::SeverelyOverStable
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct StabilityResult {
    pub cp: f64,
    pub cg: f64,
    pub margin_calibers: f64,
    pub class: StabilityClass,
}

/// Static margin in calibers: `(x_CP - x_CG) / d_body`, both measured
/// from the nose tip. A positive margin means the CP sits aft of the
/// CG, as it must for passive aerodynamic stability.
pub fn analyze(cp: f64, cg: f64, body_diameter: f64) -> StabilityResult {
    let margin_calibers = (cp - cg) / body_diameter;
    StabilityResult { cp, cg, margin_calibers, class: StabilityClass::from_calibers(margin_calibers) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unstable_below_half_caliber() {
        let r = analyze(0.52, 0.50, 0.1);
        assert_eq!(r.class, StabilityClass::Unstable);
    }

    #[test]
    fn classifies_stable_in_typical_range() {
        let r = analyze(0.70, 0.50, 0.1);
        assert!((r.margin_calibers - 2.0).abs() < 1e-9);
        assert_eq!(r.class, StabilityClass::VeryStable);
    }

    #[test]
    fn cp_forward_of_cg_gives_negative_margin() {
        let r = analyze(0.40, 0.50, 0.1);
        assert!(r.margin_calibers < 0.0);
        assert_eq!(r.class, StabilityClass::Unstable);
    }

    #[test]
    fn severely_over_stable_above_three_and_half_calibers() {
        let r = analyze(0.90, 0.50, 0.1);
        assert_eq!(r.class, StabilityClass::SeverelyOverStable);
    }
}
