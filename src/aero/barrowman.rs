//! Barrowman center-of-pressure and normal-force-coefficient-slope model
//! (§4.4 "Center of pressure").

use crate::vehicle::geometry::{Boattail, NoseShape, RocketGeometry};

/// One component's contribution to the combined CP: its normal-force
/// coefficient slope and the axial position (from the nose tip, m) that
/// slope acts at.
#[derive(Debug, Clone, Copy)]
pub struct Contribution {
    pub cn_alpha: f64,
    pub position: f64,
}

/// Nose cone CP, as a fraction of nose length from the tip.
fn nose_cp_fraction(shape: NoseShape) -> f64 {
    match shape {
        NoseShape::Conical => 2.0 / 3.0,
        NoseShape::Ogive => 0.466,
        NoseShape::Parabolic => 0.466, // not separately tabled; falls back to ogive
        NoseShape::Elliptical => 1.0 / 3.0,
        NoseShape::VonKarman | NoseShape::Haack => 0.437,
        NoseShape::Power => 0.5,
        NoseShape::Blunted => 0.4,
    }
}

fn nose_contribution(geom: &RocketGeometry) -> Contribution {
    Contribution {
        cn_alpha: 2.0,
        position: nose_cp_fraction(geom.nose_shape) * geom.nose_length,
    }
}

/// Boattail/transition contribution, modeled as a frustum at the tail of
/// the body (d1 = body diameter, d2 = boattail end diameter).
fn transition_contribution(geom: &RocketGeometry, boattail: &Boattail) -> Contribution {
    let d1 = geom.body_diameter();
    let d2 = boattail.end_diameter;
    let ratio = d2 / d1;
    let cn_alpha = 2.0 * (ratio * ratio - 1.0);
    let x_c = boattail.length * (1.0 + ratio + ratio * ratio) / (3.0 * (1.0 + ratio));
    let transition_start = geom.total_length() - boattail.length;
    Contribution {
        cn_alpha,
        position: transition_start + x_c,
    }
}

/// Fin-set contribution. Fins are assumed mounted with the root chord's
/// trailing edge at the base of the rocket (root leading edge at
/// `total_length - root_chord`).
fn fin_contribution(geom: &RocketGeometry) -> Contribution {
    let n = geom.fin_count as f64;
    let s = geom.fin_semi_span;
    let cr = geom.fin_root_chord;
    let ct = geom.fin_tip_chord;
    let xs = geom.fin_sweep_distance;
    let r = geom.body_radius;
    let d = geom.body_diameter();

    let mid_chord = (s * s + (xs + ct / 2.0 - cr / 2.0).powi(2)).sqrt();
    let k_interference = 1.0 + r / (s + r);
    let cn_alpha_bare =
        4.0 * n * (s / d).powi(2) / (1.0 + (1.0 + (2.0 * mid_chord / (cr + ct)).powi(2)).sqrt());
    let cn_alpha = k_interference * cn_alpha_bare;

    let x_f = xs * (cr + 2.0 * ct) / (3.0 * (cr + ct))
        + (cr + ct - cr * ct / (cr + ct)) / 6.0;
    let root_le = geom.total_length() - cr;

    Contribution {
        cn_alpha,
        position: root_le + x_f,
    }
}

/// Combined center of pressure (from the nose tip, m) and total
/// normal-force coefficient slope, subsonic regime (cylindrical body
/// section contributes zero).
pub fn center_of_pressure(geom: &RocketGeometry) -> (f64, f64) {
    let mut contributions = vec![nose_contribution(geom), fin_contribution(geom)];
    if let Some(bt) = &geom.boattail {
        contributions.push(transition_contribution(geom, bt));
    }

    let cn_total: f64 = contributions.iter().map(|c| c.cn_alpha).sum();
    if cn_total.abs() < 1e-12 {
        return (geom.total_length() * 0.5, 0.0);
    }
    let weighted: f64 = contributions.iter().map(|c| c.cn_alpha * c.position).sum();
    (weighted / cn_total, cn_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::geometry::SurfaceRoughness;
    use approx::assert_relative_eq;

    fn estes_alpha_iii() -> RocketGeometry {
        RocketGeometry::new(
            0.0117,
            0.24,
            0.06,
            NoseShape::Ogive,
            3,
            0.07,
            0.02,
            0.055,
            0.03,
            0.0032,
            None,
            SurfaceRoughness::Standard,
        )
        .unwrap()
    }

    #[test]
    fn ogive_nose_fraction() {
        assert_relative_eq!(nose_cp_fraction(NoseShape::Ogive), 0.466, epsilon = 1e-9);
    }

    #[test]
    fn cp_is_aft_of_nose_tip_and_within_rocket_length() {
        let g = estes_alpha_iii();
        let (cp, cn) = center_of_pressure(&g);
        assert!(cp > 0.0);
        assert!(cp < g.total_length());
        assert!(cn > 0.0);
    }

    #[test]
    fn more_fins_move_cp_aft_relative_to_nose_only() {
        let g = estes_alpha_iii();
        let (cp_with_fins, _) = center_of_pressure(&g);
        let (nose_only_cp, _) = {
            let c = nose_contribution(&g);
            (c.position, c.cn_alpha)
        };
        assert!(cp_with_fins > nose_only_cp);
    }
}
