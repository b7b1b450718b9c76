//! Component-resolved drag coefficient (§4.4 "Drag coefficient").
//!
//! `Cd = Cd_f + Cd_p + Cd_b + Cd_w + Cd_i`, each term evaluated fresh at
//! every derivative call since Reynolds number, Mach number and angle of
//! attack all vary through a flight.

use crate::vehicle::geometry::{NoseShape, RocketGeometry, SurfaceRoughness};

/// Roughness multiplier applied to the friction coefficient.
fn roughness_multiplier(tag: SurfaceRoughness) -> f64 {
    match tag {
        SurfaceRoughness::Polished => 0.9,
        SurfaceRoughness::Smooth => 1.0,
        SurfaceRoughness::Standard => 1.15,
        SurfaceRoughness::Rough => 1.4,
    }
}

/// Nose-shape pressure-drag coefficient (blunter shapes carry more base
/// pressure drag at the tip).
fn nose_pressure_coefficient(shape: NoseShape) -> f64 {
    match shape {
        NoseShape::Conical => 0.12,
        NoseShape::Ogive => 0.08,
        NoseShape::Parabolic => 0.09,
        NoseShape::Elliptical => 0.06,
        NoseShape::VonKarman | NoseShape::Haack => 0.07,
        NoseShape::Power => 0.09,
        NoseShape::Blunted => 0.18,
    }
}

/// Skin-friction coefficient, Reynolds/Mach/roughness corrected and
/// scaled to the body's fineness ratio (f = (L_nose + L_body)/d).
pub fn friction_coefficient(
    reynolds: f64,
    mach: f64,
    roughness: SurfaceRoughness,
    geom: &RocketGeometry,
) -> f64 {
    let re = reynolds.max(1.0);
    let cf_base = if re < 1.0e4 {
        1.328 / re.sqrt()
    } else {
        0.455 / re.log10().powf(2.58)
    };

    let compressibility = if mach > 0.3 && mach < 1.0 {
        1.0 / (1.0 - mach * mach).max(1e-6).sqrt()
    } else {
        1.0
    };

    let f = geom.fineness_ratio();
    let body_factor = 1.0 + 60.0 / f.powi(3) + 0.0025 * f;

    // Wetted-to-reference area ratio, approximated as the slender-body
    // lateral surface area over the reference (frontal) area.
    let wetted_area =
        2.0 * std::f64::consts::PI * geom.body_radius * geom.total_length();
    let ref_area = geom.reference_area();
    let area_ratio = wetted_area / ref_area;

    cf_base * compressibility * roughness_multiplier(roughness) * body_factor * area_ratio
}

/// Pressure drag: nose-shape term plus a fin leading-edge term.
pub fn pressure_coefficient(geom: &RocketGeometry) -> f64 {
    let nose = nose_pressure_coefficient(geom.nose_shape);
    let ref_area = geom.reference_area();
    let fin_area = 0.5 * (geom.fin_root_chord + geom.fin_tip_chord) * geom.fin_semi_span;
    let fin_term =
        0.5 * geom.fin_count as f64 * geom.fin_thickness * fin_area / ref_area;
    nose + fin_term
}

/// Base drag.
pub fn base_coefficient(mach: f64) -> f64 {
    if mach < 1.0 {
        0.12 + 0.13 * mach * mach
    } else {
        0.25 / mach
    }
}

/// Wave drag with a continuous closure at M=1 (§9 Open Question: the
/// naive `0.2/sqrt(M^2-1)` branch is singular at M=1; both branches are
/// pinned to the transonic ramp's endpoint value of 0.2 there).
pub fn wave_coefficient(mach: f64) -> f64 {
    if mach < 0.8 {
        0.0
    } else if mach < 1.2 {
        0.2 * ((mach - 0.8) / 0.4).powi(2)
    } else {
        // Rescaled so the branch equals 0.2 at the M=1.2 junction instead
        // of jumping to the raw `0.2/sqrt(M^2-1)` ~= 0.301 there.
        let junction = (1.2_f64 * 1.2 - 1.0).sqrt();
        0.2 * junction / (mach * mach - 1.0).sqrt()
    }
}

/// Induced drag from angle of attack (Oswald efficiency e=0.85).
pub fn induced_coefficient(alpha: f64, aspect_ratio: f64) -> f64 {
    const E: f64 = 0.85;
    let ar = aspect_ratio.max(1e-6);
    (2.0 * alpha).powi(2) / (std::f64::consts::PI * ar * E)
}

/// Aspect ratio of the fin set, used by the induced-drag term.
pub fn fin_aspect_ratio(geom: &RocketGeometry) -> f64 {
    2.0 * geom.fin_semi_span / (geom.fin_root_chord + geom.fin_tip_chord)
}

/// Total drag coefficient at the given flight condition.
pub struct DragInputs {
    pub reynolds: f64,
    pub mach: f64,
    pub alpha: f64,
}

pub fn total_drag_coefficient(geom: &RocketGeometry, inputs: &DragInputs) -> f64 {
    let cd_f = friction_coefficient(inputs.reynolds, inputs.mach, geom.surface_roughness, geom);
    let cd_p = pressure_coefficient(geom);
    let cd_b = base_coefficient(inputs.mach);
    let cd_w = wave_coefficient(inputs.mach);
    let cd_i = induced_coefficient(inputs.alpha, fin_aspect_ratio(geom));
    cd_f + cd_p + cd_b + cd_w + cd_i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::geometry::RocketGeometry;

    fn test_geom() -> RocketGeometry {
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
    fn wave_drag_zero_below_mach_08() {
        assert_eq!(wave_coefficient(0.5), 0.0);
    }

    #[test]
    fn wave_drag_continuous_near_mach_1() {
        let just_below = wave_coefficient(0.999);
        let just_above = wave_coefficient(1.2);
        assert!((just_below - 0.2).abs() < 0.01);
        assert!((just_above - 0.2).abs() < 0.05);
    }

    #[test]
    fn base_drag_continuous_at_mach_1() {
        let sub = base_coefficient(0.999);
        let sup = base_coefficient(1.001);
        assert!((sub - sup).abs() < 0.01);
    }

    #[test]
    fn induced_drag_zero_at_zero_alpha() {
        assert_eq!(induced_coefficient(0.0, 5.0), 0.0);
    }

    #[test]
    fn total_drag_is_positive_and_finite() {
        let g = test_geom();
        let cd = total_drag_coefficient(
            &g,
            &DragInputs { reynolds: 5.0e5, mach: 0.3, alpha: 0.02 },
        );
        assert!(cd > 0.0 && cd.is_finite());
    }
}
