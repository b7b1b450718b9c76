//! Immutable rocket geometry (§3 `RocketGeometry`).

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoseShape {
    Conical,
    Ogive,
    Parabolic,
    Elliptical,
    VonKarman,
    Haack,
    Power,
    Blunted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceRoughness {
    Polished,
    Smooth,
    Standard,
    Rough,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boattail {
    pub length: f64,
    pub end_diameter: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketGeometry {
    pub body_radius: f64,
    pub body_length: f64,
    pub nose_length: f64,
    pub nose_shape: NoseShape,
    pub fin_count: u32,
    pub fin_root_chord: f64,
    pub fin_tip_chord: f64,
    pub fin_semi_span: f64,
    pub fin_sweep_distance: f64,
    pub fin_thickness: f64,
    pub boattail: Option<Boattail>,
    pub surface_roughness: SurfaceRoughness,
}

impl RocketGeometry {
    pub fn new(
        body_radius: f64,
        body_length: f64,
        nose_length: f64,
        nose_shape: NoseShape,
        fin_count: u32,
        fin_root_chord: f64,
        fin_tip_chord: f64,
        fin_semi_span: f64,
        fin_sweep_distance: f64,
        fin_thickness: f64,
        boattail: Option<Boattail>,
        surface_roughness: SurfaceRoughness,
    ) -> CoreResult<Self> {
        if body_radius <= 0.0 || body_length <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "body radius and length must be positive".into(),
            ));
        }
        if nose_length <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "nose length must be positive".into(),
            ));
        }
        if fin_count < 3 {
            return Err(CoreError::InvalidConfiguration(
                "fin count must be at least 3".into(),
            ));
        }
        if fin_root_chord <= 0.0 || fin_semi_span <= 0.0 || fin_thickness <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "fin geometry must be positive".into(),
            ));
        }
        Ok(Self {
            body_radius,
            body_length,
            nose_length,
            nose_shape,
            fin_count,
            fin_root_chord,
            fin_tip_chord,
            fin_semi_span,
            fin_sweep_distance,
            fin_thickness,
            boattail,
            surface_roughness,
        })
    }

    pub fn body_diameter(&self) -> f64 {
        2.0 * self.body_radius
    }

    pub fn total_length(&self) -> f64 {
        self.nose_length + self.body_length
    }

    pub fn reference_area(&self) -> f64 {
        std::f64::consts::PI * self.body_radius * self.body_radius
    }

    pub fn fineness_ratio(&self) -> f64 {
        self.total_length() / self.body_diameter()
    }
}
