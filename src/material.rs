//! Fin/structural material properties (§3 `Material`).
//!
//! The registry is a small, fixed set known at compile time, so it's a
//! `match` over a category tag rather than a runtime `HashMap` — no
//! mutable global state, no lookup failure mode to handle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialCategory {
    Plywood,
    FiberglassG10,
    CarbonFiber,
    Aluminum6061,
    Balsa,
    Basswood,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Material {
    pub category: MaterialCategory,
    pub shear_modulus: f64,  // Pa
    pub youngs_modulus: f64, // Pa
    pub density: f64,        // kg/m^3
    pub poisson_ratio: f64,
}

impl Material {
    pub const fn preset(category: MaterialCategory) -> Material {
        match category {
            MaterialCategory::Plywood => Material {
                category,
                shear_modulus: 0.9e9,
                youngs_modulus: 9.0e9,
                density: 630.0,
                poisson_ratio: 0.3,
            },
            MaterialCategory::FiberglassG10 => Material {
                category,
                shear_modulus: 3.0e9,
                youngs_modulus: 17.0e9,
                density: 1850.0,
                poisson_ratio: 0.14,
            },
            MaterialCategory::CarbonFiber => Material {
                category,
                shear_modulus: 5.0e9,
                youngs_modulus: 70.0e9,
                density: 1600.0,
                poisson_ratio: 0.1,
            },
            MaterialCategory::Aluminum6061 => Material {
                category,
                shear_modulus: 26.0e9,
                youngs_modulus: 69.0e9,
                density: 2700.0,
                poisson_ratio: 0.33,
            },
            MaterialCategory::Balsa => Material {
                category,
                shear_modulus: 0.1e9,
                youngs_modulus: 3.0e9,
                density: 160.0,
                poisson_ratio: 0.229,
            },
            MaterialCategory::Basswood => Material {
                category,
                shear_modulus: 0.6e9,
                youngs_modulus: 6.5e9,
                density: 420.0,
                poisson_ratio: 0.3,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_positive_moduli() {
        for cat in [
            MaterialCategory::Plywood,
            MaterialCategory::FiberglassG10,
            MaterialCategory::CarbonFiber,
            MaterialCategory::Aluminum6061,
            MaterialCategory::Balsa,
            MaterialCategory::Basswood,
        ] {
            let m = Material::preset(cat);
            assert!(m.shear_modulus > 0.0);
            assert!(m.youngs_modulus > 0.0);
            assert!(m.density > 0.0);
        }
    }
}
