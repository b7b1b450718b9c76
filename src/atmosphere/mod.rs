//! ISA atmosphere and gravity model.
//!
//! Two-layer International Standard Atmosphere profile: a linear-lapse
//! troposphere below 11 km and an isothermal tropopause above it. This
//! model is valid to ~25 km as the core's scope names; altitudes below
//! -500 m extrapolate without signalling (there's no physical meaning to
//! clamp to, and callers querying sub-sea-level launch sites still want
//! a number back).

const R_AIR: f64 = 287.058; // specific gas constant for dry air, J/(kg*K)
const GAMMA: f64 = 1.4; // ratio of specific heats
const LAPSE: f64 = 6.5e-3; // troposphere lapse rate, K/m
const TROPOPAUSE_ALT: f64 = 11_000.0; // m

pub const G0: f64 = 9.806_65;
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Non-standard base conditions for a launch day (§6 `Configuration`
/// "atmosphere overrides"). Defaults reduce exactly to the standard ISA
/// sea-level reference values.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct AtmosphereOverrides {
    pub t0: f64,
    pub p0: f64,
}

impl Default for AtmosphereOverrides {
    fn default() -> Self {
        Self { t0: 288.15, p0: 101_325.0 }
    }
}

/// Atmospheric properties at a given geometric altitude.
#[derive(Debug, Clone, Copy)]
pub struct Atmo {
    pub temperature: f64, // K
    pub pressure: f64,    // Pa
    pub density: f64,     // kg/m^3
    pub sound_speed: f64, // m/s
    pub viscosity: f64,   // Pa*s (dynamic, Sutherland)
    pub gravity: f64,     // m/s^2, magnitude
}

/// ISA properties at `altitude_m`, using standard sea-level references.
pub fn isa(altitude_m: f64) -> Atmo {
    isa_with(altitude_m, &AtmosphereOverrides::default())
}

/// ISA properties at `altitude_m` with overridden base temperature/pressure.
pub fn isa_with(altitude_m: f64, overrides: &AtmosphereOverrides) -> Atmo {
    let h = altitude_m.max(-500.0);
    let t0 = overrides.t0;
    let p0 = overrides.p0;

    let (temperature, pressure) = if h < TROPOPAUSE_ALT {
        let t = t0 - LAPSE * h;
        let p = p0 * (t / t0).powf(G0 / (LAPSE * R_AIR));
        (t, p)
    } else {
        let t_trop = t0 - LAPSE * TROPOPAUSE_ALT;
        let p_trop = p0 * (t_trop / t0).powf(G0 / (LAPSE * R_AIR));
        let p = p_trop * (-G0 * (h - TROPOPAUSE_ALT) / (R_AIR * t_trop)).exp();
        (t_trop, p)
    };

    let density = pressure / (R_AIR * temperature);
    let sound_speed = (GAMMA * R_AIR * temperature).sqrt();
    let viscosity = sutherland_viscosity(temperature);

    Atmo {
        temperature,
        pressure,
        density,
        sound_speed,
        viscosity,
        gravity: gravity(h),
    }
}

/// Sutherland's law dynamic viscosity of air, Pa*s.
pub fn sutherland_viscosity(temperature_k: f64) -> f64 {
    1.458e-6 * temperature_k.powf(1.5) / (temperature_k + 110.4)
}

/// Gravity magnitude as a function of altitude (inverse-square law).
pub fn gravity(altitude_m: f64) -> f64 {
    let h = altitude_m.max(-500.0);
    G0 * (EARTH_RADIUS / (EARTH_RADIUS + h)).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sea_level_standard_values() {
        let a = isa(0.0);
        assert_relative_eq!(a.pressure, 101_325.0, epsilon = 1.0);
        assert_relative_eq!(a.temperature, 288.15, epsilon = 0.1);
        assert_relative_eq!(a.density, 1.225, epsilon = 0.001);
        assert_relative_eq!(a.sound_speed, 340.3, epsilon = 1.0);
    }

    #[test]
    fn tropopause_boundary_continuous() {
        let below = isa(TROPOPAUSE_ALT - 1.0);
        let above = isa(TROPOPAUSE_ALT + 1.0);
        assert_relative_eq!(below.temperature, above.temperature, epsilon = 0.01);
        assert_relative_eq!(below.pressure, above.pressure, epsilon = 1.0);
    }

    #[test]
    fn density_decreases_with_altitude() {
        let rho0 = isa(0.0).density;
        let rho10k = isa(10_000.0).density;
        let rho20k = isa(20_000.0).density;
        assert!(rho0 > rho10k);
        assert!(rho10k > rho20k);
    }

    #[test]
    fn negative_altitude_extrapolates_without_panicking() {
        let a = isa(-1000.0);
        assert!(a.pressure > 101_325.0);
    }

    #[test]
    fn gravity_decreases_with_altitude() {
        assert!(gravity(100_000.0) < gravity(0.0));
    }

    #[test]
    fn overrides_reduce_to_default_when_unchanged() {
        let a = isa_with(5000.0, &AtmosphereOverrides::default());
        let b = isa(5000.0);
        assert_relative_eq!(a.pressure, b.pressure, epsilon = 1e-9);
    }

    #[test]
    fn hot_day_override_lowers_density_at_sea_level() {
        let hot = isa_with(0.0, &AtmosphereOverrides { t0: 308.15, p0: 101_325.0 });
        let standard = isa(0.0);
        assert!(hot.density < standard.density);
    }
}
