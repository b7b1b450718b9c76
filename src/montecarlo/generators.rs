//! Random variate generators for Monte Carlo perturbation (§4.8).

use rand::Rng;

/// Standard Box-Muller gaussian with mean `mu` and standard deviation `sigma`.
pub fn gaussian(rng: &mut impl Rng, mu: f64, sigma: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z0 = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mu + sigma * z0
}

/// Triangular distribution over `[low, high]` with mode `mode`, sampled
/// via the piecewise inverse CDF.
pub fn triangular(rng: &mut impl Rng, low: f64, mode: f64, high: f64) -> f64 {
    let u: f64 = rng.gen_range(0.0..1.0);
    let fc = (mode - low) / (high - low);
    if u < fc {
        low + (u * (high - low) * (mode - low)).sqrt()
    } else {
        high - ((1.0 - u) * (high - low) * (high - mode)).sqrt()
    }
}

/// Log-normal variate whose underlying normal has matched moments
/// (mean `mu`, standard deviation `sigma` in linear space), via
/// `exp(gaussian)`.
pub fn log_normal(rng: &mut impl Rng, mu: f64, sigma: f64) -> f64 {
    let variance = sigma * sigma;
    let mu_log = (mu * mu / (mu * mu + variance).sqrt()).ln();
    let sigma_log = (1.0 + variance / (mu * mu)).ln().sqrt();
    gaussian(rng, mu_log, sigma_log).exp()
}
