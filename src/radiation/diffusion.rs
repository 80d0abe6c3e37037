//! Diffusion interaction process.
//!
//! Reprocesses a raw engine luminosity through an expanding ejecta shell
//! (Arnett-style): photons leak out on the diffusion timescale, smoothing and
//! delaying the input power, while gamma-rays partially escape according to a
//! trapping factor.
//!
//! The observed luminosity is
//!
//! ```text
//! L_out(t) = (2/τ_d²) e^{-t²/τ_d²} ∫_0^t L_in(t') e^{t'²/τ_d²} t' dt'  ×  (1 - e^{-A/t²})
//! ```
//!
//! with `τ_d² = 2 κ M_ej / (13.7 c v_ej)` and `A = 3 κ_γ M_ej / (4π v_ej²)`.
//!
//! Numerical note: `e^{t'²/τ_d²}` overflows long after peak, so the running
//! integral is carried pre-multiplied by `e^{-t_i²/τ_d²}`; every retained term
//! then has a non-positive exponent.

use crate::constants::{DAY_TO_S, KM_TO_CM, SOLAR_MASS, SPEED_OF_LIGHT};
use crate::domain::DiffusionParams;
use crate::error::AppError;

/// Dimensionless constant of the Arnett diffusion timescale.
const ARNETT_BETA: f64 = 13.7;

/// Apply the diffusion process to `luminosity` sampled at `time_days`.
///
/// Times must be strictly increasing and positive; the integral is taken from
/// t = 0 with the integrand vanishing there (it carries an explicit factor t').
pub fn diffuse(
    time_days: &[f64],
    luminosity: &[f64],
    params: &DiffusionParams,
) -> Result<Vec<f64>, AppError> {
    if time_days.len() != luminosity.len() {
        return Err(AppError::data(format!(
            "Diffusion input length mismatch: {} times vs {} luminosities.",
            time_days.len(),
            luminosity.len()
        )));
    }
    if time_days.is_empty() {
        return Err(AppError::data("Diffusion needs at least one time sample."));
    }
    for p in [params.kappa, params.kappa_gamma, params.mej, params.vej] {
        if !(p.is_finite() && p > 0.0) {
            return Err(AppError::input(format!(
                "Diffusion parameters must be finite and positive, got {params:?}."
            )));
        }
    }

    let mej_g = params.mej * SOLAR_MASS;
    let v = params.vej * KM_TO_CM;
    let tau_sq = 2.0 * params.kappa * mej_g / (ARNETT_BETA * SPEED_OF_LIGHT * v);
    let a_leak = 3.0 * params.kappa_gamma * mej_g / (4.0 * std::f64::consts::PI * v * v);

    let mut out = Vec::with_capacity(time_days.len());

    // Running integral, scaled by e^{-t_prev²/τ²}.
    let mut scaled_integral = 0.0_f64;
    let mut t_prev = 0.0_f64;
    let mut lum_prev = 0.0_f64; // integrand factor L(t')·t' vanishes at t'=0

    for (&t_days, &lum) in time_days.iter().zip(luminosity) {
        let t = t_days * DAY_TO_S;
        if !(t.is_finite() && t > t_prev) {
            return Err(AppError::data(
                "Diffusion times must be positive and strictly increasing.",
            ));
        }
        if !(lum.is_finite() && lum >= 0.0) {
            return Err(AppError::numeric(format!(
                "Diffusion got non-physical input luminosity {lum:.6e} erg/s."
            )));
        }

        // Rescale the accumulated integral to the new reference time, then add
        // the trapezoid over [t_prev, t]; both exponents are <= 0.
        let shift = ((t_prev * t_prev - t * t) / tau_sq).exp();
        let g_prev = lum_prev * t_prev * shift;
        let g_here = lum * t;
        scaled_integral = scaled_integral * shift + 0.5 * (g_prev + g_here) * (t - t_prev);

        let trapping = -(-a_leak / (t * t)).exp_m1();
        out.push((2.0 / tau_sq) * scaled_integral * trapping);

        t_prev = t;
        lum_prev = lum;
    }

    Ok(out)
}
