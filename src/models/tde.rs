//! Observable TDE light curves.
//!
//! These functions wrap the bolometric engines in `fallback` with the
//! radiative-transfer layer: k-correction, photosphere, SED, and the final
//! flux-density/magnitude conversion. Signatures are deliberately flat
//! (slices and plain parameter structs) so external samplers can call them
//! directly inside a likelihood.

use rayon::prelude::*;

use crate::constants::DAY_TO_S;
use crate::cosmology::Cosmology;
use crate::domain::{DiffusionParams, MetzgerTdeParams, OutputFormat, TdeAnalyticalParams};
use crate::error::AppError;
use crate::math::LinearInterp;
use crate::models::fallback::{analytic_fallback, metzger_tde_evolution, TdeEvolution};
use crate::radiation::{
    blackbody_flux_density_mjy, diffuse, flux_density_to_ab_magnitude, kcorrect,
    temperature_floor, CutoffBlackbody,
};

/// Evaluate the Metzger TDE model at observer-frame times [days].
///
/// The envelope evolution runs on its internal source-frame grid; photosphere
/// temperature and radius are interpolated onto the k-corrected observation
/// times and folded through a blackbody SED. Observation times outside the
/// integrated window are an error.
pub fn metzger_tde(
    time_days: &[f64],
    redshift: f64,
    params: &MetzgerTdeParams,
    frequency_hz: f64,
    output_format: OutputFormat,
    cosmology: &dyn Cosmology,
) -> Result<Vec<f64>, AppError> {
    check_eval_inputs(time_days, frequency_hz)?;
    let evolution = metzger_tde_evolution(params)?;
    let dl = cosmology.luminosity_distance_cm(redshift)?;

    let flux = metzger_flux_density(time_days, redshift, &evolution, frequency_hz, dl)?;
    to_output(flux, output_format)
}

/// Blackbody flux densities [mJy] from a precomputed envelope evolution.
///
/// Split out so callers fitting many bands can reuse one evolution.
pub fn metzger_flux_density(
    time_days: &[f64],
    redshift: f64,
    evolution: &TdeEvolution,
    frequency_hz: f64,
    dl_cm: f64,
) -> Result<Vec<f64>, AppError> {
    let temp = LinearInterp::new(&evolution.time, &evolution.photosphere_temperature)?;
    let radius = LinearInterp::new(&evolution.time, &evolution.photosphere_radius)?;
    let (lo, hi) = temp.domain();

    time_days
        .par_iter()
        .map(|&t_obs| {
            let (nu_source, t_source) = kcorrect(frequency_hz, redshift, t_obs * DAY_TO_S);
            if t_source < lo || t_source > hi {
                return Err(AppError::numeric(format!(
                    "Observation at {t_obs:.3} days maps to source-frame {:.3} days, \
                     outside the evolved window [{:.3}, {:.3}] days.",
                    t_source / DAY_TO_S,
                    lo / DAY_TO_S,
                    hi / DAY_TO_S
                )));
            }
            let t = temp.eval(t_source)?;
            let r = radius.eval(t_source)?;
            Ok(blackbody_flux_density_mjy(t, r, dl_cm, nu_source))
        })
        .collect()
}

/// Bolometric luminosity [erg/s] of the analytic TDE model at source-frame
/// times [days], optionally reprocessed by the diffusion interaction process.
pub fn tde_analytical_bolometric(
    time_days: &[f64],
    l0: f64,
    t0_days: f64,
    diffusion: Option<&DiffusionParams>,
) -> Result<Vec<f64>, AppError> {
    if !(l0.is_finite() && l0 > 0.0) {
        return Err(AppError::input(format!(
            "Fallback luminosity scale l0 must be finite and positive, got {l0}."
        )));
    }
    if !(t0_days.is_finite() && t0_days > 0.0) {
        return Err(AppError::input(format!(
            "Turn-on time must be finite and positive, got {t0_days} days."
        )));
    }

    let lbol = analytic_fallback(time_days, l0, t0_days);
    match diffusion {
        Some(params) => diffuse(time_days, &lbol, params),
        None => Ok(lbol),
    }
}

/// Evaluate the analytic TDE model at observer-frame times [days].
///
/// Pipeline: k-correct, analytic fallback (± diffusion), temperature-floor
/// photosphere, cutoff-blackbody SED, flux density or AB magnitude.
pub fn tde_analytical(
    time_days: &[f64],
    redshift: f64,
    params: &TdeAnalyticalParams,
    frequency_hz: f64,
    output_format: OutputFormat,
    cosmology: &dyn Cosmology,
) -> Result<Vec<f64>, AppError> {
    check_eval_inputs(time_days, frequency_hz)?;
    let dl = cosmology.luminosity_distance_cm(redshift)?;

    let (nu_source, _) = kcorrect(frequency_hz, redshift, 0.0);
    let time_source_days: Vec<f64> = time_days.iter().map(|&t| t / (1.0 + redshift)).collect();

    let lbol = tde_analytical_bolometric(
        &time_source_days,
        params.l0,
        params.t0,
        params.diffusion.as_ref(),
    )?;
    let photosphere =
        temperature_floor(&time_source_days, &lbol, params.vej, params.temperature_floor)?;
    let sed = CutoffBlackbody::new(params.cutoff_wavelength)?;

    let flux: Result<Vec<f64>, AppError> = (0..time_source_days.len())
        .into_par_iter()
        .map(|i| {
            sed.flux_density_mjy(
                photosphere.temperature[i],
                photosphere.radius[i],
                dl,
                nu_source,
                lbol[i],
            )
        })
        .collect();

    to_output(flux?, output_format)
}

fn check_eval_inputs(time_days: &[f64], frequency_hz: f64) -> Result<(), AppError> {
    if time_days.is_empty() {
        return Err(AppError::data("No evaluation times supplied."));
    }
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(AppError::input(format!(
            "Frequency must be finite and positive, got {frequency_hz} Hz."
        )));
    }
    Ok(())
}

fn to_output(flux_mjy: Vec<f64>, output_format: OutputFormat) -> Result<Vec<f64>, AppError> {
    match output_format {
        OutputFormat::FluxDensity => Ok(flux_mjy),
        OutputFormat::Magnitude => flux_mjy
            .iter()
            .map(|&f| flux_density_to_ab_magnitude(f))
            .collect(),
    }
}
