//! Synthetic observations from an evaluated model curve.
//!
//! The generator perturbs a noiseless model curve with fractional Gaussian
//! noise so sampler integrations can be rehearsed without real archive data.
//! Seeded explicitly, so runs are reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::AppError;

/// A noiseless model curve plus its noisy realization.
#[derive(Debug, Clone)]
pub struct SyntheticObservations {
    pub time_days: Vec<f64>,
    /// Noiseless model values.
    pub y_true: Vec<f64>,
    /// Noisy observed values.
    pub y_obs: Vec<f64>,
    /// One-sigma error bars, `noise_frac * |y_true|`.
    pub y_err: Vec<f64>,
}

/// Perturb a model curve with fractional Gaussian noise.
///
/// Each observation is `y * (1 + noise_frac * N(0, 1))` with the quoted error
/// bar set to the true one-sigma level.
pub fn synthesize(
    time_days: &[f64],
    y_model: &[f64],
    noise_frac: f64,
    seed: u64,
) -> Result<SyntheticObservations, AppError> {
    if time_days.len() != y_model.len() {
        return Err(AppError::input(format!(
            "Time grid has {} points but the model curve has {}.",
            time_days.len(),
            y_model.len()
        )));
    }
    if time_days.is_empty() {
        return Err(AppError::input("Cannot synthesize from an empty curve."));
    }
    if !(noise_frac.is_finite() && noise_frac >= 0.0) {
        return Err(AppError::input(format!(
            "Noise fraction must be finite and non-negative, got {noise_frac}."
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::numeric(format!("Noise distribution error: {e}")))?;

    let mut y_obs = Vec::with_capacity(y_model.len());
    let mut y_err = Vec::with_capacity(y_model.len());
    for &y in y_model {
        let z: f64 = normal.sample(&mut rng);
        y_obs.push(y * (1.0 + noise_frac * z));
        y_err.push(noise_frac * y.abs());
    }

    Ok(SyntheticObservations {
        time_days: time_days.to_vec(),
        y_true: y_model.to_vec(),
        y_obs,
        y_err,
    })
}
