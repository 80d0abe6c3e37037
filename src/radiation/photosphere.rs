//! Photosphere evolution models.
//!
//! Maps a bolometric luminosity series onto an effective photosphere radius
//! and temperature, which the SED layer then turns into flux densities.

use crate::constants::{DAY_TO_S, KM_TO_CM, SIGMA_SB};
use crate::error::AppError;

/// Radius/temperature series for each input time.
#[derive(Debug, Clone)]
pub struct PhotosphereSeries {
    /// Effective temperature [K].
    pub temperature: Vec<f64>,
    /// Photosphere radius [cm].
    pub radius: Vec<f64>,
}

/// Homologously expanding photosphere with a temperature floor.
///
/// The radius grows as `r = v_ej t` and the temperature follows from
/// Stefan-Boltzmann. Once the implied temperature would drop below the floor,
/// the temperature is pinned there and the radius recedes to whatever surface
/// radiates `lbol` at the floor temperature.
pub fn temperature_floor(
    time_days: &[f64],
    luminosity: &[f64],
    vej_km_s: f64,
    floor_kelvin: f64,
) -> Result<PhotosphereSeries, AppError> {
    if time_days.len() != luminosity.len() {
        return Err(AppError::data(format!(
            "Photosphere input length mismatch: {} times vs {} luminosities.",
            time_days.len(),
            luminosity.len()
        )));
    }
    if !(vej_km_s.is_finite() && vej_km_s > 0.0) {
        return Err(AppError::input(format!(
            "Photosphere velocity must be finite and positive, got {vej_km_s} km/s."
        )));
    }
    if !(floor_kelvin.is_finite() && floor_kelvin > 0.0) {
        return Err(AppError::input(format!(
            "Temperature floor must be finite and positive, got {floor_kelvin} K."
        )));
    }

    let v = vej_km_s * KM_TO_CM;
    let four_pi_sigma = 4.0 * std::f64::consts::PI * SIGMA_SB;

    let mut temperature = Vec::with_capacity(time_days.len());
    let mut radius = Vec::with_capacity(time_days.len());

    for (&t_days, &lbol) in time_days.iter().zip(luminosity) {
        if !(t_days.is_finite() && t_days > 0.0) {
            return Err(AppError::data(format!(
                "Photosphere times must be positive, got {t_days} days."
            )));
        }
        if !(lbol.is_finite() && lbol > 0.0) {
            return Err(AppError::numeric(format!(
                "Photosphere got non-physical luminosity {lbol:.6e} erg/s at t={t_days} days."
            )));
        }

        let r_free = v * t_days * DAY_TO_S;
        let t_free = (lbol / (four_pi_sigma * r_free * r_free)).powf(0.25);

        if t_free >= floor_kelvin {
            temperature.push(t_free);
            radius.push(r_free);
        } else {
            temperature.push(floor_kelvin);
            radius.push((lbol / (four_pi_sigma * floor_kelvin.powi(4))).sqrt());
        }
    }

    Ok(PhotosphereSeries {
        temperature,
        radius,
    })
}
