//! Spectral energy distributions.
//!
//! Flux densities are returned in mJy. The blackbody photosphere is the
//! workhorse; `CutoffBlackbody` additionally suppresses the spectrum blueward
//! of a cutoff wavelength and renormalizes so the spectrum still carries the
//! engine's bolometric luminosity.

use crate::constants::{
    AB_ZEROPOINT_MJY, ANGSTROM_TO_CM, BOLTZMANN, MJY, PLANCK, SPEED_OF_LIGHT,
};
use crate::error::AppError;
use crate::math::{log_space, trapezoid};

/// Shift an observer-frame `(frequency, time)` pair into the source frame.
///
/// Frequencies blueshift by `(1+z)`, times contract by `1/(1+z)`.
pub fn kcorrect(frequency: f64, redshift: f64, time: f64) -> (f64, f64) {
    (frequency * (1.0 + redshift), time / (1.0 + redshift))
}

/// Blackbody flux density [mJy] from a photosphere of radius `r_photosphere`
/// [cm] and temperature `temperature` [K] at luminosity distance `dl` [cm],
/// observed at source-frame frequency `frequency` [Hz].
pub fn blackbody_flux_density_mjy(
    temperature: f64,
    r_photosphere: f64,
    dl: f64,
    frequency: f64,
) -> f64 {
    let x = PLANCK * frequency / (BOLTZMANN * temperature);
    // exp_m1 keeps the Rayleigh-Jeans tail accurate for x << 1; for very large
    // x the denominator overflows to +inf and the flux underflows to 0.
    let spectral = 2.0 * std::f64::consts::PI * PLANCK * frequency.powi(3)
        / (SPEED_OF_LIGHT * SPEED_OF_LIGHT)
        / x.exp_m1();
    let ratio = r_photosphere / dl;
    spectral * ratio * ratio / MJY
}

/// Convert a flux density [mJy] to an AB magnitude.
pub fn flux_density_to_ab_magnitude(flux_density_mjy: f64) -> Result<f64, AppError> {
    if !(flux_density_mjy.is_finite() && flux_density_mjy > 0.0) {
        return Err(AppError::numeric(format!(
            "Cannot convert non-positive flux density {flux_density_mjy:.6e} mJy to a magnitude."
        )));
    }
    Ok(-2.5 * flux_density_mjy.log10() + AB_ZEROPOINT_MJY)
}

/// Number of frequency nodes used for the cutoff-blackbody normalization.
const NORM_GRID_STEPS: usize = 300;

/// Dimensionless `hν/kT` range covered by the normalization grid; outside it
/// the spectrum carries negligible luminosity.
const NORM_X_MIN: f64 = 1.0e-4;
const NORM_X_MAX: f64 = 50.0;

/// Blackbody with a UV cutoff.
///
/// Blueward of the cutoff wavelength the spectrum is suppressed by
/// `nu_cut / nu`, and the whole spectrum is rescaled (per evaluation) so that
/// it integrates to the supplied bolometric luminosity. The normalization
/// integral is evaluated numerically on a fixed log-frequency grid.
#[derive(Debug, Clone, Copy)]
pub struct CutoffBlackbody {
    nu_cut: f64,
}

impl CutoffBlackbody {
    pub fn new(cutoff_wavelength_angstrom: f64) -> Result<Self, AppError> {
        if !(cutoff_wavelength_angstrom.is_finite() && cutoff_wavelength_angstrom > 0.0) {
            return Err(AppError::input(format!(
                "Cutoff wavelength must be finite and positive, got {cutoff_wavelength_angstrom} A."
            )));
        }
        Ok(Self {
            nu_cut: SPEED_OF_LIGHT / (cutoff_wavelength_angstrom * ANGSTROM_TO_CM),
        })
    }

    /// Cutoff frequency [Hz].
    pub fn cutoff_frequency(&self) -> f64 {
        self.nu_cut
    }

    fn suppression(&self, frequency: f64) -> f64 {
        if frequency > self.nu_cut {
            self.nu_cut / frequency
        } else {
            1.0
        }
    }

    /// Flux density [mJy] at source-frame `frequency`, normalized so the full
    /// modified spectrum carries `lbol` [erg/s].
    pub fn flux_density_mjy(
        &self,
        temperature: f64,
        r_photosphere: f64,
        dl: f64,
        frequency: f64,
        lbol: f64,
    ) -> Result<f64, AppError> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(AppError::numeric(format!(
                "Cutoff blackbody got non-physical temperature {temperature:.6e} K."
            )));
        }
        if !(lbol.is_finite() && lbol > 0.0) {
            return Err(AppError::numeric(format!(
                "Cutoff blackbody got non-physical luminosity {lbol:.6e} erg/s."
            )));
        }

        // Spectrum-integrated luminosity of the *suppressed* blackbody, via
        // L_nu = 4 pi dl^2 f_nu on a log grid around the thermal peak.
        let nu_scale = BOLTZMANN * temperature / PLANCK;
        let nu_grid = log_space(NORM_X_MIN * nu_scale, NORM_X_MAX * nu_scale, NORM_GRID_STEPS)?;
        let lum_nu: Vec<f64> = nu_grid
            .iter()
            .map(|&nu| {
                let f_cgs = blackbody_flux_density_mjy(temperature, r_photosphere, dl, nu) * MJY;
                4.0 * std::f64::consts::PI * dl * dl * f_cgs * self.suppression(nu)
            })
            .collect();
        let l_model = trapezoid(&nu_grid, &lum_nu)?;
        if !(l_model.is_finite() && l_model > 0.0) {
            return Err(AppError::numeric(
                "Cutoff blackbody normalization integral is non-positive.",
            ));
        }

        let norm = lbol / l_model;
        Ok(norm
            * self.suppression(frequency)
            * blackbody_flux_density_mjy(temperature, r_photosphere, dl, frequency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SIGMA_SB;

    #[test]
    fn kcorrect_shifts_both_axes() {
        let (nu, t) = kcorrect(1.0e15, 1.0, 100.0);
        assert!((nu - 2.0e15).abs() < 1.0);
        assert!((t - 50.0).abs() < 1e-12);
    }

    #[test]
    fn blackbody_rayleigh_jeans_scaling() {
        // Deep in the RJ tail the flux density scales as nu^2.
        let (t, r, dl) = (1.0e4, 1.0e15, 1.0e27);
        let f1 = blackbody_flux_density_mjy(t, r, dl, 1.0e10);
        let f2 = blackbody_flux_density_mjy(t, r, dl, 2.0e10);
        assert!((f2 / f1 - 4.0).abs() < 1e-3);
    }

    #[test]
    fn blackbody_integrates_to_stefan_boltzmann() {
        // ∫ L_nu dnu should recover 4 pi R^2 sigma T^4.
        let (t, r, dl) = (2.0e4, 1.0e15, 1.0e27);
        let nu_scale = BOLTZMANN * t / PLANCK;
        let grid = log_space(1.0e-4 * nu_scale, 50.0 * nu_scale, 2000).unwrap();
        let lum: Vec<f64> = grid
            .iter()
            .map(|&nu| {
                4.0 * std::f64::consts::PI
                    * dl
                    * dl
                    * blackbody_flux_density_mjy(t, r, dl, nu)
                    * MJY
            })
            .collect();
        let integral = trapezoid(&grid, &lum).unwrap();
        let expected = 4.0 * std::f64::consts::PI * r * r * SIGMA_SB * t.powi(4);
        assert!(
            (integral - expected).abs() / expected < 1e-3,
            "integral {integral:.4e} vs expected {expected:.4e}"
        );
    }

    #[test]
    fn ab_magnitude_zero_point() {
        // 3631 Jy is AB magnitude 0 by definition.
        let mag = flux_density_to_ab_magnitude(3.631e6).unwrap();
        assert!(mag.abs() < 1e-2, "got {mag}");
        assert!(flux_density_to_ab_magnitude(0.0).is_err());
        assert!(flux_density_to_ab_magnitude(-1.0).is_err());
    }

    #[test]
    fn cutoff_blackbody_suppresses_blue_side_only() {
        let sed = CutoffBlackbody::new(3000.0).unwrap();
        let (t, r, dl, lbol) = (2.0e4, 1.0e15, 1.0e27, 1.0e44);
        let nu_red = 0.5 * sed.cutoff_frequency();
        let nu_blue = 2.0 * sed.cutoff_frequency();

        let f_red = sed.flux_density_mjy(t, r, dl, nu_red, lbol).unwrap();
        let f_blue = sed.flux_density_mjy(t, r, dl, nu_blue, lbol).unwrap();
        let bb_red = blackbody_flux_density_mjy(t, r, dl, nu_red);
        let bb_blue = blackbody_flux_density_mjy(t, r, dl, nu_blue);

        // Relative to the plain blackbody, the blue point loses a factor of
        // nu_cut/nu = 0.5 beyond the common renormalization.
        let rel = (f_blue / bb_blue) / (f_red / bb_red);
        assert!((rel - 0.5).abs() < 1e-9, "got {rel}");
    }

    #[test]
    fn cutoff_blackbody_conserves_bolometric_luminosity() {
        let sed = CutoffBlackbody::new(3000.0).unwrap();
        let (t, r, dl, lbol) = (1.5e4, 2.0e15, 1.0e27, 3.0e43);

        let nu_scale = BOLTZMANN * t / PLANCK;
        let grid = log_space(1.0e-4 * nu_scale, 50.0 * nu_scale, 2000).unwrap();
        let lum: Vec<f64> = grid
            .iter()
            .map(|&nu| {
                let f = sed.flux_density_mjy(t, r, dl, nu, lbol).unwrap();
                4.0 * std::f64::consts::PI * dl * dl * f * MJY
            })
            .collect();
        let integral = trapezoid(&grid, &lum).unwrap();
        assert!(
            (integral - lbol).abs() / lbol < 1e-2,
            "integral {integral:.4e} vs lbol {lbol:.4e}"
        );
    }
}
