//! Luminosity-distance seam.
//!
//! Cosmology proper (flat-ΛCDM integrals, parameter sets like Planck18) is an
//! external collaborator: whatever computed the distances, this crate only
//! needs `d_L(z)` in centimeters. The `Cosmology` trait is the seam; the two
//! implementations here cover the common call sites:
//!
//! - `FixedDistance`: the caller already resolved a single distance (CLI flags)
//! - `DistanceTable`: interpolate a precomputed `(z, d_L [Mpc])` table

use crate::constants::MPC_TO_CM;
use crate::error::AppError;
use crate::math::LinearInterp;

/// Provider of luminosity distances.
pub trait Cosmology {
    /// Luminosity distance at `redshift`, in centimeters.
    fn luminosity_distance_cm(&self, redshift: f64) -> Result<f64, AppError>;
}

/// A single caller-supplied luminosity distance.
///
/// The redshift argument is still validated but otherwise ignored; this is for
/// workflows where the distance was computed externally for a known event.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance {
    dl_cm: f64,
}

impl FixedDistance {
    pub fn from_mpc(dl_mpc: f64) -> Result<Self, AppError> {
        if !(dl_mpc.is_finite() && dl_mpc > 0.0) {
            return Err(AppError::input(format!(
                "Luminosity distance must be finite and positive, got {dl_mpc} Mpc."
            )));
        }
        Ok(Self {
            dl_cm: dl_mpc * MPC_TO_CM,
        })
    }

    pub fn from_cm(dl_cm: f64) -> Result<Self, AppError> {
        if !(dl_cm.is_finite() && dl_cm > 0.0) {
            return Err(AppError::input(format!(
                "Luminosity distance must be finite and positive, got {dl_cm} cm."
            )));
        }
        Ok(Self { dl_cm })
    }
}

impl Cosmology for FixedDistance {
    fn luminosity_distance_cm(&self, redshift: f64) -> Result<f64, AppError> {
        check_redshift(redshift)?;
        Ok(self.dl_cm)
    }
}

/// A precomputed `(z, d_L)` table, interpolated linearly in redshift.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    redshifts: Vec<f64>,
    dl_cm: Vec<f64>,
}

impl DistanceTable {
    /// Build from redshifts and matching luminosity distances in Mpc.
    pub fn from_mpc(redshifts: Vec<f64>, dl_mpc: Vec<f64>) -> Result<Self, AppError> {
        let dl_cm: Vec<f64> = dl_mpc.iter().map(|d| d * MPC_TO_CM).collect();
        // Validate through the interpolant constructor.
        LinearInterp::new(&redshifts, &dl_cm)?;
        if dl_cm.iter().any(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(AppError::input(
                "Distance table must contain finite, positive distances.",
            ));
        }
        Ok(Self { redshifts, dl_cm })
    }
}

impl Cosmology for DistanceTable {
    fn luminosity_distance_cm(&self, redshift: f64) -> Result<f64, AppError> {
        check_redshift(redshift)?;
        let interp = LinearInterp::new(&self.redshifts, &self.dl_cm)?;
        interp.eval(redshift)
    }
}

fn check_redshift(redshift: f64) -> Result<(), AppError> {
    if !(redshift.is_finite() && redshift >= 0.0) {
        return Err(AppError::input(format!(
            "Redshift must be finite and non-negative, got {redshift}."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_distance_converts_mpc() {
        let cosmo = FixedDistance::from_mpc(100.0).unwrap();
        let dl = cosmo.luminosity_distance_cm(0.5).unwrap();
        assert!((dl - 100.0 * MPC_TO_CM).abs() / dl < 1e-12);
    }

    #[test]
    fn fixed_distance_rejects_bad_inputs() {
        assert!(FixedDistance::from_mpc(-1.0).is_err());
        assert!(FixedDistance::from_mpc(f64::NAN).is_err());
        let cosmo = FixedDistance::from_mpc(100.0).unwrap();
        assert!(cosmo.luminosity_distance_cm(-0.1).is_err());
    }

    #[test]
    fn distance_table_interpolates() {
        let table = DistanceTable::from_mpc(vec![0.0, 1.0], vec![0.1, 6700.0]).unwrap();
        let mid = table.luminosity_distance_cm(0.5).unwrap();
        let expected = 0.5 * (0.1 + 6700.0) * MPC_TO_CM;
        assert!((mid - expected).abs() / expected < 1e-12);
        assert!(table.luminosity_distance_cm(2.0).is_err());
    }
}
