//! Linear interpolation over a strictly increasing grid.
//!
//! The TDE models integrate state on their own internal time grid and then
//! sample photosphere properties at the (k-corrected) observation times.
//! Queries outside the tabulated range are an error rather than an
//! extrapolation: silent extrapolation of photosphere temperatures produces
//! plausible-looking nonsense.

use crate::error::AppError;

/// A borrowed `(x, y)` table supporting linear interpolation.
#[derive(Debug, Clone)]
pub struct LinearInterp<'a> {
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> LinearInterp<'a> {
    /// Build an interpolant over `x` (strictly increasing, finite) and `y`.
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Result<Self, AppError> {
        if x.len() < 2 {
            return Err(AppError::data("Interpolation grid needs at least 2 points."));
        }
        if x.len() != y.len() {
            return Err(AppError::data(format!(
                "Interpolation grid length mismatch: {} x-values vs {} y-values.",
                x.len(),
                y.len()
            )));
        }
        for w in x.windows(2) {
            if !(w[0].is_finite() && w[1].is_finite() && w[1] > w[0]) {
                return Err(AppError::data(
                    "Interpolation grid must be finite and strictly increasing.",
                ));
            }
        }
        Ok(Self { x, y })
    }

    /// Inclusive domain of the interpolant.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluate at `xq`, erroring if `xq` lies outside the grid.
    pub fn eval(&self, xq: f64) -> Result<f64, AppError> {
        let (lo, hi) = self.domain();
        if !xq.is_finite() || xq < lo || xq > hi {
            return Err(AppError::numeric(format!(
                "Interpolation query {xq:.6e} outside tabulated range [{lo:.6e}, {hi:.6e}]."
            )));
        }

        // Index of the right edge of the bracketing interval.
        let j = self.x.partition_point(|&v| v < xq).clamp(1, self.x.len() - 1);
        let (x0, x1) = (self.x[j - 1], self.x[j]);
        let (y0, y1) = (self.y[j - 1], self.y[j]);
        let frac = (xq - x0) / (x1 - x0);
        Ok(y0 + frac * (y1 - y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interp_exact_at_nodes_and_linear_between() {
        let x = [0.0, 1.0, 3.0];
        let y = [10.0, 20.0, 40.0];
        let f = LinearInterp::new(&x, &y).unwrap();
        assert!((f.eval(0.0).unwrap() - 10.0).abs() < 1e-12);
        assert!((f.eval(1.0).unwrap() - 20.0).abs() < 1e-12);
        assert!((f.eval(3.0).unwrap() - 40.0).abs() < 1e-12);
        assert!((f.eval(2.0).unwrap() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn interp_rejects_out_of_range() {
        let x = [1.0, 2.0];
        let y = [0.0, 1.0];
        let f = LinearInterp::new(&x, &y).unwrap();
        assert!(f.eval(0.5).is_err());
        assert!(f.eval(2.5).is_err());
    }

    #[test]
    fn interp_rejects_bad_grids() {
        assert!(LinearInterp::new(&[1.0], &[1.0]).is_err());
        assert!(LinearInterp::new(&[1.0, 1.0], &[0.0, 1.0]).is_err());
        assert!(LinearInterp::new(&[1.0, 2.0], &[0.0]).is_err());
    }
}
