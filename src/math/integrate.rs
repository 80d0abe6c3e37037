//! Trapezoidal quadrature on non-uniform grids.
//!
//! Used by the diffusion interaction process and by the cutoff-blackbody SED
//! normalization. Grids here are small (hundreds of points), so the composite
//! trapezoid rule is accurate enough and keeps everything deterministic.

use crate::error::AppError;

/// Integrate `y` over `x` with the composite trapezoid rule.
pub fn trapezoid(x: &[f64], y: &[f64]) -> Result<f64, AppError> {
    if x.len() != y.len() {
        return Err(AppError::data(format!(
            "Quadrature length mismatch: {} x-values vs {} y-values.",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(AppError::data("Quadrature needs at least 2 points."));
    }

    let mut total = 0.0;
    for i in 1..x.len() {
        total += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoid_integrates_line_exactly() {
        // ∫0..2 (2t) dt = 4, exact for the trapezoid rule.
        let x = [0.0, 0.5, 1.3, 2.0];
        let y: Vec<f64> = x.iter().map(|&t| 2.0 * t).collect();
        let v = trapezoid(&x, &y).unwrap();
        assert!((v - 4.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_rejects_short_or_mismatched_input() {
        assert!(trapezoid(&[0.0], &[1.0]).is_err());
        assert!(trapezoid(&[0.0, 1.0], &[1.0]).is_err());
    }
}
