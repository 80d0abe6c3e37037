//! Time-grid generation.
//!
//! Transient light curves span several decades in time, so model evaluation and
//! simulation grids are logarithmically spaced. Grid generation is deterministic
//! given the same inputs.

use crate::error::AppError;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(AppError::input(format!(
            "Invalid grid range: min={min}, max={max} (must be finite, >0, and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::input("Grid steps must be >= 2."));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_endpoints_and_monotonic() {
        let grid = log_space(1.0, 100.0, 11).unwrap();
        assert_eq!(grid.len(), 11);
        assert!((grid[0] - 1.0).abs() < 1e-12);
        assert!((grid[10] - 100.0).abs() < 1e-9);
        for w in grid.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn log_space_rejects_bad_ranges() {
        assert!(log_space(0.0, 10.0, 5).is_err());
        assert!(log_space(10.0, 1.0, 5).is_err());
        assert!(log_space(1.0, 10.0, 1).is_err());
    }
}
