//! Export light curves and model curves to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! fitting scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::OutputFormat;
use crate::error::AppError;
use crate::transient::Afterglow;

/// Write a (possibly truncated/converted) afterglow light curve to CSV.
///
/// The value column is named after the container's data mode so a re-ingest
/// round-trips without extra flags.
pub fn write_light_curve_csv(path: &Path, afterglow: &Afterglow) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    let y_column = afterglow.data_mode().y_column();
    writeln!(
        file,
        "time,time_err_plus,time_err_minus,{y_column},y_err_plus,y_err_minus"
    )
    .map_err(|e| AppError::input(format!("Failed to write CSV header: {e}")))?;

    for p in afterglow.points() {
        writeln!(
            file,
            "{:.10e},{:.10e},{:.10e},{:.10e},{:.10e},{:.10e}",
            p.time, p.time_err.plus, p.time_err.minus, p.y, p.y_err.plus, p.y_err.minus
        )
        .map_err(|e| AppError::input(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

/// Write an evaluated model curve to CSV.
pub fn write_model_curve_csv(
    path: &Path,
    time_days: &[f64],
    y: &[f64],
    output_format: OutputFormat,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    let y_column = match output_format {
        OutputFormat::FluxDensity => "flux_density_mjy",
        OutputFormat::Magnitude => "magnitude",
    };
    writeln!(file, "time_days,{y_column}")
        .map_err(|e| AppError::input(format!("Failed to write CSV header: {e}")))?;

    for (t, v) in time_days.iter().zip(y) {
        writeln!(file, "{t:.10e},{v:.10e}")
            .map_err(|e| AppError::input(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

/// Write synthetic observations (true curve + noisy realization) to CSV.
pub fn write_synthetic_csv(
    path: &Path,
    observations: &crate::data::SyntheticObservations,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "time_days,y_true,y_obs,y_err")
        .map_err(|e| AppError::input(format!("Failed to write CSV header: {e}")))?;

    for i in 0..observations.time_days.len() {
        writeln!(
            file,
            "{:.10e},{:.10e},{:.10e},{:.10e}",
            observations.time_days[i],
            observations.y_true[i],
            observations.y_obs[i],
            observations.y_err[i]
        )
        .map_err(|e| AppError::input(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AsymmetricError, BurstClass, DataMode, EventMeta, LightCurvePoint};
    use crate::io::load_light_curve;

    #[test]
    fn light_curve_csv_round_trips() {
        let points = vec![
            LightCurvePoint {
                time: 120.0,
                time_err: AsymmetricError::new(1.0, 2.0),
                y: 3.0e-12,
                y_err: AsymmetricError::new(1.0e-13, 1.0e-13),
            },
            LightCurvePoint {
                time: 480.0,
                time_err: AsymmetricError::new(4.0, 4.0),
                y: 9.0e-13,
                y_err: AsymmetricError::new(5.0e-14, 5.0e-14),
            },
        ];
        let ag = Afterglow::new(
            "test",
            BurstClass::Sgrb,
            DataMode::Flux,
            points.clone(),
            EventMeta::default(),
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lc.csv");
        write_light_curve_csv(&path, &ag).unwrap();

        let back = load_light_curve(&path, DataMode::Flux).unwrap();
        assert_eq!(back.rows_used, 2);
        for (a, b) in points.iter().zip(&back.points) {
            assert!((a.time - b.time).abs() < 1e-6);
            assert!((a.y - b.y).abs() / a.y < 1e-9);
            assert!((a.time_err.minus - b.time_err.minus).abs() < 1e-6);
        }
    }

    #[test]
    fn model_curve_csv_has_format_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.csv");
        write_model_curve_csv(&path, &[1.0, 2.0], &[20.5, 21.0], OutputFormat::Magnitude)
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("time_days,magnitude"));
        assert_eq!(contents.lines().count(), 3);
    }
}
