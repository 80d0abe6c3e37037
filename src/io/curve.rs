//! Read/write model-curve JSON files.
//!
//! Curve JSON is the portable representation of an evaluated model:
//! - model kind + parameters
//! - observing setup (frequency, redshift, luminosity distance)
//! - the evaluated grid for quick plotting or comparison
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, CurveGrid, TdeModelKind, TdeRunConfig};
use crate::error::AppError;

/// Write a curve JSON file for an evaluated TDE model.
pub fn write_curve_json(
    path: &Path,
    config: &TdeRunConfig,
    time_days: Vec<f64>,
    y: Vec<f64>,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create curve JSON '{}': {e}",
            path.display()
        ))
    })?;

    let parameters = match config.kind {
        TdeModelKind::Metzger => serde_json::to_value(config.metzger),
        TdeModelKind::Analytical => serde_json::to_value(config.analytical),
    }
    .map_err(|e| AppError::input(format!("Failed to serialize parameters: {e}")))?;

    let curve = CurveFile {
        tool: "transient".to_string(),
        model: config.kind.display_name().to_string(),
        output_format: config.output_format,
        frequency_hz: config.frequency,
        redshift: config.redshift,
        luminosity_distance_mpc: config.dl_mpc,
        parameters,
        grid: CurveGrid { time_days, y },
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::input(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open curve JSON '{}': {e}",
            path.display()
        ))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}
