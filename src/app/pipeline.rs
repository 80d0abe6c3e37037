//! Shared pipeline logic behind the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflows:
//! - lightcurve: ingest -> metadata -> container -> truncate -> convert
//! - tde: grid -> model evaluation
//! - simulate: tde + noisy realization
//!
//! The CLI front-end then focuses on presentation and exports.

use log::warn;

use crate::cosmology::FixedDistance;
use crate::data::{synthesize, SyntheticObservations};
use crate::domain::{LightCurveRunConfig, SimulateRunConfig, TdeModelKind, TdeRunConfig};
use crate::error::AppError;
use crate::io::ingest::{load_event_meta, load_light_curve, IngestedLightCurve};
use crate::math::log_space;
use crate::models::{metzger_tde, tde_analytical};
use crate::transient::Afterglow;

/// All computed outputs of a `transient lightcurve` run.
#[derive(Debug, Clone)]
pub struct LightCurveRun {
    pub afterglow: Afterglow,
    pub ingest: IngestedLightCurve,
    /// Number of points removed by truncation, if truncation ran.
    pub truncated: Option<usize>,
}

/// All computed outputs of a `transient tde` run.
#[derive(Debug, Clone)]
pub struct TdeRun {
    pub time_days: Vec<f64>,
    pub y: Vec<f64>,
}

/// All computed outputs of a `transient simulate` run.
#[derive(Debug, Clone)]
pub struct SimulateRun {
    pub observations: SyntheticObservations,
}

/// Load, truncate, and convert one afterglow light curve.
pub fn run_lightcurve(config: &LightCurveRunConfig) -> Result<LightCurveRun, AppError> {
    let ingest = load_light_curve(&config.csv_path, config.data_mode)?;
    for e in &ingest.row_errors {
        warn!("{} line {}: {}", config.csv_path.display(), e.line, e.message);
    }

    let meta = match &config.event_table {
        Some(table) => load_event_meta(table, &config.name)?,
        None => Default::default(),
    };

    let mut afterglow = Afterglow::new(
        config.name.clone(),
        config.burst_class,
        config.data_mode,
        ingest.points.clone(),
        meta,
    )?;

    let truncated = if config.truncate {
        Some(afterglow.truncate(config.truncate_method))
    } else {
        None
    };

    if config.to_luminosity {
        let dl_mpc = config.dl_mpc.ok_or_else(|| {
            AppError::input("--to-luminosity needs a luminosity distance (--dl).")
        })?;
        let cosmology = FixedDistance::from_mpc(dl_mpc)?;
        afterglow.analytical_flux_to_luminosity(&cosmology)?;
    }

    Ok(LightCurveRun {
        afterglow,
        ingest,
        truncated,
    })
}

/// Evaluate the configured TDE model on its log-spaced observer-frame grid.
pub fn run_tde(config: &TdeRunConfig) -> Result<TdeRun, AppError> {
    let time_days = log_space(config.time_start, config.time_end, config.time_steps)?;
    let cosmology = FixedDistance::from_mpc(config.dl_mpc)?;

    let y = match config.kind {
        TdeModelKind::Metzger => metzger_tde(
            &time_days,
            config.redshift,
            &config.metzger,
            config.frequency,
            config.output_format,
            &cosmology,
        )?,
        TdeModelKind::Analytical => tde_analytical(
            &time_days,
            config.redshift,
            &config.analytical,
            config.frequency,
            config.output_format,
            &cosmology,
        )?,
    };

    Ok(TdeRun { time_days, y })
}

/// Evaluate the configured TDE model and write a noisy realization.
pub fn run_simulate(config: &SimulateRunConfig) -> Result<SimulateRun, AppError> {
    let model = run_tde(&config.tde)?;
    let observations = synthesize(&model.time_days, &model.y, config.noise_frac, config.seed)?;
    crate::io::export::write_synthetic_csv(&config.output, &observations)?;
    Ok(SimulateRun { observations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MetzgerTdeParams, OutputFormat, TdeAnalyticalParams,
    };

    fn tde_config(kind: TdeModelKind) -> TdeRunConfig {
        TdeRunConfig {
            kind,
            metzger: MetzgerTdeParams::new(1.0, 1.0, 0.05, 0.1, 1.0),
            analytical: TdeAnalyticalParams::new(1.0e52, 1.0),
            redshift: 0.05,
            dl_mpc: 230.0,
            frequency: 6.3e14,
            output_format: OutputFormat::FluxDensity,
            time_start: 80.0,
            time_end: 400.0,
            time_steps: 30,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn tde_pipeline_evaluates_both_models() {
        let metzger = run_tde(&tde_config(TdeModelKind::Metzger)).unwrap();
        assert_eq!(metzger.time_days.len(), 30);
        assert!(metzger.y.iter().all(|v| v.is_finite() && *v > 0.0));

        let mut config = tde_config(TdeModelKind::Analytical);
        config.time_start = 2.0;
        config.time_end = 100.0;
        let analytical = run_tde(&config).unwrap();
        assert!(analytical.y.iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn simulate_pipeline_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sim.csv");
        let config = SimulateRunConfig {
            tde: tde_config(TdeModelKind::Metzger),
            noise_frac: 0.1,
            seed: 42,
            output: output.clone(),
        };
        let run = run_simulate(&config).unwrap();
        assert_eq!(run.observations.y_obs.len(), 30);

        let contents = std::fs::read_to_string(&output).unwrap();
        assert!(contents.starts_with("time_days,y_true,y_obs,y_err"));
        assert_eq!(contents.lines().count(), 31);
    }

    #[test]
    fn lightcurve_pipeline_truncates_and_converts() {
        use std::io::Write;
        let mut csv = tempfile::NamedTempFile::new().unwrap();
        write!(
            csv,
            "time,time_err_plus,flux_erg_cm2_s,y_err\n\
             0.5,0.01,5.0e-10,1.0e-11\n\
             90.0,1.0,2.0e-12,1.0e-13\n\
             300.0,5.0,8.0e-13,1.0e-13\n"
        )
        .unwrap();

        let config = LightCurveRunConfig {
            csv_path: csv.path().to_path_buf(),
            event_table: None,
            name: "050509B".to_string(),
            burst_class: crate::domain::BurstClass::Sgrb,
            data_mode: crate::domain::DataMode::Flux,
            truncate: true,
            truncate_method: crate::domain::TruncateMethod::PromptTimeError,
            to_luminosity: true,
            dl_mpc: Some(1000.0),
            export: None,
        };

        let run = run_lightcurve(&config).unwrap();
        assert_eq!(run.truncated, Some(1));
        assert_eq!(run.afterglow.len(), 2);
        assert_eq!(run.afterglow.data_mode(), crate::domain::DataMode::Luminosity);
        assert!(run.afterglow.values().iter().all(|v| *v > 0.0));
    }
}
