//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - dispatches to the pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, LightCurveArgs, SimulateArgs, TdeArgs};
use crate::domain::{
    DiffusionParams, LightCurveRunConfig, MetzgerTdeParams, SimulateRunConfig,
    TdeAnalyticalParams, TdeRunConfig,
};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `transient` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Lightcurve(args) => handle_lightcurve(args),
        Command::Tde(args) => handle_tde(args),
        Command::Simulate(args) => handle_simulate(args),
    }
}

fn handle_lightcurve(args: LightCurveArgs) -> Result<(), AppError> {
    let config = lightcurve_config_from_args(&args);
    let run = pipeline::run_lightcurve(&config)?;

    println!(
        "{}",
        crate::report::format_light_curve_summary(&run.afterglow, &run.ingest, run.truncated)
    );

    if let Some(path) = &config.export {
        crate::io::export::write_light_curve_csv(path, &run.afterglow)?;
    }

    Ok(())
}

fn handle_tde(args: TdeArgs) -> Result<(), AppError> {
    let config = tde_config_from_args(&args);
    let run = pipeline::run_tde(&config)?;

    println!(
        "{}",
        crate::report::format_model_summary(&config, &run.time_days, &run.y)
    );

    if let Some(path) = &config.export_csv {
        crate::io::export::write_model_curve_csv(
            path,
            &run.time_days,
            &run.y,
            config.output_format,
        )?;
    }
    if let Some(path) = &config.export_json {
        crate::io::curve::write_curve_json(path, &config, run.time_days, run.y)?;
    }

    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = SimulateRunConfig {
        tde: tde_config_from_args(&args.tde),
        noise_frac: args.noise_frac,
        seed: args.seed,
        output: args.output.clone(),
    };
    let run = pipeline::run_simulate(&config)?;

    println!(
        "{}",
        crate::report::format_model_summary(&config.tde, &run.observations.time_days, &run.observations.y_obs)
    );
    println!("Wrote {} synthetic points to {}", run.observations.time_days.len(), config.output.display());

    Ok(())
}

pub fn lightcurve_config_from_args(args: &LightCurveArgs) -> LightCurveRunConfig {
    LightCurveRunConfig {
        csv_path: args.csv.clone(),
        event_table: args.event_table.clone(),
        name: args.name.clone(),
        burst_class: args.class,
        data_mode: args.data_mode,
        truncate: args.truncate,
        truncate_method: args.truncate_method,
        to_luminosity: args.to_luminosity,
        dl_mpc: args.dl,
        export: args.export.clone(),
    }
}

pub fn tde_config_from_args(args: &TdeArgs) -> TdeRunConfig {
    let diffusion = args.diffusion.then_some(DiffusionParams {
        kappa: args.kappa,
        kappa_gamma: args.kappa_gamma,
        mej: args.mej,
        vej: args.vej,
    });

    let mut analytical = TdeAnalyticalParams::new(args.l0, args.t0);
    analytical.vej = args.vej;
    analytical.temperature_floor = args.temperature_floor;
    analytical.cutoff_wavelength = args.cutoff_wavelength;
    analytical.diffusion = diffusion;

    TdeRunConfig {
        kind: args.model,
        metzger: MetzgerTdeParams::new(args.mbh6, args.mstar, args.eta, args.alpha, args.beta),
        analytical,
        redshift: args.redshift,
        dl_mpc: args.dl,
        frequency: args.frequency,
        output_format: args.format,
        time_start: args.time_start,
        time_end: args.time_end,
        time_steps: args.time_steps,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    }
}
