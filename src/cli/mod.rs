//! Command-line parsing for the transient toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the physics/container code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{BurstClass, DataMode, OutputFormat, TdeModelKind, TruncateMethod};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "transient", version, about = "GRB/TDE light-curve toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a GRB afterglow light curve, truncate/convert it, and summarize.
    Lightcurve(LightCurveArgs),
    /// Evaluate a TDE model on a log-spaced time grid.
    Tde(TdeArgs),
    /// Evaluate a TDE model and write a noisy synthetic realization.
    Simulate(SimulateArgs),
}

/// Options for loading and processing one afterglow light curve.
#[derive(Debug, Parser, Clone)]
pub struct LightCurveArgs {
    /// Light-curve CSV file.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Event name (with or without the GRB prefix).
    #[arg(short = 'n', long)]
    pub name: String,

    /// Burst duration class.
    #[arg(long, value_enum, default_value_t = BurstClass::Sgrb)]
    pub class: BurstClass,

    /// Representation of the value column.
    #[arg(long, value_enum, default_value_t = DataMode::Flux)]
    pub data_mode: DataMode,

    /// Burst-table CSV with per-event redshift/photon-index/T90.
    #[arg(long, value_name = "CSV")]
    pub event_table: Option<PathBuf>,

    /// Truncate the prompt-contaminated early light curve.
    #[arg(long)]
    pub truncate: bool,

    /// Truncation method.
    #[arg(long, value_enum, default_value_t = TruncateMethod::PromptTimeError)]
    pub truncate_method: TruncateMethod,

    /// Convert flux to luminosity (requires flux data).
    #[arg(long)]
    pub to_luminosity: bool,

    /// Luminosity distance [Mpc] for the conversion.
    #[arg(long, value_name = "MPC")]
    pub dl: Option<f64>,

    /// Export the processed light curve to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for evaluating a TDE model.
#[derive(Debug, Parser, Clone)]
pub struct TdeArgs {
    /// Which TDE model to evaluate.
    #[arg(long, value_enum, default_value_t = TdeModelKind::Metzger)]
    pub model: TdeModelKind,

    /// Source redshift.
    #[arg(short = 'z', long, default_value_t = 0.05)]
    pub redshift: f64,

    /// Luminosity distance [Mpc] (resolved externally, e.g. from a cosmology
    /// calculator).
    #[arg(long, value_name = "MPC", default_value_t = 230.0)]
    pub dl: f64,

    /// Observer-frame frequency [Hz].
    #[arg(long, default_value_t = 6.3e14)]
    pub frequency: f64,

    /// Observable to produce.
    #[arg(long, value_enum, default_value_t = OutputFormat::FluxDensity)]
    pub format: OutputFormat,

    /// Start of the observer-frame time grid [days].
    #[arg(long, default_value_t = 80.0)]
    pub time_start: f64,

    /// End of the observer-frame time grid [days].
    #[arg(long, default_value_t = 500.0)]
    pub time_end: f64,

    /// Number of (log-spaced) grid points.
    #[arg(long, default_value_t = 100)]
    pub time_steps: usize,

    /// SMBH mass [1e6 solar masses] (metzger).
    #[arg(long, default_value_t = 1.0)]
    pub mbh6: f64,

    /// Disrupted stellar mass [solar masses] (metzger).
    #[arg(long, default_value_t = 1.0)]
    pub mstar: f64,

    /// SMBH feedback efficiency (metzger).
    #[arg(long, default_value_t = 0.05)]
    pub eta: f64,

    /// Disk viscosity parameter (metzger).
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Penetration factor (metzger).
    #[arg(long, default_value_t = 1.0)]
    pub beta: f64,

    /// Bolometric luminosity scale [erg/s] (analytical).
    #[arg(long, default_value_t = 1.0e52)]
    pub l0: f64,

    /// Turn-on time [days] (analytical).
    #[arg(long, default_value_t = 1.0)]
    pub t0: f64,

    /// Photosphere velocity [km/s] (analytical).
    #[arg(long, default_value_t = 1.0e4)]
    pub vej: f64,

    /// Photosphere temperature floor [K] (analytical).
    #[arg(long, default_value_t = 1.0e3)]
    pub temperature_floor: f64,

    /// SED cutoff wavelength [Angstrom] (analytical).
    #[arg(long, default_value_t = 3000.0)]
    pub cutoff_wavelength: f64,

    /// Apply the diffusion interaction process (analytical).
    #[arg(long)]
    pub diffusion: bool,

    /// Optical opacity [cm^2/g] (diffusion).
    #[arg(long, default_value_t = 0.2)]
    pub kappa: f64,

    /// Gamma-ray opacity [cm^2/g] (diffusion).
    #[arg(long, default_value_t = 1.0e4)]
    pub kappa_gamma: f64,

    /// Ejecta mass [solar masses] (diffusion).
    #[arg(long, default_value_t = 1.0)]
    pub mej: f64,

    /// Export the model curve to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Export the model curve (setup + params + grid) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for synthetic observation generation.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub tde: TdeArgs,

    /// Fractional Gaussian noise level.
    #[arg(long, default_value_t = 0.1)]
    pub noise_frac: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV for the synthetic observations.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,
}
