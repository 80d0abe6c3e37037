//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by containers and model evaluators
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which representation the observed light curve is in.
///
/// Conversions are gated on this: flux→luminosity is only legal from `Flux`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    /// Isotropic-equivalent luminosity in units of 1e50 erg/s, rest-frame time.
    Luminosity,
    /// Integrated flux over the instrument band [erg/cm^2/s].
    Flux,
    /// Flux density at a specific frequency [mJy].
    FluxDensity,
    /// AB magnitude.
    Magnitude,
}

impl DataMode {
    /// Column name used for the value field in CSV exports.
    pub fn y_column(self) -> &'static str {
        match self {
            DataMode::Luminosity => "lum_1e50_erg_s",
            DataMode::Flux => "flux_erg_cm2_s",
            DataMode::FluxDensity => "flux_density_mjy",
            DataMode::Magnitude => "magnitude",
        }
    }

    /// Human-readable unit label for terminal output.
    pub fn y_unit_label(self) -> &'static str {
        match self {
            DataMode::Luminosity => "1e50 erg/s",
            DataMode::Flux => "erg/cm^2/s",
            DataMode::FluxDensity => "mJy",
            DataMode::Magnitude => "AB mag",
        }
    }
}

/// How to truncate the early (prompt-contaminated) part of an afterglow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TruncateMethod {
    /// Drop points whose positive temporal error exceeds 2.5 ms while t < 2 s.
    ///
    /// Prompt-emission points come from finely binned detections, so a small
    /// time error at early times flags them as prompt rather than afterglow.
    PromptTimeError,
    /// Drop everything before the brightest point.
    LeftOfMax,
    /// Keep the large-time-error tail plus the two preceding points.
    Default,
}

/// Observable to produce from a model evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Flux density in mJy.
    FluxDensity,
    /// AB magnitude.
    Magnitude,
}

impl OutputFormat {
    pub fn unit_label(self) -> &'static str {
        match self {
            OutputFormat::FluxDensity => "mJy",
            OutputFormat::Magnitude => "AB mag",
        }
    }
}

/// Burst duration class. The containers behave identically for both; the tag
/// exists so downstream consumers can keep populations separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BurstClass {
    Sgrb,
    Lgrb,
}

impl BurstClass {
    pub fn display_name(self) -> &'static str {
        match self {
            BurstClass::Sgrb => "SGRB",
            BurstClass::Lgrb => "LGRB",
        }
    }
}

/// Which TDE model to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TdeModelKind {
    /// Semi-analytical fallback/envelope model (Metzger 2022).
    Metzger,
    /// Analytic 5/3 fallback with diffusion + temperature-floor photosphere.
    Analytical,
}

impl TdeModelKind {
    pub fn display_name(self) -> &'static str {
        match self {
            TdeModelKind::Metzger => "metzger_tde",
            TdeModelKind::Analytical => "tde_analytical",
        }
    }
}

/// Asymmetric (plus/minus) measurement error.
///
/// Both components are stored as non-negative magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AsymmetricError {
    pub plus: f64,
    pub minus: f64,
}

impl AsymmetricError {
    pub fn new(plus: f64, minus: f64) -> Self {
        Self {
            plus: plus.abs(),
            minus: minus.abs(),
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            plus: self.plus * factor,
            minus: self.minus * factor,
        }
    }
}

/// One observed light-curve point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightCurvePoint {
    /// Time since trigger [s] (rest-frame after a luminosity conversion).
    pub time: f64,
    pub time_err: AsymmetricError,
    /// Value in the units implied by the container's `DataMode`.
    pub y: f64,
    pub y_err: AsymmetricError,
}

/// Event-level metadata from the burst table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    pub redshift: Option<f64>,
    /// BAT photon index Γ of the prompt spectrum.
    pub photon_index: Option<f64>,
    /// T90 duration [s].
    pub t90: Option<f64>,
}

/// Parameters of the semi-analytical Metzger TDE model.
///
/// The five leading fields are the sampled physical parameters; the rest are
/// auxiliary constants that rarely move in fits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetzgerTdeParams {
    /// SMBH mass in units of 1e6 solar masses.
    pub mbh_6: f64,
    /// Stellar mass in solar masses.
    pub stellar_mass: f64,
    /// SMBH feedback efficiency (typical range: eta_min .. 0.1).
    pub eta: f64,
    /// Disk viscosity parameter.
    pub alpha: f64,
    /// TDE penetration factor (typical range: 1 .. beta_max).
    pub beta: f64,

    /// Start time of the fallback grid in units of the fallback time.
    pub t0: f64,
    /// Binding-energy constant of the disrupted star.
    pub binding_energy_const: f64,
    /// Ratio of accretion-stream radius to initial virial radius.
    pub zeta: f64,
    /// Disk aspect ratio H/R.
    pub h_over_r: f64,
}

impl MetzgerTdeParams {
    /// Construct with the customary values for the auxiliary constants.
    pub fn new(mbh_6: f64, stellar_mass: f64, eta: f64, alpha: f64, beta: f64) -> Self {
        Self {
            mbh_6,
            stellar_mass,
            eta,
            alpha,
            beta,
            t0: 1.0,
            binding_energy_const: 0.8,
            zeta: 2.0,
            h_over_r: 0.3,
        }
    }
}

/// Ejecta/opacity parameters of the diffusion interaction process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffusionParams {
    /// Optical opacity [cm^2/g].
    pub kappa: f64,
    /// Gamma-ray opacity [cm^2/g].
    pub kappa_gamma: f64,
    /// Ejecta mass [solar masses].
    pub mej: f64,
    /// Ejecta velocity [km/s].
    pub vej: f64,
}

/// Parameters of the analytic TDE model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdeAnalyticalParams {
    /// Bolometric luminosity at 1 second [erg/s].
    pub l0: f64,
    /// Turn-on time [days]; after this the luminosity decays as t^(-5/3).
    pub t0: f64,
    /// Photosphere expansion velocity [km/s].
    pub vej: f64,
    /// Photosphere temperature floor [K].
    pub temperature_floor: f64,
    /// SED cutoff wavelength [Angstrom].
    pub cutoff_wavelength: f64,
    /// Optional diffusion interaction process applied to the raw engine
    /// luminosity. `None` leaves the engine output untouched.
    pub diffusion: Option<DiffusionParams>,
}

impl TdeAnalyticalParams {
    /// Construct with the customary photosphere/SED defaults.
    pub fn new(l0: f64, t0: f64) -> Self {
        Self {
            l0,
            t0,
            vej: 1.0e4,
            temperature_floor: 1.0e3,
            cutoff_wavelength: 3000.0,
            diffusion: None,
        }
    }
}

/// Run configuration for the `tde` subcommand.
#[derive(Debug, Clone)]
pub struct TdeRunConfig {
    pub kind: TdeModelKind,
    pub metzger: MetzgerTdeParams,
    pub analytical: TdeAnalyticalParams,

    pub redshift: f64,
    /// Luminosity distance [Mpc], resolved externally.
    pub dl_mpc: f64,
    /// Observer-frame frequency [Hz].
    pub frequency: f64,
    pub output_format: OutputFormat,

    /// Observer-frame evaluation grid [days], log-spaced.
    pub time_start: f64,
    pub time_end: f64,
    pub time_steps: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Run configuration for the `lightcurve` subcommand.
#[derive(Debug, Clone)]
pub struct LightCurveRunConfig {
    pub csv_path: PathBuf,
    pub event_table: Option<PathBuf>,
    pub name: String,
    pub burst_class: BurstClass,
    pub data_mode: DataMode,

    pub truncate: bool,
    pub truncate_method: TruncateMethod,

    /// Convert flux to luminosity after truncation.
    pub to_luminosity: bool,
    /// Luminosity distance [Mpc] used for the conversion.
    pub dl_mpc: Option<f64>,

    pub export: Option<PathBuf>,
}

/// Run configuration for the `simulate` subcommand.
#[derive(Debug, Clone)]
pub struct SimulateRunConfig {
    pub tde: TdeRunConfig,
    /// Fractional Gaussian noise level applied to the model curve.
    pub noise_frac: f64,
    pub seed: u64,
    pub output: PathBuf,
}

/// A saved model-curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub model: String,
    pub output_format: OutputFormat,
    pub frequency_hz: f64,
    pub redshift: f64,
    pub luminosity_distance_mpc: f64,
    pub parameters: serde_json::Value,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub time_days: Vec<f64>,
    pub y: Vec<f64>,
}
