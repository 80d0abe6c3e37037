//! Physical constants in cgs units.
//!
//! One canonical home for every constant the models touch, so model code never
//! carries bare magic numbers for physics.

/// Newton's gravitational constant [cm^3 g^-1 s^-2].
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-8;

/// Speed of light [cm s^-1].
pub const SPEED_OF_LIGHT: f64 = 2.99792458e10;

/// Solar mass [g].
pub const SOLAR_MASS: f64 = 1.989e33;

/// Solar radius [cm].
pub const SOLAR_RADIUS: f64 = 6.957e10;

/// Stefan-Boltzmann constant [erg cm^-2 s^-1 K^-4].
pub const SIGMA_SB: f64 = 5.6704e-5;

/// Planck constant [erg s].
pub const PLANCK: f64 = 6.62607015e-27;

/// Boltzmann constant [erg K^-1].
pub const BOLTZMANN: f64 = 1.380649e-16;

/// Seconds per day.
pub const DAY_TO_S: f64 = 86400.0;

/// Centimeters per kilometer.
pub const KM_TO_CM: f64 = 1.0e5;

/// Centimeters per megaparsec.
pub const MPC_TO_CM: f64 = 3.085677581e24;

/// One millijansky [erg s^-1 cm^-2 Hz^-1].
pub const MJY: f64 = 1.0e-26;

/// Centimeters per Angstrom.
pub const ANGSTROM_TO_CM: f64 = 1.0e-8;

/// AB magnitude of a 1 mJy source: `-2.5 log10(1 mJy / 3631 Jy)`.
pub const AB_ZEROPOINT_MJY: f64 = 16.4;
