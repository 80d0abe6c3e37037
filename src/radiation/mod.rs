//! Radiative-transfer approximations.
//!
//! Everything that turns a bolometric engine luminosity into an observable:
//!
//! - k-correction of observer-frame times/frequencies (`kcorrect`)
//! - blackbody photosphere spectra, with and without a UV cutoff (`sed`)
//! - photosphere radius/temperature evolution (`photosphere`)
//! - the diffusion interaction process (`diffusion`)

pub mod diffusion;
pub mod photosphere;
pub mod sed;

pub use diffusion::*;
pub use photosphere::*;
pub use sed::*;
