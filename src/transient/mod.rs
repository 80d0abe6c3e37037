//! Observed-transient data containers.
//!
//! - `afterglow`: GRB afterglow light curves (flux, flux density, luminosity)
//!   with truncation and flux-to-luminosity conversion
//! - `prompt`: binned prompt-emission count series

pub mod afterglow;
pub mod prompt;

pub use afterglow::*;
pub use prompt::*;
