//! Physical light-curve models.
//!
//! Models are split into bolometric *engines* (`fallback`) and observable
//! mappings (`tde`), so that external samplers can fit either luminosity data
//! or flux/magnitude data with the same machinery. `prompt` holds pulse-shape
//! models for prompt-emission count series.

pub mod fallback;
pub mod prompt;
pub mod tde;

pub use fallback::*;
pub use prompt::*;
pub use tde::*;
