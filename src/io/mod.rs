//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - light-curve and model-curve CSV exports (`export`)
//! - model-curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
