//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration enums (`DataMode`, `TruncateMethod`, `OutputFormat`, ...)
//! - observation point types (`LightCurvePoint`, `AsymmetricError`)
//! - model parameter structs (`MetzgerTdeParams`, `TdeAnalyticalParams`, ...)
//! - run configurations and exported curve schemas

pub mod types;

pub use types::*;
