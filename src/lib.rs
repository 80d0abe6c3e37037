//! `transient-curves` library crate.
//!
//! Utilities for modeling astrophysical transients: GRB afterglow and prompt
//! emission data containers, plus semi-analytical light-curve models (tidal
//! disruption events) that map to observable flux density / AB magnitude.
//!
//! The binary (`transient`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - model functions are callable from external samplers/notebooks
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod constants;
pub mod cosmology;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod radiation;
pub mod report;
pub mod transient;
