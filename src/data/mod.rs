//! Synthetic observation generation.

pub mod sim;

pub use sim::*;
