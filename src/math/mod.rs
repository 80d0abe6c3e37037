//! Numerical utilities: grids, interpolation, and quadrature.

pub mod grid;
pub mod integrate;
pub mod interp;

pub use grid::*;
pub use integrate::*;
pub use interp::*;
