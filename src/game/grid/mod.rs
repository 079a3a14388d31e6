//! Arena grid module: tile layout, bomb occupancy and map loading.

pub mod grid;

pub use grid::*;
