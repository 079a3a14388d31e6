//! Game entities module.
//!
//! This module organizes player, bomb, monster, power-up and explosion entities.

pub mod bomb;
pub mod explosion;
pub mod monster;
pub mod player;
pub mod power_up;

pub use bomb::*;
pub use explosion::*;
pub use monster::*;
pub use player::*;
pub use power_up::*;
