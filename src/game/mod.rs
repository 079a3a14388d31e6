pub mod types;
pub mod grid;
pub mod entities;
pub mod registry;
pub mod systems;
pub mod state;
pub mod demo;

pub use state::{GameSnapshot, GameState};
pub use types::*;
