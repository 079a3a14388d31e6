//! Bomb arena simulation core.
//!
//! A tile grid, the entities living on it (players, bombs, monsters,
//! power-ups, explosions) and a tick coordinator that advances all of them
//! from a single execution context.

pub mod config;
pub mod game;
pub mod session;
