//! Messages exchanged between the simulation and its input/presentation layers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::types::{Direction, PlayerId};

/// Discrete per-player action translated from raw input by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Move(Direction),
    PlaceBomb,
    /// Fire every bomb the player owns; needs a detonator charge.
    Detonate,
    /// Put an obstacle on the neighbouring tile in this direction.
    PlaceObstacle(Direction),
}

/// A command addressed to one player, as sent over a text channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub player: PlayerId,
    pub command: PlayerCommand,
}

/// Emitted once per session when the game reaches a terminal condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEnded {
    pub game_id: Uuid,
    pub winners: Vec<PlayerId>,
}
