//! Power-up entity.

use serde::{Deserialize, Serialize};

use crate::game::types::{EntityId, Position, PowerUpKind};

/// A collectible lying on a floor tile. Applied once, then removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub pos: Position,
}
