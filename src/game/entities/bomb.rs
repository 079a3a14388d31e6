//! Bomb entity.
//!
//! A bomb is `Armed` until its fuse runs out, a blast reaches it, or its owner
//! fires a detonator; it is then `Exploding` for the duration of one explode
//! pass and removed from the registry at the end of it.

use serde::{Deserialize, Serialize};

use crate::game::types::{EntityId, PlayerId, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: EntityId,
    pub owner: PlayerId,
    pub pos: Position,
    pub blast_range: u32,
    /// Absolute time (ms) at which the fuse runs out.
    pub explode_at: u64,
    /// Set once, never cleared.
    pub is_exploding: bool,
}

impl Bomb {
    pub fn new(
        id: EntityId,
        owner: PlayerId,
        pos: Position,
        blast_range: u32,
        explode_at: u64,
    ) -> Self {
        Self {
            id,
            owner,
            pos,
            blast_range,
            explode_at,
            is_exploding: false,
        }
    }

    pub fn fuse_expired(&self, now: u64) -> bool {
        !self.is_exploding && now >= self.explode_at
    }
}
