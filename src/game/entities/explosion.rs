//! Explosion records.
//!
//! A detonating bomb emits [`ExplosionCell`]s staggered by distance; the tick
//! coordinator turns each into an [`ActiveExplosion`] once its delay has elapsed.

use serde::{Deserialize, Serialize};

use crate::game::types::Position;

/// A tile scheduled to ignite `activation_delay_ms` after `emitted_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionCell {
    pub pos: Position,
    pub activation_delay_ms: u64,
    pub emitted_at: u64,
}

impl ExplosionCell {
    pub fn activates_at(&self) -> u64 {
        self.emitted_at + self.activation_delay_ms
    }
}

/// A visible, time-boxed explosion on one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveExplosion {
    pub pos: Position,
    pub started_at: u64,
    pub expires_at: u64,
}

impl ActiveExplosion {
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }
}
