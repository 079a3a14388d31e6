//! Monster entity and spawning.
//!
//! A single monster type tagged with its behaviour; the per-kind movement policy
//! lives in `systems::monster_ai`.

use log::warn;
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::config::GameSettings;
use crate::game::grid::Grid;
use crate::game::types::{EntityId, MonsterKind, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: EntityId,
    pub kind: MonsterKind,
    pub pos: Position,
    /// Milliseconds between two moves.
    pub cadence_ms: u64,
    pub next_move_at: u64,
    pub paused_until: Option<u64>,
}

impl Monster {
    pub fn new(
        id: EntityId,
        kind: MonsterKind,
        pos: Position,
        now: u64,
        settings: &GameSettings,
    ) -> Self {
        let cadence_ms = match kind {
            MonsterKind::Wanderer => settings.wanderer_cadence_ms,
            MonsterKind::WallPhaser => settings.wall_phaser_cadence_ms,
            MonsterKind::Pathfinder => settings.pathfinder_cadence_ms,
            MonsterKind::Decisive => settings.decisive_cadence_ms,
        };
        Self {
            id,
            kind,
            pos,
            cadence_ms,
            next_move_at: now + cadence_ms,
            paused_until: None,
        }
    }

    /// Suspend movement until `until`. Only pursuing kinds can be paused.
    pub fn pause(&mut self, until: u64) -> bool {
        if !self.kind.pursues() {
            return false;
        }
        self.paused_until = Some(self.paused_until.map_or(until, |current| current.max(until)));
        true
    }

    /// Whether the monster may move at `now`. Clears an elapsed pause.
    pub fn ready(&mut self, now: u64) -> bool {
        if let Some(until) = self.paused_until {
            if now > until {
                self.paused_until = None;
            } else {
                return false;
            }
        }
        now >= self.next_move_at
    }

    pub fn moved(&mut self, now: u64) {
        self.next_move_at = now + self.cadence_ms;
    }
}

/// Pick a random floor tile not in `occupied` for each requested kind.
pub fn spawn_monsters<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &[Position],
    kinds: &[MonsterKind],
    first_id: EntityId,
    now: u64,
    settings: &GameSettings,
    rng: &mut R,
) -> Vec<Monster> {
    let mut taken: Vec<Position> = occupied.to_vec();
    let mut monsters = Vec::with_capacity(kinds.len());

    for (offset, kind) in kinds.iter().enumerate() {
        let Some(pos) = grid
            .floor_positions()
            .into_iter()
            .filter(|pos| !taken.contains(pos))
            .choose(rng)
        else {
            warn!("[Monster] No free tile to place a {:?}", kind);
            break;
        };
        taken.push(pos);
        monsters.push(Monster::new(first_id + offset as EntityId, *kind, pos, now, settings));
    }
    monsters
}
