//! Live entity collections.
//!
//! Ordered maps keep iteration deterministic. Systems that remove entities while
//! scanning take an id snapshot first (`*_ids`) and re-check each id on use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::entities::{ActiveExplosion, Bomb, ExplosionCell, Monster, Player, PowerUp};
use crate::game::types::{EntityId, PlayerId, Position};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    next_id: EntityId,
    pub players: BTreeMap<PlayerId, Player>,
    pub monsters: BTreeMap<EntityId, Monster>,
    pub bombs: BTreeMap<EntityId, Bomb>,
    pub power_ups: BTreeMap<EntityId, PowerUp>,
    /// Explosion cells waiting for their activation delay.
    pub pending_cells: Vec<ExplosionCell>,
    pub explosions: Vec<ActiveExplosion>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Reserve `count` consecutive ids and return the first one.
    pub fn reserve_ids(&mut self, count: usize) -> EntityId {
        let first = self.next_id.max(1);
        self.next_id = first + count as EntityId;
        first
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn add_monster(&mut self, monster: Monster) {
        self.monsters.insert(monster.id, monster);
    }

    pub fn add_bomb(&mut self, bomb: Bomb) {
        self.bombs.insert(bomb.id, bomb);
    }

    pub fn add_power_up(&mut self, power_up: PowerUp) {
        self.power_ups.insert(power_up.id, power_up);
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.values().filter(|p| p.is_alive)
    }

    pub fn alive_player_ids(&self) -> Vec<PlayerId> {
        self.alive_players().map(|p| p.id).collect()
    }

    pub fn alive_player_at(&self, pos: Position) -> Option<PlayerId> {
        self.alive_players().find(|p| p.pos == pos).map(|p| p.id)
    }

    pub fn alive_players_at(&self, pos: Position) -> Vec<PlayerId> {
        self.alive_players().filter(|p| p.pos == pos).map(|p| p.id).collect()
    }

    pub fn monster_ids(&self) -> Vec<EntityId> {
        self.monsters.keys().copied().collect()
    }

    pub fn monsters_at(&self, pos: Position) -> Vec<EntityId> {
        self.monsters.values().filter(|m| m.pos == pos).map(|m| m.id).collect()
    }

    pub fn has_monster_at(&self, pos: Position) -> bool {
        self.monsters.values().any(|m| m.pos == pos)
    }

    pub fn bomb_ids(&self) -> Vec<EntityId> {
        self.bombs.keys().copied().collect()
    }

    pub fn bombs_at(&self, pos: Position) -> Vec<EntityId> {
        self.bombs.values().filter(|b| b.pos == pos).map(|b| b.id).collect()
    }

    pub fn power_up_at(&self, pos: Position) -> Option<EntityId> {
        self.power_ups.values().find(|p| p.pos == pos).map(|p| p.id)
    }

    pub fn has_explosion_at(&self, pos: Position) -> bool {
        self.explosions.iter().any(|e| e.pos == pos)
    }
}
