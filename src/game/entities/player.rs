//! Player entity logic.
//!
//! The player is a passive data holder for the engines, but it owns its
//! time-boxed status effects and its bomb and obstacle budgets.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::GameSettings;
use crate::game::grid::Grid;
use crate::game::types::{EntityId, PlayerId, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Position,
    pub bomb_capacity: u32,
    /// Bombs placed by this player that have not resolved yet.
    pub bombs: Vec<EntityId>,
    pub blast_range: u32,
    pub obstacle_capacity: u32,
    pub active_obstacles: u32,
    pub has_detonator: bool,
    pub ghost_until: Option<u64>,
    pub invincible_until: Option<u64>,
    pub kills: u32,
    pub is_alive: bool,
}

/// Status transitions reported by [`Player::expire_effects`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiredEffects {
    pub ghost: bool,
    pub invincibility: bool,
}

impl Player {
    pub fn new(id: PlayerId, pos: Position, settings: &GameSettings) -> Self {
        Self {
            id,
            pos,
            bomb_capacity: settings.starting_bomb_capacity,
            bombs: Vec::new(),
            blast_range: settings.starting_blast_range,
            obstacle_capacity: 0,
            active_obstacles: 0,
            has_detonator: false,
            ghost_until: None,
            invincible_until: None,
            kills: 0,
            is_alive: true,
        }
    }

    pub fn active_bombs(&self) -> u32 {
        self.bombs.len() as u32
    }

    pub fn is_ghost(&self) -> bool {
        self.ghost_until.is_some()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    /// Ghosts cannot place bombs.
    pub fn can_place_bomb(&self) -> bool {
        self.is_alive && self.active_bombs() < self.bomb_capacity && !self.is_ghost()
    }

    pub fn placed_bomb(&mut self, bomb_id: EntityId) {
        self.bombs.push(bomb_id);
    }

    /// Called once a bomb placed by this player has exploded.
    pub fn bomb_resolved(&mut self, bomb_id: EntityId) {
        self.bombs.retain(|id| *id != bomb_id);
    }

    pub fn can_place_obstacle(&self) -> bool {
        self.is_alive && self.active_obstacles < self.obstacle_capacity
    }

    pub fn placed_obstacle(&mut self) {
        self.active_obstacles += 1;
    }

    /// One of this player's obstacles was blown up.
    pub fn obstacle_cleared(&mut self) {
        self.active_obstacles = self.active_obstacles.saturating_sub(1);
    }

    pub fn activate_ghost_mode(&mut self, now: u64, duration_ms: u64) {
        self.ghost_until = Some(now + duration_ms);
    }

    pub fn activate_invincibility(&mut self, now: u64, duration_ms: u64) {
        self.invincible_until = Some(now + duration_ms);
    }

    /// Clear every effect whose expiry lies strictly before `now`.
    pub fn expire_effects(&mut self, now: u64) -> ExpiredEffects {
        let mut expired = ExpiredEffects::default();
        if self.ghost_until.is_some_and(|until| now > until) {
            self.ghost_until = None;
            expired.ghost = true;
        }
        if self.invincible_until.is_some_and(|until| now > until) {
            self.invincible_until = None;
            expired.invincibility = true;
        }
        expired
    }

    pub fn eliminate(&mut self) {
        self.is_alive = false;
    }
}

/// Spawn points for up to four players: the arena corners, starting top-left
/// and going bottom-right, bottom-left, top-right. A corner that is not floor
/// falls back to the first free floor tile in row-major order.
pub fn spawn_players(grid: &Grid, count: usize, settings: &GameSettings) -> Vec<Player> {
    let last_row = grid.height().saturating_sub(1);
    let last_col = grid.width().saturating_sub(1);
    let corners = [
        Position::new(0, 0),
        Position::new(last_row, last_col),
        Position::new(last_row, 0),
        Position::new(0, last_col),
    ];

    let mut players: Vec<Player> = Vec::with_capacity(count);
    for (index, corner) in corners.iter().take(count).enumerate() {
        let taken = |pos: &Position| players.iter().any(|p| p.pos == *pos);
        let spawn = if grid.is_floor(*corner) && !taken(corner) {
            Some(*corner)
        } else {
            grid.floor_positions().into_iter().find(|pos| !taken(pos))
        };

        match spawn {
            Some(pos) => players.push(Player::new((index + 1) as PlayerId, pos, settings)),
            None => warn!("[Player] No free tile to place player {}", index + 1),
        }
    }
    players
}
