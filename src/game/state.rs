//! Game state and tick coordinator.
//!
//! `GameState` owns the grid, the entity registry, the rules and the random
//! source. One call to [`GameState::tick`] advances every entity once, in a
//! fixed order, from a single execution context.

use std::collections::VecDeque;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::GameSettings;
use crate::config::game::MAX_PLAYERS;
use crate::game::entities::{
    ActiveExplosion, Bomb, ExplosionCell, Monster, Player, PowerUp, spawn_monsters, spawn_players,
};
use crate::game::grid::Grid;
use crate::game::registry::Registry;
use crate::game::systems::{
    advance_monsters, check_game_end, collect_power_ups, detonate, move_player, place_bomb,
    place_obstacle, resolve_monster_contacts, update_bombs, update_explosions,
    update_player_status,
};
use crate::game::types::{
    EntityId, GameOutcome, GameStatus, MonsterKind, PlayerId, Position, PowerUpKind, Tile,
};
use crate::session::messages::PlayerCommand;

#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub registry: Registry,
    pub settings: GameSettings,
    pub rng: StdRng,
    pub status: GameStatus,
    /// Number of completed ticks.
    pub turn: u64,
    /// Time (ms) of the latest tick.
    pub now: u64,
    commands: VecDeque<(PlayerId, PlayerCommand)>,
    starting_players: usize,
    outcome: Option<GameOutcome>,
}

/// Read-only view of the whole game for presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u64,
    pub now: u64,
    pub status: GameStatus,
    pub tiles: Vec<Vec<Tile>>,
    pub bomb_tiles: Vec<Position>,
    pub players: Vec<Player>,
    pub monsters: Vec<Monster>,
    pub bombs: Vec<Bomb>,
    pub power_ups: Vec<PowerUp>,
    pub pending_cells: Vec<ExplosionCell>,
    pub explosions: Vec<ActiveExplosion>,
    pub winners: Option<Vec<PlayerId>>,
}

impl GameState {
    /// New game on `grid`: players spawn in the corners and one monster of each
    /// kind spawns on a random free floor tile.
    pub fn new(grid: Grid, player_count: usize, settings: GameSettings, seed: u64) -> Self {
        let mut state = Self::empty(grid, settings, seed);

        for player in spawn_players(&state.grid, player_count.min(MAX_PLAYERS), &state.settings) {
            state.starting_players += 1;
            state.registry.add_player(player);
        }

        let occupied: Vec<Position> = state.registry.players.values().map(|p| p.pos).collect();
        let first_id = state.registry.reserve_ids(MonsterKind::ALL.len());
        let monsters = spawn_monsters(
            &state.grid,
            &occupied,
            &MonsterKind::ALL,
            first_id,
            0,
            &state.settings,
            &mut state.rng,
        );
        for monster in monsters {
            state.registry.add_monster(monster);
        }

        info!(
            "[GameState] New game {}x{} with {} player(s) and {} monster(s), seed={}",
            state.grid.height(),
            state.grid.width(),
            state.registry.players.len(),
            state.registry.monsters.len(),
            seed
        );
        state
    }

    /// Game on `grid` without any entity.
    pub fn empty(grid: Grid, settings: GameSettings, seed: u64) -> Self {
        Self {
            grid,
            registry: Registry::new(),
            settings,
            rng: StdRng::seed_from_u64(seed),
            status: GameStatus::Running,
            turn: 0,
            now: 0,
            commands: VecDeque::new(),
            starting_players: 0,
            outcome: None,
        }
    }

    /// Add a player with the next free id at `pos`. Returns `None` once the id
    /// space is exhausted.
    pub fn add_player(&mut self, pos: Position) -> Option<PlayerId> {
        let id = match self.registry.players.keys().max() {
            Some(max) => max.checked_add(1)?,
            None => 1,
        };
        self.registry.add_player(Player::new(id, pos, &self.settings));
        self.starting_players += 1;
        Some(id)
    }

    pub fn add_monster(&mut self, kind: MonsterKind, pos: Position) -> EntityId {
        let id = self.registry.next_id();
        self.registry.add_monster(Monster::new(id, kind, pos, self.now, &self.settings));
        id
    }

    /// Put an armed bomb on the grid on behalf of `owner`, bypassing the
    /// placement rules.
    pub fn add_bomb(
        &mut self,
        owner: PlayerId,
        pos: Position,
        blast_range: u32,
        explode_at: u64,
    ) -> EntityId {
        let id = self.registry.next_id();
        self.registry.add_bomb(Bomb::new(id, owner, pos, blast_range, explode_at));
        self.grid.mark_bomb(pos);
        if let Some(player) = self.registry.players.get_mut(&owner) {
            player.placed_bomb(id);
        }
        id
    }

    pub fn add_power_up(&mut self, kind: PowerUpKind, pos: Position) -> EntityId {
        let id = self.registry.next_id();
        self.registry.add_power_up(PowerUp { id, kind, pos });
        id
    }

    pub fn starting_players(&self) -> usize {
        self.starting_players
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_ended(&self) -> bool {
        self.status == GameStatus::Ended
    }

    /// Queue a command for the next tick. Returns false once the game has ended
    /// or for unknown or dead players.
    pub fn submit(&mut self, player_id: PlayerId, command: PlayerCommand) -> bool {
        let known = self.registry.players.get(&player_id).is_some_and(|p| p.is_alive);
        if self.is_ended() || !known {
            return false;
        }
        self.commands.push_back((player_id, command));
        true
    }

    /// Apply one command immediately. Invalid commands are ignored and reported
    /// as `false`.
    pub fn apply_player_action(
        &mut self,
        player_id: PlayerId,
        command: PlayerCommand,
        now: u64,
    ) -> bool {
        let applied = match command {
            PlayerCommand::Move(direction) => move_player(self, player_id, direction).is_some(),
            PlayerCommand::PlaceBomb => place_bomb(self, player_id, now).is_some(),
            PlayerCommand::Detonate => detonate(self, player_id, now),
            PlayerCommand::PlaceObstacle(direction) => place_obstacle(self, player_id, direction),
        };
        if !applied {
            debug!("[GameState] Ignored {:?} from player {}", command, player_id);
        }
        applied
    }

    /// Advance the simulation to `now` (ms since the session started).
    ///
    /// Order: queued commands, monsters, bomb fuses, explosion staging, player
    /// timers and collisions, terminal conditions. Returns the outcome on the
    /// tick that ends the game; later ticks are no-ops.
    pub fn tick(&mut self, now: u64) -> Option<GameOutcome> {
        if self.is_ended() {
            return None;
        }
        self.now = now;

        while let Some((player_id, command)) = self.commands.pop_front() {
            self.apply_player_action(player_id, command, now);
        }
        advance_monsters(self, now);
        update_bombs(self, now);
        update_explosions(self, now);
        update_player_status(self, now);
        collect_power_ups(self, now);
        resolve_monster_contacts(self);

        self.turn += 1;

        let outcome = check_game_end(self)?;
        info!("[GameState] Game over at turn {}: winners={:?}", self.turn, outcome.winners);
        self.status = GameStatus::Ended;
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            turn: self.turn,
            now: self.now,
            status: self.status,
            tiles: self.grid.rows().to_vec(),
            bomb_tiles: self.grid.bomb_tiles().collect(),
            players: self.registry.players.values().cloned().collect(),
            monsters: self.registry.monsters.values().cloned().collect(),
            bombs: self.registry.bombs.values().cloned().collect(),
            power_ups: self.registry.power_ups.values().cloned().collect(),
            pending_cells: self.registry.pending_cells.clone(),
            explosions: self.registry.explosions.clone(),
            winners: self.outcome.as_ref().map(|o| o.winners.clone()),
        }
    }
}
