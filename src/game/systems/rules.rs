//! Per-tick player rules: status timers, power-up pickups, monster contact and
//! the terminal conditions of the game.

use log::info;

use crate::game::state::GameState;
use crate::game::types::{GameOutcome, PlayerId, PowerUpKind};

/// Expire ghost mode and invincibility. A player whose ghost mode ends inside
/// non-passable terrain is eliminated.
pub fn update_player_status(game_state: &mut GameState, now: u64) {
    let grid = &game_state.grid;
    for player in game_state.registry.players.values_mut().filter(|p| p.is_alive) {
        let expired = player.expire_effects(now);
        if expired.ghost && !grid.is_passable(player.pos) {
            player.eliminate();
            info!("[Player] Player {} was trapped in terrain when ghost mode ended", player.id);
        }
    }
}

/// Live players standing on a power-up collect it.
pub fn collect_power_ups(game_state: &mut GameState, now: u64) {
    for player_id in game_state.registry.alive_player_ids() {
        let Some(pos) = game_state.registry.players.get(&player_id).map(|p| p.pos) else {
            continue;
        };
        let Some(power_up_id) = game_state.registry.power_up_at(pos) else {
            continue;
        };
        if let Some(power_up) = game_state.registry.power_ups.remove(&power_up_id) {
            apply_power_up(game_state, player_id, power_up.kind, now);
        }
    }
}

/// One-shot effect of a power-up on the collecting player. MonsterDisable pauses
/// every pursuing monster instead.
pub fn apply_power_up(
    game_state: &mut GameState,
    player_id: PlayerId,
    kind: PowerUpKind,
    now: u64,
) {
    let settings = &game_state.settings;
    if kind == PowerUpKind::MonsterDisable {
        let until = now + settings.monster_pause_ms;
        for monster in game_state.registry.monsters.values_mut() {
            monster.pause(until);
        }
        info!("[PowerUp] Player {} paused the pursuing monsters", player_id);
        return;
    }

    let Some(player) = game_state.registry.players.get_mut(&player_id) else {
        return;
    };
    match kind {
        PowerUpKind::BombCapacity => player.bomb_capacity += 1,
        PowerUpKind::BlastRange => player.blast_range += 1,
        PowerUpKind::Detonator => player.has_detonator = true,
        PowerUpKind::Ghost => player.activate_ghost_mode(now, settings.ghost_duration_ms),
        PowerUpKind::Invincibility => {
            player.activate_invincibility(now, settings.invincibility_duration_ms)
        }
        PowerUpKind::ObstacleCapacity => {
            player.obstacle_capacity += settings.obstacle_capacity_step
        }
        PowerUpKind::MonsterDisable => {}
    }
    info!("[PowerUp] Player {} collected {:?}", player_id, kind);
}

/// Live, non-invincible players sharing a tile with a monster are eliminated.
pub fn resolve_monster_contacts(game_state: &mut GameState) {
    let caught: Vec<PlayerId> = game_state
        .registry
        .alive_players()
        .filter(|p| !p.is_invincible() && game_state.registry.has_monster_at(p.pos))
        .map(|p| p.id)
        .collect();

    for player_id in caught {
        if let Some(player) = game_state.registry.players.get_mut(&player_id) {
            player.eliminate();
            info!("[Player] Player {} was caught by a monster", player_id);
        }
    }
}

/// Terminal conditions, checked in order:
/// - no live player left: game over without winners;
/// - one live player left in a game that started with several: that player wins;
/// - no monster left: every live player wins jointly.
pub fn check_game_end(game_state: &GameState) -> Option<GameOutcome> {
    let alive = game_state.registry.alive_player_ids();
    if alive.is_empty() && game_state.starting_players() > 0 {
        return Some(GameOutcome { winners: alive });
    }
    if alive.len() == 1 && game_state.starting_players() >= 2 {
        return Some(GameOutcome { winners: alive });
    }
    if game_state.registry.monsters.is_empty() {
        return Some(GameOutcome { winners: alive });
    }
    None
}
