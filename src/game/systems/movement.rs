//! Player movement system.
//!
//! This module handles moving players on the grid and placing obstacles next to them.

use log::debug;

use crate::game::state::GameState;
use crate::game::types::{Direction, PlayerId, Position};

/// Whether `player_id` may step onto `target`.
///
/// The tile must be inside the arena and free of other live players. Ghosts
/// ignore terrain and bombs; everyone else needs a floor tile without a bomb.
pub fn is_valid_move(game_state: &GameState, player_id: PlayerId, target: Position) -> bool {
    let Some(player) = game_state.registry.players.get(&player_id) else {
        return false;
    };
    if !game_state.grid.in_bounds(target) {
        return false;
    }
    if game_state
        .registry
        .alive_players()
        .any(|other| other.id != player_id && other.pos == target)
    {
        return false;
    }
    player.is_ghost() || (game_state.grid.is_floor(target) && !game_state.grid.has_bomb(target))
}

/// Move the specified player in the given direction.
/// Returns the new position, or `None` when the move is rejected.
pub fn move_player(
    game_state: &mut GameState,
    player_id: PlayerId,
    direction: Direction,
) -> Option<Position> {
    let player = game_state.registry.players.get(&player_id)?;
    if !player.is_alive {
        return None;
    }
    let target = player.pos.step(direction)?;
    if !is_valid_move(game_state, player_id, target) {
        return None;
    }

    let player = game_state.registry.players.get_mut(&player_id)?;
    player.pos = target;
    Some(target)
}

/// Turn the floor tile next to the player into an obstacle. The tile must be
/// free of bombs, players, monsters and power-ups, and the player must have
/// obstacle budget left.
pub fn place_obstacle(
    game_state: &mut GameState,
    player_id: PlayerId,
    direction: Direction,
) -> bool {
    let Some(player) = game_state.registry.players.get(&player_id) else {
        return false;
    };
    if !player.can_place_obstacle() {
        return false;
    }
    let Some(target) = game_state.grid.neighbor(player.pos, direction) else {
        return false;
    };

    let registry = &game_state.registry;
    if registry.alive_player_at(target).is_some()
        || registry.has_monster_at(target)
        || registry.power_up_at(target).is_some()
    {
        return false;
    }
    if !game_state.grid.place_obstacle(target, player_id) {
        return false;
    }

    if let Some(player) = game_state.registry.players.get_mut(&player_id) {
        player.placed_obstacle();
    }
    debug!("[Player] Player {} placed an obstacle at {:?}", player_id, target);
    true
}
