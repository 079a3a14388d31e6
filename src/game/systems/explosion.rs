//! Explosion engine.
//!
//! Bomb placement, fuse checks, detonator triggering, the explode pass with its
//! chain reactions, and the staging of explosion cells into visible explosions.
//!
//! Tile effects (kills, chained bombs, broken bricks) resolve synchronously inside
//! [`explode`]; only the visible "explosion present" state is delayed, staggered
//! by distance from the bomb.

use log::{debug, info};

use crate::game::entities::{ActiveExplosion, Bomb, ExplosionCell, PowerUp};
use crate::game::grid::BrickOutcome;
use crate::game::state::GameState;
use crate::game::types::{Direction, EntityId, PlayerId, Position, Tile};

/// Place a bomb under the player. Rejected when the player is dead, in ghost
/// mode, out of bomb capacity, or already standing on a bomb.
pub fn place_bomb(game_state: &mut GameState, player_id: PlayerId, now: u64) -> Option<EntityId> {
    let fuse = game_state.settings.bomb_fuse_ms;
    let player = game_state.registry.players.get(&player_id)?;
    if !player.can_place_bomb() || game_state.grid.has_bomb(player.pos) {
        return None;
    }
    let (pos, blast_range) = (player.pos, player.blast_range);

    let id = game_state.registry.next_id();
    game_state.registry.add_bomb(Bomb::new(id, player_id, pos, blast_range, now + fuse));
    game_state.grid.mark_bomb(pos);
    if let Some(player) = game_state.registry.players.get_mut(&player_id) {
        player.placed_bomb(id);
    }
    debug!("[Bomb] Player {} placed bomb {} at {:?}", player_id, id, pos);
    Some(id)
}

/// Fire the player's detonator: consumes the charge and explodes every bomb the
/// player currently owns. Rejected without a charge or without bombs to fire.
pub fn detonate(game_state: &mut GameState, player_id: PlayerId, now: u64) -> bool {
    let Some(player) = game_state.registry.players.get_mut(&player_id) else {
        return false;
    };
    if !player.is_alive || !player.has_detonator || player.bombs.is_empty() {
        return false;
    }
    player.has_detonator = false;
    let owned = player.bombs.clone();

    info!("[Bomb] Player {} detonated {} bomb(s)", player_id, owned.len());
    for bomb_id in owned {
        explode(game_state, bomb_id, now);
    }
    true
}

/// Explode every bomb whose fuse has run out. The fuse is held while the owner
/// is alive with a detonator charge; those bombs only go off through
/// [`detonate`] or a chain reaction.
pub fn update_bombs(game_state: &mut GameState, now: u64) {
    for bomb_id in game_state.registry.bomb_ids() {
        let registry = &game_state.registry;
        let due = registry.bombs.get(&bomb_id).is_some_and(|bomb| {
            let held = registry
                .players
                .get(&bomb.owner)
                .is_some_and(|owner| owner.is_alive && owner.has_detonator);
            !held && bomb.fuse_expired(now)
        });
        if due {
            explode(game_state, bomb_id, now);
        }
    }
}

/// Run the explode pass for one bomb and return the cells it emitted (cells of
/// bombs it chained into are queued too, but not returned).
///
/// A bomb that is already exploding or already removed yields no cells, so
/// chained and repeated requests are harmless.
pub fn explode(game_state: &mut GameState, bomb_id: EntityId, now: u64) -> Vec<ExplosionCell> {
    let Some(bomb) = game_state.registry.bombs.get_mut(&bomb_id) else {
        return Vec::new();
    };
    if bomb.is_exploding {
        return Vec::new();
    }
    bomb.is_exploding = true;
    let (origin, range, owner) = (bomb.pos, bomb.blast_range, bomb.owner);
    debug!("[Bomb] Bomb {} exploding at {:?} (range {})", bomb_id, origin, range);

    let mut cells = Vec::with_capacity(1 + 4 * range as usize);
    check_and_affect_tile(game_state, origin, owner, now);
    cells.push(emit_cell(game_state, origin, 0, now));

    for direction in Direction::ALL {
        let mut current = origin;
        for distance in 1..=range {
            let Some(next) = game_state.grid.neighbor(current, direction) else {
                break;
            };
            match game_state.grid.get(next) {
                None | Some(Tile::Wall) => break,
                Some(tile) if tile.is_breakable() => {
                    break_tile(game_state, next);
                    break;
                }
                _ => {}
            }
            check_and_affect_tile(game_state, next, owner, now);
            cells.push(emit_cell(game_state, next, distance, now));
            current = next;
        }
    }

    game_state.grid.unmark_bomb(origin);
    if let Some(player) = game_state.registry.players.get_mut(&owner) {
        player.bomb_resolved(bomb_id);
    }
    game_state.registry.bombs.remove(&bomb_id);
    cells
}

/// Apply the immediate blast effects to one tile: chain other bombs, eliminate
/// players that are not invincible, destroy monsters.
pub fn check_and_affect_tile(game_state: &mut GameState, pos: Position, owner: PlayerId, now: u64) {
    for bomb_id in game_state.registry.bombs_at(pos) {
        let armed = game_state
            .registry
            .bombs
            .get(&bomb_id)
            .is_some_and(|bomb| !bomb.is_exploding);
        if armed {
            debug!("[Bomb] Chain reaction into bomb {}", bomb_id);
            explode(game_state, bomb_id, now);
        }
    }

    for victim_id in game_state.registry.alive_players_at(pos) {
        let Some(victim) = game_state.registry.players.get_mut(&victim_id) else {
            continue;
        };
        if victim.is_invincible() {
            continue;
        }
        victim.eliminate();
        info!("[Player] Player {} caught in the blast of player {}", victim_id, owner);
        if victim_id != owner {
            if let Some(killer) = game_state.registry.players.get_mut(&owner) {
                killer.kills += 1;
            }
        }
    }

    for monster_id in game_state.registry.monsters_at(pos) {
        game_state.registry.monsters.remove(&monster_id);
        info!("[Monster] Monster {} destroyed at {:?}", monster_id, pos);
    }
}

fn emit_cell(game_state: &mut GameState, pos: Position, distance: u32, now: u64) -> ExplosionCell {
    let cell = ExplosionCell {
        pos,
        activation_delay_ms: game_state.settings.explosion_delay(distance),
        emitted_at: now,
    };
    game_state.registry.pending_cells.push(cell);
    cell
}

fn break_tile(game_state: &mut GameState, pos: Position) {
    let chance = game_state.settings.power_up_drop_chance;
    match game_state.grid.destroy_brick(pos, chance, &mut game_state.rng) {
        BrickOutcome::ObstacleCleared { owner } => {
            if let Some(player) = game_state.registry.players.get_mut(&owner) {
                player.obstacle_cleared();
            }
        }
        BrickOutcome::PowerUp(kind) => {
            let id = game_state.registry.next_id();
            game_state.registry.add_power_up(PowerUp { id, kind, pos });
            debug!("[PowerUp] {:?} dropped at {:?}", kind, pos);
        }
        BrickOutcome::Nothing => {}
    }
}

/// Turn due explosion cells into visible explosions, then expire old
/// explosions, but only once no cell is left waiting.
pub fn update_explosions(game_state: &mut GameState, now: u64) {
    let duration = game_state.settings.explosion_duration_ms;
    let registry = &mut game_state.registry;

    let (due, waiting): (Vec<ExplosionCell>, Vec<ExplosionCell>) = registry
        .pending_cells
        .drain(..)
        .partition(|cell| now >= cell.activates_at());
    registry.pending_cells = waiting;

    for cell in due {
        let fresh = ActiveExplosion {
            pos: cell.pos,
            started_at: now,
            expires_at: now + duration,
        };
        match registry.explosions.iter_mut().find(|e| e.pos == cell.pos) {
            Some(existing) => *existing = fresh,
            None => registry.explosions.push(fresh),
        }
    }

    if registry.pending_cells.is_empty() {
        registry.explosions.retain(|e| !e.is_expired(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::game::types::MonsterKind;

    fn arena() -> GameState {
        GameState::empty(crate::game::grid::Grid::open(11, 13), GameSettings::default(), 1)
    }

    #[test]
    fn test_placement_respects_capacity_and_tile() {
        let mut state = arena();
        let id = state.add_player(Position::new(5, 5)).unwrap();
        state.registry.players.get_mut(&id).unwrap().bomb_capacity = 2;

        assert!(place_bomb(&mut state, id, 0).is_some());
        // Same tile already carries a bomb.
        assert!(place_bomb(&mut state, id, 0).is_none());

        state.registry.players.get_mut(&id).unwrap().pos = Position::new(5, 6);
        assert!(place_bomb(&mut state, id, 0).is_some());
        state.registry.players.get_mut(&id).unwrap().pos = Position::new(5, 7);
        assert!(place_bomb(&mut state, id, 0).is_none());
        assert_eq!(state.registry.bombs.len(), 2);
    }

    #[test]
    fn test_fuse_triggers_on_deadline() {
        let mut state = arena();
        let id = state.add_player(Position::new(0, 0)).unwrap();
        let bomb = place_bomb(&mut state, id, 100).unwrap();
        state.registry.players.get_mut(&id).unwrap().pos = Position::new(10, 12);

        let fuse = state.settings.bomb_fuse_ms;
        update_bombs(&mut state, 100 + fuse - 1);
        assert!(state.registry.bombs.contains_key(&bomb));
        update_bombs(&mut state, 100 + fuse);
        assert!(!state.registry.bombs.contains_key(&bomb));
        assert!(!state.grid.has_bomb(Position::new(0, 0)));
        assert_eq!(state.registry.players[&id].active_bombs(), 0);
    }

    #[test]
    fn test_detonator_consumes_charge_and_fires_all_bombs() {
        let mut state = arena();
        let id = state.add_player(Position::new(0, 0)).unwrap();
        state.registry.players.get_mut(&id).unwrap().bomb_capacity = 3;
        place_bomb(&mut state, id, 0);
        state.registry.players.get_mut(&id).unwrap().pos = Position::new(4, 4);
        place_bomb(&mut state, id, 0);
        state.registry.players.get_mut(&id).unwrap().pos = Position::new(10, 12);

        assert!(!detonate(&mut state, id, 10));

        state.registry.players.get_mut(&id).unwrap().has_detonator = true;
        assert!(detonate(&mut state, id, 10));
        assert!(state.registry.bombs.is_empty());
        assert!(!state.registry.players[&id].has_detonator);
        assert!(!detonate(&mut state, id, 20));
    }

    #[test]
    fn test_fuse_resumes_once_the_detonator_holder_dies() {
        let mut state = arena();
        let id = state.add_player(Position::new(0, 0)).unwrap();
        state.registry.players.get_mut(&id).unwrap().has_detonator = true;
        let bomb = state.add_bomb(id, Position::new(5, 5), 1, 100);

        update_bombs(&mut state, 200);
        assert!(state.registry.bombs.contains_key(&bomb));

        state.registry.players.get_mut(&id).unwrap().eliminate();
        update_bombs(&mut state, 300);
        assert!(!state.registry.bombs.contains_key(&bomb));
    }

    #[test]
    fn test_detonator_charge_is_kept_without_bombs() {
        let mut state = arena();
        let id = state.add_player(Position::new(0, 0)).unwrap();
        state.registry.players.get_mut(&id).unwrap().has_detonator = true;
        assert!(!detonate(&mut state, id, 0));
        assert!(state.registry.players[&id].has_detonator);
    }

    #[test]
    fn test_blast_destroys_monsters() {
        let mut state = arena();
        let owner = state.add_player(Position::new(0, 0)).unwrap();
        let monster = state.add_monster(MonsterKind::Wanderer, Position::new(5, 6));
        let bomb = state.add_bomb(owner, Position::new(5, 5), 1, 0);
        explode(&mut state, bomb, 0);
        assert!(!state.registry.monsters.contains_key(&monster));
    }

    #[test]
    fn test_cells_materialize_after_their_delay() {
        let mut state = arena();
        let owner = state.add_player(Position::new(0, 0)).unwrap();
        let bomb = state.add_bomb(owner, Position::new(5, 5), 1, 0);
        explode(&mut state, bomb, 1000);
        let step = state.settings.explosion_step_delay_ms;
        let base = state.settings.explosion_base_delay_ms;

        update_explosions(&mut state, 1000 + base);
        assert_eq!(state.registry.explosions.len(), 1);
        assert_eq!(state.registry.pending_cells.len(), 4);

        update_explosions(&mut state, 1000 + base + step);
        assert_eq!(state.registry.explosions.len(), 5);
        assert!(state.registry.pending_cells.is_empty());
    }

    #[test]
    fn test_explosions_are_not_cleared_while_cells_are_pending() {
        let mut state = arena();
        let owner = state.add_player(Position::new(0, 0)).unwrap();
        state.settings.explosion_step_delay_ms = 10_000;
        let bomb = state.add_bomb(owner, Position::new(5, 5), 1, 0);
        explode(&mut state, bomb, 0);

        update_explosions(&mut state, 0);
        assert_eq!(state.registry.explosions.len(), 1);

        let duration = state.settings.explosion_duration_ms;
        update_explosions(&mut state, duration + 1);
        assert_eq!(state.registry.explosions.len(), 1, "cells still pending");

        update_explosions(&mut state, 10_000);
        update_explosions(&mut state, 10_000 + duration + 1);
        assert!(state.registry.explosions.is_empty());
    }

    #[test]
    fn test_reactivation_refreshes_instead_of_stacking() {
        let mut state = arena();
        let owner = state.add_player(Position::new(0, 0)).unwrap();
        let first = state.add_bomb(owner, Position::new(5, 5), 1, 0);
        explode(&mut state, first, 0);
        update_explosions(&mut state, 10_000);
        let second = state.add_bomb(owner, Position::new(5, 5), 0, 0);
        explode(&mut state, second, 10_100);
        update_explosions(&mut state, 10_100);
        let at_origin: Vec<_> = state
            .registry
            .explosions
            .iter()
            .filter(|e| e.pos == Position::new(5, 5))
            .collect();
        assert_eq!(at_origin.len(), 1);
        assert_eq!(at_origin[0].started_at, 10_100);
    }
}
