//! Monster movement policies.
//!
//! Every monster shares the same tick contract: nothing happens before its move
//! deadline (or while paused); otherwise its kind picks at most one new tile.
//! Monsters never step onto a tile held by another monster.

use std::collections::VecDeque;

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::game::grid::Grid;
use crate::game::registry::Registry;
use crate::game::state::GameState;
use crate::game::types::{Direction, EntityId, MonsterKind, Position, Tile};

/// Outcome of a pursuit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pursuit {
    Step(Position),
    /// A path exists but the next tile is taken, or the target is already reached.
    Hold,
    NoPath,
}

pub fn advance_monsters(game_state: &mut GameState, now: u64) {
    for monster_id in game_state.registry.monster_ids() {
        advance_monster(game_state, monster_id, now);
    }
}

/// Advance one monster. Returns true when it changed tile.
pub fn advance_monster(game_state: &mut GameState, monster_id: EntityId, now: u64) -> bool {
    let Some(monster) = game_state.registry.monsters.get_mut(&monster_id) else {
        return false;
    };
    if !monster.ready(now) {
        return false;
    }
    monster.moved(now);
    let (kind, from) = (monster.kind, monster.pos);

    let grid = &game_state.grid;
    let registry = &game_state.registry;
    let rng = &mut game_state.rng;
    let target = match kind {
        MonsterKind::Wanderer => wander_step(grid, registry, from, rng),
        MonsterKind::WallPhaser => phase_step(grid, registry, from, rng),
        MonsterKind::Pathfinder => pursue_or_roam(grid, registry, from, rng),
        MonsterKind::Decisive => {
            if rng.random_bool(0.5) {
                // Wrong decision.
                wander_step(grid, registry, from, rng)
            } else {
                pursue_or_roam(grid, registry, from, rng)
            }
        }
    };

    let Some(to) = target else {
        return false;
    };
    if let Some(monster) = game_state.registry.monsters.get_mut(&monster_id) {
        monster.pos = to;
    }
    debug!("[Monster] {:?} {} moved {:?} -> {:?}", kind, monster_id, from, to);
    true
}

/// Random walk: first shuffled neighbour that is free floor without a bomb.
pub fn wander_step<R: Rng + ?Sized>(
    grid: &Grid,
    registry: &Registry,
    from: Position,
    rng: &mut R,
) -> Option<Position> {
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    directions
        .into_iter()
        .filter_map(|direction| grid.neighbor(from, direction))
        .find(|pos| grid.is_floor(*pos) && !grid.has_bomb(*pos) && !registry.has_monster_at(*pos))
}

/// Random passable neighbour; `None` when fully blocked.
pub fn roam_step<R: Rng + ?Sized>(
    grid: &Grid,
    registry: &Registry,
    from: Position,
    rng: &mut R,
) -> Option<Position> {
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    directions
        .into_iter()
        .filter_map(|direction| grid.neighbor(from, direction))
        .find(|pos| grid.is_passable(*pos) && !registry.has_monster_at(*pos))
}

/// Slide through consecutive walls and bricks in one random direction until a
/// floor tile. Leaving the arena, meeting a bomb or a floor tile held by another
/// monster cancels the whole move.
pub fn phase_step<R: Rng + ?Sized>(
    grid: &Grid,
    registry: &Registry,
    from: Position,
    rng: &mut R,
) -> Option<Position> {
    let direction = *Direction::ALL.choose(rng)?;
    let mut next = grid.neighbor(from, direction)?;
    loop {
        if grid.has_bomb(next) {
            return None;
        }
        match grid.get(next)? {
            Tile::Floor => return (!registry.has_monster_at(next)).then_some(next),
            Tile::Wall | Tile::Brick | Tile::Obstacle { .. } => {
                next = grid.neighbor(next, direction)?;
            }
        }
    }
}

fn pursue_or_roam<R: Rng + ?Sized>(
    grid: &Grid,
    registry: &Registry,
    from: Position,
    rng: &mut R,
) -> Option<Position> {
    match pursue(grid, registry, from) {
        Pursuit::Step(pos) => Some(pos),
        Pursuit::Hold => None,
        Pursuit::NoPath => roam_step(grid, registry, from, rng),
    }
}

/// Step along the shortest path towards the nearest live player.
pub fn pursue(grid: &Grid, registry: &Registry, from: Position) -> Pursuit {
    let Some(target) = nearest_player(registry, from) else {
        return Pursuit::NoPath;
    };
    match bfs(grid, from, target) {
        None => Pursuit::NoPath,
        Some(path) => match path.get(1) {
            Some(next) if !registry.has_monster_at(*next) => Pursuit::Step(*next),
            _ => Pursuit::Hold,
        },
    }
}

/// Nearest live player by squared Euclidean distance; ties go to the lowest id.
pub fn nearest_player(registry: &Registry, from: Position) -> Option<Position> {
    registry
        .alive_players()
        .min_by_key(|player| from.squared_distance(player.pos))
        .map(|player| player.pos)
}

/// Unweighted breadth-first search over passable tiles. The returned path starts
/// with `start` and ends with `target`. Neighbours are expanded in
/// [`Direction::ALL`] order, so the first shortest path found wins.
pub fn bfs(grid: &Grid, start: Position, target: Position) -> Option<Vec<Position>> {
    if !grid.in_bounds(start) || !grid.in_bounds(target) {
        return None;
    }
    if start == target {
        return Some(vec![start]);
    }

    let width = grid.width();
    let index = |pos: Position| pos.row * width + pos.col;
    let mut parent: Vec<Option<Position>> = vec![None; grid.height() * width];
    let mut visited = vec![false; grid.height() * width];
    let mut queue = VecDeque::new();

    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == target {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(prev) = parent[index(cursor)] {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for direction in Direction::ALL {
            let Some(next) = grid.neighbor(current, direction) else {
                continue;
            };
            if visited[index(next)] || !grid.is_passable(next) {
                continue;
            }
            visited[index(next)] = true;
            parent[index(next)] = Some(current);
            queue.push_back(next);
        }
    }
    None
}
