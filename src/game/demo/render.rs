//! Game rendering system (terminal).
//!
//! This module provides functions to print the grid and player state for debugging/demo.

use crate::game::entities::Player;
use crate::game::state::GameSnapshot;
use crate::game::types::{MonsterKind, Position, PowerUpKind, Tile};

/// Two-character symbol of one tile, entities drawn over terrain.
pub fn tile_symbol(snapshot: &GameSnapshot, pos: Position) -> String {
    // If a player is alive on this tile, display the player.
    if let Some(player) = snapshot.players.iter().find(|p| p.pos == pos && p.is_alive) {
        return format!("P{}", player.id);
    }
    if let Some(monster) = snapshot.monsters.iter().find(|m| m.pos == pos) {
        let letter = match monster.kind {
            MonsterKind::Wanderer => 'w',
            MonsterKind::WallPhaser => 'g',
            MonsterKind::Pathfinder => 'p',
            MonsterKind::Decisive => 'd',
        };
        return format!("M{letter}");
    }
    if snapshot.explosions.iter().any(|e| e.pos == pos) {
        return "**".to_string();
    }
    if snapshot.bomb_tiles.contains(&pos) {
        return "()".to_string();
    }
    if let Some(power_up) = snapshot.power_ups.iter().find(|p| p.pos == pos) {
        let letter = match power_up.kind {
            PowerUpKind::BombCapacity => 'b',
            PowerUpKind::BlastRange => 'r',
            PowerUpKind::Detonator => 'd',
            PowerUpKind::Ghost => 'g',
            PowerUpKind::Invincibility => 'i',
            PowerUpKind::ObstacleCapacity => 'o',
            PowerUpKind::MonsterDisable => 'm',
        };
        return format!("+{letter}");
    }

    match snapshot.tiles[pos.row][pos.col] {
        Tile::Floor => "  ".to_string(),
        Tile::Wall => "██".to_string(),
        Tile::Brick => "▒▒".to_string(),
        Tile::Obstacle { .. } => "##".to_string(),
    }
}

/// Print the grid with every entity to the terminal.
pub fn print_grid(snapshot: &GameSnapshot) {
    for (row, tiles) in snapshot.tiles.iter().enumerate() {
        let line: String = (0..tiles.len())
            .map(|col| format!("{:<3}", tile_symbol(snapshot, Position::new(row, col))))
            .collect();
        println!("{}", line.trim_end());
    }
    println!();
}

/// Print the state of a single player.
pub fn print_player_state(player: &Player) {
    let status = if !player.is_alive {
        "dead"
    } else if player.is_ghost() {
        "ghost"
    } else if player.is_invincible() {
        "invincible"
    } else {
        "alive"
    };
    println!(
        "--- Player {} ({}) at ({}, {}) | bombs {}/{} range {} | obstacles {}/{} | \
         detonator {} | kills {}",
        player.id,
        status,
        player.pos.row,
        player.pos.col,
        player.active_bombs(),
        player.bomb_capacity,
        player.blast_range,
        player.active_obstacles,
        player.obstacle_capacity,
        player.has_detonator,
        player.kills
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::game::grid::Grid;
    use crate::game::state::GameState;

    #[test]
    fn test_players_are_drawn_over_bombs() {
        let grid = Grid::parse("012\n000\n").unwrap();
        let mut state = GameState::empty(grid, GameSettings::default(), 1);
        let id = state.add_player(Position::new(1, 0)).unwrap();
        state.add_bomb(id, Position::new(1, 0), 1, 1000);
        state.add_bomb(id, Position::new(1, 1), 1, 1000);
        let snapshot = state.snapshot();

        assert_eq!(tile_symbol(&snapshot, Position::new(1, 0)), "P1");
        assert_eq!(tile_symbol(&snapshot, Position::new(1, 1)), "()");
        assert_eq!(tile_symbol(&snapshot, Position::new(0, 1)), "██");
        assert_eq!(tile_symbol(&snapshot, Position::new(0, 2)), "▒▒");
    }
}
