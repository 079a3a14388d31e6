//! Arena grid.
//!
//! Static tile layout plus the dynamic bomb-occupancy layer. Every query is a
//! synchronous bounds-checked lookup; out-of-range coordinates are never passable.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::game::types::{Direction, PlayerId, Position, PowerUpKind, Tile};

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("cannot read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map is empty")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {ch:?} at row {row}, col {col}")]
    UnknownTile { row: usize, col: usize, ch: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("({row}, {col}) is outside the arena")]
    OutOfBounds { row: usize, col: usize },
}

/// What the blast left behind when it broke a brick-class tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickOutcome {
    /// A player-placed obstacle was cleared; its owner gets the budget back.
    ObstacleCleared { owner: PlayerId },
    PowerUp(PowerUpKind),
    Nothing,
}

#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    tiles: Vec<Vec<Tile>>,
    bomb_tiles: BTreeSet<Position>,
}

impl Grid {
    /// All-floor arena, mostly for tests and generated maps.
    pub fn open(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            tiles: vec![vec![Tile::Floor; width]; height],
            bomb_tiles: BTreeSet::new(),
        }
    }

    /// Parse the plain-text map format: one line per row, `0` floor, `1` wall,
    /// `2` brick. Width comes from the first line, height from the line count.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let width = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            let parsed = line
                .chars()
                .enumerate()
                .map(|(col, ch)| Tile::from_char(ch).ok_or(MapError::UnknownTile { row, col, ch }))
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(parsed);
        }

        debug!("[Grid] Parsed map {}x{}", tiles.len(), width);
        Ok(Self {
            height: tiles.len(),
            width,
            tiles,
            bomb_tiles: BTreeSet::new(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// In-bounds neighbour of `pos` in `direction`.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.step(direction).filter(|next| self.in_bounds(*next))
    }

    pub fn tile_at(&self, pos: Position) -> Result<Tile, GridError> {
        self.tiles
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .ok_or(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
    }

    /// Tile lookup for callers that treat out-of-range as "nothing there".
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.tile_at(pos).ok()
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Tile::is_passable)
    }

    pub fn is_floor(&self, pos: Position) -> bool {
        self.get(pos) == Some(Tile::Floor)
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos) == Some(Tile::Wall)
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    /// Every floor coordinate in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .flat_map(|(row, tiles)| {
                tiles.iter().enumerate().filter_map(move |(col, tile)| {
                    (*tile == Tile::Floor).then_some(Position { row, col })
                })
            })
            .collect()
    }

    pub fn mark_bomb(&mut self, pos: Position) {
        if self.in_bounds(pos) {
            self.bomb_tiles.insert(pos);
        }
    }

    /// Safe to call on a tile without a bomb.
    pub fn unmark_bomb(&mut self, pos: Position) {
        self.bomb_tiles.remove(&pos);
    }

    pub fn has_bomb(&self, pos: Position) -> bool {
        self.bomb_tiles.contains(&pos)
    }

    pub fn bomb_tiles(&self) -> impl Iterator<Item = Position> + '_ {
        self.bomb_tiles.iter().copied()
    }

    /// Turn a floor tile into an obstacle owned by `owner`. Returns false when
    /// the tile is not floor or carries a bomb.
    pub fn place_obstacle(&mut self, pos: Position, owner: PlayerId) -> bool {
        if !self.is_floor(pos) || self.has_bomb(pos) {
            return false;
        }
        self.tiles[pos.row][pos.col] = Tile::Obstacle { owner };
        true
    }

    /// Break a brick-class tile and replace it with floor.
    ///
    /// Obstacles report their owner so the budget can be credited back; plain
    /// bricks drop a uniformly chosen power-up with probability `drop_chance`.
    /// Any other tile is left untouched.
    pub fn destroy_brick<R: Rng + ?Sized>(
        &mut self,
        pos: Position,
        drop_chance: f64,
        rng: &mut R,
    ) -> BrickOutcome {
        let outcome = match self.get(pos) {
            Some(Tile::Obstacle { owner }) => BrickOutcome::ObstacleCleared { owner },
            Some(Tile::Brick) => {
                if rng.random_bool(drop_chance.clamp(0.0, 1.0)) {
                    PowerUpKind::ALL
                        .choose(rng)
                        .copied()
                        .map_or(BrickOutcome::Nothing, BrickOutcome::PowerUp)
                } else {
                    BrickOutcome::Nothing
                }
            }
            _ => return BrickOutcome::Nothing,
        };
        self.tiles[pos.row][pos.col] = Tile::Floor;
        outcome
    }

    #[cfg(test)]
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        self.tiles[pos.row][pos.col] = tile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_derives_dimensions() {
        let grid = Grid::parse("0001\n0201\n0000\n").unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.tile_at(Position::new(0, 3)), Ok(Tile::Wall));
        assert_eq!(grid.tile_at(Position::new(1, 1)), Ok(Tile::Brick));
    }

    #[test]
    fn test_parse_tolerates_crlf_and_trailing_blank_lines() {
        let grid = Grid::parse("010\r\n000\r\n\r\n\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!(matches!(
            Grid::parse("000\n00\n"),
            Err(MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_tiles() {
        assert!(matches!(
            Grid::parse("000\n0x0\n"),
            Err(MapError::UnknownTile { row: 1, col: 1, ch: 'x' })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_map() {
        assert!(matches!(Grid::parse("\n\n"), Err(MapError::Empty)));
    }

    #[test]
    fn test_out_of_bounds_lookups() {
        let grid = Grid::open(3, 3);
        assert_eq!(
            grid.tile_at(Position::new(3, 0)),
            Err(GridError::OutOfBounds { row: 3, col: 0 })
        );
        assert!(!grid.is_passable(Position::new(0, 3)));
        assert_eq!(grid.neighbor(Position::new(2, 2), Direction::Down), None);
    }

    #[test]
    fn test_bomb_marks_are_independent_of_tiles() {
        let mut grid = Grid::open(3, 3);
        let pos = Position::new(1, 1);
        grid.mark_bomb(pos);
        assert!(grid.has_bomb(pos));
        assert!(grid.is_floor(pos));
        grid.unmark_bomb(pos);
        grid.unmark_bomb(pos);
        assert!(!grid.has_bomb(pos));
    }

    #[test]
    fn test_destroying_an_obstacle_credits_its_owner() {
        let mut grid = Grid::open(3, 3);
        let pos = Position::new(0, 1);
        assert!(grid.place_obstacle(pos, 2));
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            grid.destroy_brick(pos, 1.0, &mut rng),
            BrickOutcome::ObstacleCleared { owner: 2 }
        );
        assert!(grid.is_floor(pos));
    }

    #[test]
    fn test_destroying_a_brick_rolls_for_a_power_up() {
        let mut rng = StdRng::seed_from_u64(7);
        let pos = Position::new(1, 1);

        let mut grid = Grid::open(3, 3);
        grid.set_tile(pos, Tile::Brick);
        assert!(matches!(
            grid.destroy_brick(pos, 1.0, &mut rng),
            BrickOutcome::PowerUp(_)
        ));
        assert!(grid.is_floor(pos));

        grid.set_tile(pos, Tile::Brick);
        assert_eq!(grid.destroy_brick(pos, 0.0, &mut rng), BrickOutcome::Nothing);
        assert!(grid.is_floor(pos));
    }

    #[test]
    fn test_walls_are_not_destroyed() {
        let mut grid = Grid::open(3, 3);
        let pos = Position::new(1, 1);
        grid.set_tile(pos, Tile::Wall);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(grid.destroy_brick(pos, 1.0, &mut rng), BrickOutcome::Nothing);
        assert!(grid.is_wall(pos));
    }

    #[test]
    fn test_obstacles_need_free_floor() {
        let mut grid = Grid::open(3, 3);
        let pos = Position::new(2, 2);
        grid.mark_bomb(pos);
        assert!(!grid.place_obstacle(pos, 1));
        grid.set_tile(Position::new(0, 0), Tile::Wall);
        assert!(!grid.place_obstacle(Position::new(0, 0), 1));
    }
}
