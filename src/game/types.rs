use serde::{Deserialize, Serialize};

pub type PlayerId = u8;
pub type EntityId = u32;

/// Grid coordinate. Rows grow downwards, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbour one step away, or `None` when it would leave the upper/left edge.
    /// Lower/right bounds are the grid's business.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (drow, dcol) = direction.delta();
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        Some(Position { row, col })
    }

    pub fn squared_distance(self, other: Position) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr * dr + dc * dc
    }

    pub fn manhattan_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order used by blast rays and path search.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// (row, col) offset.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
    Brick,
    /// Player-placed brick; remembers who placed it so the budget can be credited back.
    Obstacle { owner: PlayerId },
}

impl Tile {
    pub fn is_passable(self) -> bool {
        matches!(self, Tile::Floor)
    }

    /// Destructible terrain: absorbs a blast ray and is destroyed by it.
    pub fn is_breakable(self) -> bool {
        matches!(self, Tile::Brick | Tile::Obstacle { .. })
    }

    pub fn from_char(ch: char) -> Option<Tile> {
        match ch {
            '0' => Some(Tile::Floor),
            '1' => Some(Tile::Wall),
            '2' => Some(Tile::Brick),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    BombCapacity,
    BlastRange,
    Detonator,
    Ghost,
    Invincibility,
    ObstacleCapacity,
    MonsterDisable,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::BombCapacity,
        PowerUpKind::BlastRange,
        PowerUpKind::Detonator,
        PowerUpKind::Ghost,
        PowerUpKind::Invincibility,
        PowerUpKind::ObstacleCapacity,
        PowerUpKind::MonsterDisable,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Random walk over free floor.
    Wanderer,
    /// Slides through walls and bricks in a random direction.
    WallPhaser,
    /// Shortest-path pursuit of the nearest player.
    Pathfinder,
    /// Pursuit with a coin flip for a random "wrong decision".
    Decisive,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [
        MonsterKind::Wanderer,
        MonsterKind::WallPhaser,
        MonsterKind::Pathfinder,
        MonsterKind::Decisive,
    ];

    /// Kinds that pursue players and can be paused by MonsterDisable.
    pub fn pursues(self) -> bool {
        matches!(self, MonsterKind::Pathfinder | MonsterKind::Decisive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Ended,
}

/// Result of a finished game. Several winners means a joint win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winners: Vec<PlayerId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stops_at_upper_left_edge() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Position::new(1, 0)));
        assert_eq!(origin.step(Direction::Right), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_only_floor_is_passable() {
        assert!(Tile::Floor.is_passable());
        assert!(!Tile::Wall.is_passable());
        assert!(!Tile::Brick.is_passable());
        assert!(!Tile::Obstacle { owner: 1 }.is_passable());
        assert!(Tile::Obstacle { owner: 1 }.is_breakable());
        assert!(!Tile::Wall.is_breakable());
    }

    #[test]
    fn test_distances() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 5);
        assert_eq!(a.squared_distance(b), 25);
        assert_eq!(a.manhattan_distance(b), 7);
    }
}
