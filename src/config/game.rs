/// Game configuration constants.
///
/// This module defines the main gameplay parameters such as bomb fuse, explosion
/// timing, status effect durations and monster cadences. All durations are in
/// milliseconds.
pub const BOMB_FUSE_MS: u64 = 3000; // Time between placement and detonation.

/// Activation delay of the explosion cell on the bomb's own tile.
pub const EXPLOSION_BASE_DELAY_MS: u64 = 0;

/// Extra activation delay per tile of distance from the bomb.
pub const EXPLOSION_STEP_DELAY_MS: u64 = 500;

/// How long a materialized explosion stays visible.
pub const EXPLOSION_DURATION_MS: u64 = 500;

pub const GHOST_DURATION_MS: u64 = 5000;
pub const INVINCIBILITY_DURATION_MS: u64 = 5000;

/// Pause applied to pathfinding monsters by the MonsterDisable power-up.
pub const MONSTER_PAUSE_MS: u64 = 5000;

pub const WANDERER_CADENCE_MS: u64 = 1000;
pub const WALL_PHASER_CADENCE_MS: u64 = 2000;
pub const PATHFINDER_CADENCE_MS: u64 = 400;
pub const DECISIVE_CADENCE_MS: u64 = 1000;

/// Probability that a destroyed brick drops a power-up.
pub const POWER_UP_DROP_CHANCE: f64 = 0.3;

/// Obstacle budget granted by one ObstacleCapacity power-up.
pub const OBSTACLE_CAPACITY_STEP: u32 = 3;

pub const STARTING_BOMB_CAPACITY: u32 = 2;
pub const STARTING_BLAST_RANGE: u32 = 2;

/// Maximum number of players in a session (one per arena corner).
pub const MAX_PLAYERS: usize = 4;
