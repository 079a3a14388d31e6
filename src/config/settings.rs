//! Runtime gameplay settings.
//!
//! Gathers the constants of [`crate::config::game`] into one value that is threaded
//! through the game state. A JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::game::*;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable rule values. Arena bounds are not part of the settings: they always
/// come from the loaded grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub bomb_fuse_ms: u64,
    pub explosion_base_delay_ms: u64,
    pub explosion_step_delay_ms: u64,
    pub explosion_duration_ms: u64,
    pub ghost_duration_ms: u64,
    pub invincibility_duration_ms: u64,
    pub monster_pause_ms: u64,
    pub wanderer_cadence_ms: u64,
    pub wall_phaser_cadence_ms: u64,
    pub pathfinder_cadence_ms: u64,
    pub decisive_cadence_ms: u64,
    pub power_up_drop_chance: f64,
    pub obstacle_capacity_step: u32,
    pub starting_bomb_capacity: u32,
    pub starting_blast_range: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            bomb_fuse_ms: BOMB_FUSE_MS,
            explosion_base_delay_ms: EXPLOSION_BASE_DELAY_MS,
            explosion_step_delay_ms: EXPLOSION_STEP_DELAY_MS,
            explosion_duration_ms: EXPLOSION_DURATION_MS,
            ghost_duration_ms: GHOST_DURATION_MS,
            invincibility_duration_ms: INVINCIBILITY_DURATION_MS,
            monster_pause_ms: MONSTER_PAUSE_MS,
            wanderer_cadence_ms: WANDERER_CADENCE_MS,
            wall_phaser_cadence_ms: WALL_PHASER_CADENCE_MS,
            pathfinder_cadence_ms: PATHFINDER_CADENCE_MS,
            decisive_cadence_ms: DECISIVE_CADENCE_MS,
            power_up_drop_chance: POWER_UP_DROP_CHANCE,
            obstacle_capacity_step: OBSTACLE_CAPACITY_STEP,
            starting_bomb_capacity: STARTING_BOMB_CAPACITY,
            starting_blast_range: STARTING_BLAST_RANGE,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON. Missing fields keep their default value.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let mut settings: GameSettings = serde_json::from_str(text)?;
        settings.power_up_drop_chance = settings.power_up_drop_chance.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Activation delay of an explosion cell `distance` tiles away from its bomb.
    pub fn explosion_delay(&self, distance: u32) -> u64 {
        self.explosion_base_delay_ms + self.explosion_step_delay_ms * u64::from(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = GameSettings::from_json(r#"{"bomb_fuse_ms": 1200}"#).unwrap();
        assert_eq!(settings.bomb_fuse_ms, 1200);
        assert_eq!(settings.ghost_duration_ms, GHOST_DURATION_MS);
    }

    #[test]
    fn test_drop_chance_is_clamped() {
        let settings = GameSettings::from_json(r#"{"power_up_drop_chance": 3.5}"#).unwrap();
        assert_eq!(settings.power_up_drop_chance, 1.0);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            GameSettings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_explosion_delay_grows_per_tile() {
        let settings = GameSettings::default();
        assert_eq!(settings.explosion_delay(0), EXPLOSION_BASE_DELAY_MS);
        assert_eq!(
            settings.explosion_delay(2),
            EXPLOSION_BASE_DELAY_MS + 2 * EXPLOSION_STEP_DELAY_MS
        );
    }
}
