/// Main configuration module.
///
/// Re-exports submodules for gameplay constants, runtime settings and the demo runner.
pub mod demo;
pub mod game;
pub mod settings;

pub use settings::{GameSettings, SettingsError};
