/// Demo runner configuration constants.
///
/// Only the terminal demo uses these; the simulation core is paced by its caller.
pub const TICK_INTERVAL_MS: u64 = 50; // Simulation step period of the demo loop.

/// Directory holding the bundled map files.
pub const MAP_DIR: &str = "maps";

/// Map used when none is given on the command line.
pub const DEFAULT_MAP: &str = "map1.txt";

/// Seed used when none is given on the command line.
pub const DEFAULT_SEED: u64 = 42;

/// Number of players in a demo session.
pub const DEMO_PLAYERS: usize = 2;

/// Render every Nth tick to keep the terminal readable.
pub const RENDER_EVERY_TICKS: u64 = 10;
