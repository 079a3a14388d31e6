//! Main entry point for the terminal demo.
//!
//! Loads a map, starts a game session with two local players and runs the
//! real-time loop until the game ends.
//!
//! Usage: `bomb-arena [MAP] [SEED] [--settings FILE]`

use std::error::Error;
use std::path::{Path, PathBuf};

use log::info;

use bomb_arena::config::GameSettings;
use bomb_arena::config::demo::{DEFAULT_MAP, DEFAULT_SEED, DEMO_PLAYERS, MAP_DIR};
use bomb_arena::game::demo::game_loop::run_game_loop;
use bomb_arena::game::grid::Grid;
use bomb_arena::game::state::GameState;
use bomb_arena::session::messages::GameEnded;
use bomb_arena::session::session::GameSession;

struct Args {
    map: PathBuf,
    seed: u64,
    settings: Option<PathBuf>,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut map = None;
    let mut seed = None;
    let mut settings = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--settings" {
            let path = args.next().ok_or("--settings needs a file path")?;
            settings = Some(PathBuf::from(path));
        } else if map.is_none() {
            map = Some(PathBuf::from(arg));
        } else if seed.is_none() {
            seed = Some(arg.parse::<u64>()?);
        } else {
            return Err(format!("unexpected argument: {arg}").into());
        }
    }

    Ok(Args {
        map: map.unwrap_or_else(|| Path::new(MAP_DIR).join(DEFAULT_MAP)),
        seed: seed.unwrap_or(DEFAULT_SEED),
        settings,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger from environment variable.
    env_logger::init();

    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    let grid = Grid::load(&args.map)?;
    info!("[Main] Loaded map {} ({}x{})", args.map.display(), grid.height(), grid.width());

    let state = GameState::new(grid, DEMO_PLAYERS, settings, args.seed);
    let session = GameSession::new(state, |event: &GameEnded| {
        if event.winners.is_empty() {
            println!("Game over. Nobody survived.");
        } else {
            println!("Game over. Winners: {:?}", event.winners);
        }
    });

    run_game_loop(session).await;
    Ok(())
}
