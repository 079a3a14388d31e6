//! Real-time game loop for the terminal demo.
//!
//! Commands are read from stdin on a separate task and forwarded to the loop,
//! which ticks the session on a fixed interval until the game ends.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::config::demo::{RENDER_EVERY_TICKS, TICK_INTERVAL_MS};
use crate::game::demo::input::parse_command_line;
use crate::game::demo::render::{print_grid, print_player_state};
use crate::session::messages::CommandEnvelope;
use crate::session::session::{GameObserver, GameSession};

/// Forward every parsed stdin line to `tx` until stdin closes or the loop goes away.
async fn read_commands(tx: mpsc::UnboundedSender<CommandEnvelope>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_command_line(&line) {
                Some(envelope) => {
                    if tx.send(envelope).is_err() {
                        break;
                    }
                }
                None => warn!("[Input] Could not parse command: {:?}", line),
            },
            Ok(None) => break,
            Err(e) => {
                warn!("[Input] stdin error: {}", e);
                break;
            }
        }
    }
    debug!("[Input] Command reader stopped");
}

fn render<O: GameObserver>(session: &GameSession<O>) {
    let snapshot = session.snapshot();
    println!("=== turn {} | t={}ms ===", snapshot.turn, snapshot.now);
    print_grid(&snapshot);
    for player in &snapshot.players {
        print_player_state(player);
    }
}

/// Run the session until it ends, ticking every [`TICK_INTERVAL_MS`].
pub async fn run_game_loop<O: GameObserver>(mut session: GameSession<O>) -> GameSession<O> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(read_commands(tx));

    println!(
        "Commands: `<player> up|down|left|right`, `<player> bomb`, `<player> det`, \
         `<player> obs <dir>`"
    );
    render(&session);

    let started = Instant::now();
    let mut ticker = interval(Duration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks: u64 = 0;

    while !session.is_ended() {
        ticker.tick().await;

        while let Ok(envelope) = rx.try_recv() {
            session.submit(envelope.player, envelope.command);
        }

        let now = started.elapsed().as_millis() as u64;
        session.tick(now);
        ticks += 1;

        if ticks % RENDER_EVERY_TICKS == 0 || session.is_ended() {
            render(&session);
        }
    }

    reader.abort();
    info!(
        "[GameLoop] Session {} finished after {} ticks",
        session.game_id, ticks
    );
    session
}
