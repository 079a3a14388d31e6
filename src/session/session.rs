use log::{debug, info, warn};
use uuid::Uuid;

use crate::game::state::{GameSnapshot, GameState};
use crate::game::types::PlayerId;
use crate::session::messages::{CommandEnvelope, GameEnded, PlayerCommand};

/// Receives the result of a session. Called exactly once per session.
pub trait GameObserver {
    fn game_ended(&mut self, event: &GameEnded);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEnded),
{
    fn game_ended(&mut self, event: &GameEnded) {
        self(event)
    }
}

pub struct GameSession<O: GameObserver> {
    pub game_id: Uuid,
    state: GameState,
    observer: O,
    reported: bool,
}

impl<O: GameObserver> GameSession<O> {
    pub fn new(state: GameState, observer: O) -> Self {
        let game_id = Uuid::new_v4();
        info!(
            "[GameSession] Created game_id={} players={:?}",
            game_id,
            state.registry.players.keys().collect::<Vec<_>>()
        );
        Self {
            game_id,
            state,
            observer,
            reported: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    /// Queue a command for the next tick. Rejected commands return false.
    pub fn submit(&mut self, player_id: PlayerId, command: PlayerCommand) -> bool {
        let accepted = self.state.submit(player_id, command);
        if !accepted {
            debug!(
                "[GameSession] Rejected {:?} from player {} (game_id={})",
                command, player_id, self.game_id
            );
        }
        accepted
    }

    /// Queue a JSON-encoded [`CommandEnvelope`].
    pub fn submit_json(&mut self, text: &str) -> Result<bool, serde_json::Error> {
        let envelope: CommandEnvelope = serde_json::from_str(text)?;
        Ok(self.submit(envelope.player, envelope.command))
    }

    /// Advance the game to `now` and notify the observer when it ends.
    pub fn tick(&mut self, now: u64) {
        let Some(outcome) = self.state.tick(now) else {
            return;
        };
        if self.reported {
            warn!("[GameSession] Outcome already reported for game_id={}", self.game_id);
            return;
        }
        self.reported = true;
        let event = GameEnded {
            game_id: self.game_id,
            winners: outcome.winners,
        };
        info!("[GameSession] Game ended: game_id={} winners={:?}", self.game_id, event.winners);
        self.observer.game_ended(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::game::grid::Grid;
    use crate::game::types::{MonsterKind, Position};

    #[test]
    fn test_observer_is_notified_once() {
        let mut state = GameState::empty(Grid::open(5, 5), GameSettings::default(), 1);
        let a = state.add_player(Position::new(0, 0)).unwrap();
        let b = state.add_player(Position::new(4, 4)).unwrap();
        let mut calls: Vec<Vec<PlayerId>> = Vec::new();
        {
            let mut session = GameSession::new(state, |event: &GameEnded| {
                calls.push(event.winners.clone())
            });
            session.tick(0);
            session.tick(1);
            session.tick(2);
            assert!(session.is_ended());
        }
        assert_eq!(calls, vec![vec![a, b]]);
    }

    #[test]
    fn test_json_commands_are_queued() {
        let mut state = GameState::empty(Grid::open(5, 5), GameSettings::default(), 1);
        let id = state.add_player(Position::new(0, 0)).unwrap();
        state.add_monster(MonsterKind::WallPhaser, Position::new(4, 4));
        let mut session = GameSession::new(state, |_: &GameEnded| {});

        let accepted = session
            .submit_json(r#"{"player":1,"command":{"Move":"Down"}}"#)
            .unwrap();
        assert!(accepted);
        assert!(session.submit_json("{\"player\":1}").is_err());

        session.tick(5);
        assert_eq!(session.state().registry.players[&id].pos, Position::new(1, 0));
        assert!(!session.is_ended());
    }
}
