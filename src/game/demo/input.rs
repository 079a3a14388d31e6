//! Terminal command parsing for the demo.
//!
//! Accepts either a short form (`1 up`, `2 bomb`, `1 det`, `2 obs left`) or a
//! JSON [`CommandEnvelope`].

use crate::game::types::Direction;
use crate::session::messages::{CommandEnvelope, PlayerCommand};

fn parse_direction(word: &str) -> Option<Direction> {
    match word {
        "up" | "u" | "w" => Some(Direction::Up),
        "down" | "d" | "s" => Some(Direction::Down),
        "left" | "l" | "a" => Some(Direction::Left),
        "right" | "r" => Some(Direction::Right),
        _ => None,
    }
}

/// Parse one line of input into a command. Returns `None` for anything unrecognized.
pub fn parse_command_line(line: &str) -> Option<CommandEnvelope> {
    let line = line.trim();
    if line.starts_with('{') {
        return serde_json::from_str(line).ok();
    }

    let lowered = line.to_lowercase();
    let mut words = lowered.split_whitespace();
    let player = words.next()?.parse().ok()?;
    let action = words.next()?;
    let argument = words.next();
    if words.next().is_some() {
        return None;
    }

    let command = match (action, argument) {
        ("bomb" | "b", None) => PlayerCommand::PlaceBomb,
        ("det" | "detonate", None) => PlayerCommand::Detonate,
        ("obs" | "obstacle", Some(dir)) => PlayerCommand::PlaceObstacle(parse_direction(dir)?),
        ("move" | "m", Some(dir)) => PlayerCommand::Move(parse_direction(dir)?),
        (dir, None) => PlayerCommand::Move(parse_direction(dir)?),
        _ => return None,
    };
    Some(CommandEnvelope { player, command })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_forms() {
        let parsed = parse_command_line("1 up").unwrap();
        assert_eq!(parsed.player, 1);
        assert_eq!(parsed.command, PlayerCommand::Move(Direction::Up));

        assert_eq!(parse_command_line("2 bomb").unwrap().command, PlayerCommand::PlaceBomb);
        assert_eq!(parse_command_line("1 DET").unwrap().command, PlayerCommand::Detonate);
        assert_eq!(
            parse_command_line(" 2 obs left ").unwrap().command,
            PlayerCommand::PlaceObstacle(Direction::Left)
        );
    }

    #[test]
    fn test_json_envelopes() {
        let parsed = parse_command_line(r#"{"player":3,"command":"PlaceBomb"}"#).unwrap();
        assert_eq!(parsed.player, 3);
        assert_eq!(parsed.command, PlayerCommand::PlaceBomb);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_command_line("").is_none());
        assert!(parse_command_line("x up").is_none());
        assert!(parse_command_line("1 fly").is_none());
        assert!(parse_command_line("1 obs").is_none());
        assert!(parse_command_line("1 bomb now").is_none());
        assert!(parse_command_line("{not json").is_none());
    }
}
