use crate::sim::Direction;

/// Discrete player action decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    ToggleAutopilot,
}

impl Command {
    /// Maps a DOM `KeyboardEvent.key` value; unrecognized keys yield `None`.
    pub fn from_key(key: &str) -> Option<Command> {
        let command = match key {
            "ArrowLeft" => Command::Steer(Direction::Left),
            "ArrowUp" => Command::Steer(Direction::Up),
            "ArrowRight" => Command::Steer(Direction::Right),
            "ArrowDown" => Command::Steer(Direction::Down),
            "k" | "K" => Command::ToggleAutopilot,
            _ => return None,
        };
        Some(command)
    }
}
