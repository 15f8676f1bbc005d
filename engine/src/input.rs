use serde::{Deserialize, Serialize};

use crate::{Direction, GameCommand};

/// Signals an input collaborator may hand to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSignal {
    DirectionLeft,
    DirectionRight,
    DirectionUp,
    DirectionDown,
    Confirm,
    Quit,
}

impl InputSignal {
    /// `Quit` has no session command; the outer loop handles it.
    pub fn to_command(self) -> Option<GameCommand> {
        let direction = match self {
            InputSignal::DirectionLeft => Direction::Left,
            InputSignal::DirectionRight => Direction::Right,
            InputSignal::DirectionUp => Direction::Up,
            InputSignal::DirectionDown => Direction::Down,
            InputSignal::Confirm => return Some(GameCommand::Resume),
            InputSignal::Quit => return None,
        };
        Some(GameCommand::Turn { direction })
    }

    pub fn from_name(name: &str) -> Option<InputSignal> {
        match name {
            "left" => Some(InputSignal::DirectionLeft),
            "right" => Some(InputSignal::DirectionRight),
            "up" => Some(InputSignal::DirectionUp),
            "down" => Some(InputSignal::DirectionDown),
            "confirm" => Some(InputSignal::Confirm),
            "quit" => Some(InputSignal::Quit),
            _ => None,
        }
    }
}

impl From<Direction> for InputSignal {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => InputSignal::DirectionLeft,
            Direction::Right => InputSignal::DirectionRight,
            Direction::Up => InputSignal::DirectionUp,
            Direction::Down => InputSignal::DirectionDown,
        }
    }
}
