use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Position, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalKind {
    Wall,
    SelfBite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    None,
    AteFood,
    HitWall,
    HitSelf,
}

impl CollisionOutcome {
    pub fn terminal_kind(&self) -> Option<TerminalKind> {
        match self {
            CollisionOutcome::HitWall => Some(TerminalKind::Wall),
            CollisionOutcome::HitSelf => Some(TerminalKind::SelfBite),
            CollisionOutcome::None | CollisionOutcome::AteFood => None,
        }
    }
}

pub fn check_wall(head: &Position, width: u16, height: u16) -> bool {
    head.x < 0 || head.x >= width as i16 || head.y < 0 || head.y >= height as i16
}

pub fn check_self(snake: &Snake) -> bool {
    match snake.body.split_first() {
        Some((head, rest)) => rest.contains(head),
        None => false,
    }
}

pub fn check_food(head: &Position, food: &Position) -> bool {
    head == food
}

/// Classify the post-step state. Food is checked first, then the wall, then
/// the body, so a tick never both eats and dies.
pub fn classify(
    snake: &Snake,
    food: &Position,
    width: u16,
    height: u16,
) -> Result<CollisionOutcome> {
    let head = snake.head()?;

    if check_food(head, food) {
        return Ok(CollisionOutcome::AteFood);
    }
    if check_wall(head, width, height) {
        return Ok(CollisionOutcome::HitWall);
    }
    if check_self(snake) {
        return Ok(CollisionOutcome::HitSelf);
    }
    Ok(CollisionOutcome::None)
}
