use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    /// Placeholder for a freshly grown segment until the next step populates it.
    pub const OFF_GRID: Position = Position { x: -1, y: -1 };

    pub fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    pub fn moved(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position { x: self.x + dx, y: self.y + dy }
    }

    /// Widened to i32 so opposite corners of the largest grid don't overflow.
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        let dx = (self.x as i32 - other.x as i32).unsigned_abs();
        let dy = (self.y as i32 - other.y as i32).unsigned_abs();
        dx + dy
    }
}

impl From<(i16, i16)> for Position {
    fn from((x, y): (i16, i16)) -> Self {
        Position { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    /// Column/row delta for one step. Rows grow downwards.
    pub fn offset(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Ordered body cells, index 0 is the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    pub body: Vec<Position>,
    pub direction: Direction,
}

impl Snake {
    pub fn new(start: Position, direction: Direction) -> Self {
        Snake { body: vec![start], direction }
    }

    pub fn head(&self) -> Result<&Position> {
        self.body.first().context("Snake body is empty")
    }

    pub fn tail(&self) -> Result<&Position> {
        self.body.last().context("Snake body is empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Any direction is accepted here; reversal policy lives in the session.
    pub fn change_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Where the head lands on the next step.
    pub fn next_head(&self) -> Result<Position> {
        Ok(self.head()?.moved(self.direction))
    }

    /// Every segment takes its predecessor's previous cell, then the head
    /// moves one cell. No clamping: leaving the grid is for the collision
    /// checks to notice.
    pub fn step_forward(&mut self) -> Result<()> {
        let new_head = self.next_head()?;
        let len = self.body.len();
        // memmove semantics, so nothing is read after being overwritten
        self.body.copy_within(..len - 1, 1);
        self.body[0] = new_head;
        Ok(())
    }

    pub fn grow(&mut self) {
        self.body.push(Position::OFF_GRID);
    }

    pub fn contains_point(&self, point: &Position, include_head: bool) -> bool {
        let skip = if include_head { 0 } else { 1 };
        self.body.iter().skip(skip).any(|p| p == point)
    }
}
