use thiserror::Error;

use crate::{Position, PseudoRandom, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free cell left for food on a {width}x{height} grid")]
    Exhausted { width: u16, height: u16 },
}

/// Food goes in `[1, width-1] x [1, height-1]`; row and column 0 stay clear.
pub fn placement_bounds(width: u16, height: u16) -> ((i16, i16), (i16, i16)) {
    ((1, width as i16 - 1), (1, height as i16 - 1))
}

/// Random draws first, then a scan of the free cells so a crowded grid can't
/// stall placement.
pub fn place_food(
    rng: &mut PseudoRandom,
    width: u16,
    height: u16,
    snake: &Snake,
    max_attempts: u32,
) -> Result<Position, PlacementError> {
    let ((min_x, max_x), (min_y, max_y)) = placement_bounds(width, height);

    for _ in 0..max_attempts {
        let position = Position {
            x: rng.next_in_range(min_x, max_x),
            y: rng.next_in_range(min_y, max_y),
        };
        if !snake.contains_point(&position, true) {
            return Ok(position);
        }
    }

    let free: Vec<Position> = (min_y..=max_y)
        .flat_map(|y| (min_x..=max_x).map(move |x| Position { x, y }))
        .filter(|p| !snake.contains_point(p, true))
        .collect();

    if free.is_empty() {
        return Err(PlacementError::Exhausted { width, height });
    }
    Ok(free[rng.next_index(free.len())])
}
