use crate::{Direction, GameState, Position, check_wall};

/// Greedy autopilot: head for the food while avoiding walls and the body.
/// Returns `None` while the session is paused.
pub fn calculate_ai_move(game_state: &GameState) -> Option<Direction> {
    if !game_state.is_running() {
        return None;
    }

    let snake = game_state.snake();
    let head = *snake.head().ok()?;
    let current_direction = snake.direction;
    let food = *game_state.food();

    // Always remove opposite direction to prevent 180-degree turns
    let possible_directions = Direction::ALL
        .into_iter()
        .filter(|d| !current_direction.is_opposite(d));

    let mut best_direction = current_direction;
    let mut best_score = i32::MIN;

    for direction in possible_directions {
        let new_pos = head.moved(direction);

        if !is_free(game_state, &new_pos) {
            continue;
        }

        let mut score = 0;

        // Prefer moving toward food
        score -= new_pos.manhattan_distance(&food) as i32 * 10;

        // Eating is always worth it
        if new_pos == food {
            score += 100;
        }

        let escape_routes = count_escape_routes(game_state, &new_pos);
        if escape_routes == 0 && new_pos != food {
            continue; // Skip moves that would trap us
        }
        score += escape_routes as i32 * 5;

        if score > best_score {
            best_score = score;
            best_direction = direction;
        }
    }

    Some(best_direction)
}

// The tail cell is vacated during the step, so it doesn't block.
fn is_free(game_state: &GameState, pos: &Position) -> bool {
    if check_wall(pos, game_state.width(), game_state.height()) {
        return false;
    }
    let body = &game_state.snake().body;
    let blocking = body.len().saturating_sub(1);
    !body[..blocking].contains(pos)
}

fn count_escape_routes(game_state: &GameState, pos: &Position) -> u8 {
    Direction::ALL
        .into_iter()
        .filter(|d| is_free(game_state, &pos.moved(*d)))
        .count() as u8
}
