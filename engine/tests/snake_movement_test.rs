use anyhow::Result;
use engine::{Direction, Position, Snake};

#[test]
fn test_single_segment_moves_down_one_row() -> Result<()> {
    let mut snake = Snake::new(Position::new(1, 1), Direction::Down);

    snake.step_forward()?;

    assert_eq!(snake.len(), 1);
    assert_eq!(*snake.head()?, Position::new(1, 2), "Row should grow by exactly one");
    Ok(())
}

#[test]
fn test_each_direction_moves_one_cell() -> Result<()> {
    let cases = [
        (Direction::Up, Position::new(5, 4)),
        (Direction::Down, Position::new(5, 6)),
        (Direction::Left, Position::new(4, 5)),
        (Direction::Right, Position::new(6, 5)),
    ];

    for (direction, expected) in cases {
        let mut snake = Snake::new(Position::new(5, 5), direction);
        snake.step_forward()?;
        assert_eq!(*snake.head()?, expected, "Wrong head after moving {:?}", direction);
    }
    Ok(())
}

#[test]
fn test_body_follows_the_leader() -> Result<()> {
    let mut snake = Snake {
        body: vec![
            Position::new(4, 2),
            Position::new(3, 2),
            Position::new(2, 2),
            Position::new(2, 3),
        ],
        direction: Direction::Right,
    };

    let before = snake.body.clone();
    snake.step_forward()?;

    assert_eq!(snake.body[0], Position::new(5, 2));
    for i in 1..snake.len() {
        assert_eq!(
            snake.body[i], before[i - 1],
            "Segment {} should sit where segment {} was",
            i, i - 1
        );
    }
    Ok(())
}

#[test]
fn test_grow_appends_off_grid_placeholder() {
    let mut snake = Snake::new(Position::new(3, 3), Direction::Down);

    snake.grow();

    assert_eq!(snake.len(), 2);
    assert_eq!(snake.body[1], Position::OFF_GRID);
    assert_eq!(snake.body[0], Position::new(3, 3), "Growing must not move the head");
}

#[test]
fn test_new_tail_takes_previous_tail_cell() -> Result<()> {
    let mut snake = Snake {
        body: vec![Position::new(6, 6), Position::new(6, 5), Position::new(6, 4)],
        direction: Direction::Down,
    };
    let old_tail = *snake.tail()?;

    snake.grow();
    snake.step_forward()?;

    assert_eq!(snake.len(), 4);
    assert_eq!(*snake.tail()?, old_tail);
    assert!(
        !snake.contains_point(&Position::OFF_GRID, true),
        "Placeholder should be replaced after one step"
    );
    Ok(())
}

#[test]
fn test_growth_never_loses_or_duplicates_segments() -> Result<()> {
    let mut snake = Snake::new(Position::new(2, 2), Direction::Right);

    for expected_len in 2..=6 {
        snake.grow();
        snake.step_forward()?;
        assert_eq!(snake.len(), expected_len);
    }

    let mut unique = snake.body.clone();
    unique.sort_by_key(|p| (p.x, p.y));
    unique.dedup();
    assert_eq!(
        unique.len(),
        snake.len(),
        "Straight snake should have distinct cells: {:?}",
        snake.body
    );
    Ok(())
}

#[test]
fn test_no_clamping_at_grid_edge() -> Result<()> {
    let mut snake = Snake::new(Position::new(0, 0), Direction::Left);

    snake.step_forward()?;
    assert_eq!(*snake.head()?, Position::new(-1, 0));

    snake.change_direction(Direction::Up);
    snake.step_forward()?;
    assert_eq!(*snake.head()?, Position::new(-1, -1));
    Ok(())
}

#[test]
fn test_change_direction_accepts_reversal() -> Result<()> {
    let mut snake = Snake::new(Position::new(5, 5), Direction::Right);

    snake.change_direction(Direction::Left);
    assert_eq!(snake.direction, Direction::Left);
    assert_eq!(snake.next_head()?, Position::new(4, 5));
    Ok(())
}
