use anyhow::Result;
use engine::{Direction, GameCommand, GameConfig, GameEngine, GameEvent, Position};

fn engine_config() -> GameConfig {
    GameConfig { tick_duration_ms: 100, ..GameConfig::default() }
}

#[test]
fn test_run_until_runs_due_ticks() -> Result<()> {
    let mut engine = GameEngine::new_with_seed(engine_config(), 1000, 42)?;

    engine.run_until(1000)?;
    assert_eq!(engine.current_tick(), 0);

    engine.run_until(1350)?;
    assert_eq!(engine.current_tick(), 3);

    // Going back in time runs nothing
    engine.run_until(1200)?;
    assert_eq!(engine.current_tick(), 3);
    assert_eq!(*engine.state().snake().head()?, Position::new(1, 4));
    Ok(())
}

#[test]
fn test_submitted_turn_lands_on_next_tick() -> Result<()> {
    let mut engine = GameEngine::new_with_seed(engine_config(), 0, 42)?;
    engine.run_until(300)?;

    engine.submit(GameCommand::Turn { direction: Direction::Right });
    assert_eq!(engine.pending_commands(), 1);
    assert_eq!(engine.state().snake().direction, Direction::Down);

    let events = engine.run_until(400)?;

    assert_eq!(engine.pending_commands(), 0);
    let turned: Vec<_> = events
        .iter()
        .filter(|m| m.event == GameEvent::SnakeTurned { direction: Direction::Right })
        .collect();
    assert_eq!(turned.len(), 1);
    assert_eq!(turned[0].tick, 3);
    assert_eq!(*engine.state().snake().head()?, Position::new(2, 4));
    Ok(())
}

#[test]
fn test_submitted_tick_is_dropped() -> Result<()> {
    let mut engine = GameEngine::new_with_seed(engine_config(), 0, 1)?;
    engine.submit(GameCommand::Tick);
    assert_eq!(engine.pending_commands(), 0);
    engine.run_until(100)?;
    assert_eq!(engine.current_tick(), 1);
    Ok(())
}

#[test]
fn test_event_log_keeps_everything() -> Result<()> {
    let mut engine = GameEngine::new_with_seed(engine_config(), 0, 9)?;
    engine.submit(GameCommand::Turn { direction: Direction::Up });

    // Up from row 1: row 0, then off the top
    let events = engine.run_until(200)?;

    assert_eq!(events, engine.event_log());
    assert!(events.iter().any(|m| m.event.ends_run()), "Expected a terminal event: {:?}", events);
    assert!(!engine.state().is_running());

    let json = engine.state_json()?;
    assert!(json.contains("\"status\":\"Paused\""), "Unexpected snapshot {}", json);
    Ok(())
}
