use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    CollisionOutcome, Direction, GameConfig, Position, PseudoRandom, Snake, TerminalKind,
    classify, place_food,
};

/// Running moves to Paused on a wall or self collision, and also when the
/// board is full and no food can be placed (`PlacementExhausted`). Only
/// `GameCommand::Resume` goes back to Running.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Tick,
    Turn { direction: Direction },
    Resume,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SnakeTurned { direction: Direction },
    TurnRejected { direction: Direction },
    FoodEaten { position: Position },
    FoodSpawned { position: Position },
    TerminalCollision { kind: TerminalKind, score: usize },
    PlacementExhausted { score: usize },
    SessionReset,
    Resumed,
}

impl GameEvent {
    /// Events after which the run is over, the session is reset and paused,
    /// and it waits for `Resume`: terminal collisions and a full board.
    pub fn ends_run(&self) -> bool {
        matches!(self, GameEvent::TerminalCollision { .. } | GameEvent::PlacementExhausted { .. })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameEventMessage {
    pub tick: u32,
    pub event: GameEvent,
}

/// One simulation session. Owned by whoever drives the ticks; nothing here
/// is global, so independent sessions can run side by side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameState {
    pub tick: u32,
    pub status: GameStatus,
    pub snake: Snake,
    pub food: Position,
    config: GameConfig,
    // Latest turn request, applied at the start of the next running tick
    pending_direction: Option<Direction>,
    rng: PseudoRandom,
}

impl GameState {
    /// Uses `config.rng_seed`, falling back to a clock-derived seed.
    pub fn new(config: GameConfig) -> Result<Self> {
        let seed = config.rng_seed.unwrap_or_else(clock_seed);
        Self::new_with_seed(config, seed)
    }

    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = PseudoRandom::new(seed);
        let snake = Snake::new(config.start, config.start_direction);
        let food = place_food(
            &mut rng,
            config.grid_width,
            config.grid_height,
            &snake,
            config.max_placement_attempts,
        )
        .context("Failed to place initial food")?;

        Ok(GameState {
            tick: 0,
            status: GameStatus::Running,
            snake,
            food,
            config,
            pending_direction: None,
            rng,
        })
    }

    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Position {
        &self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn width(&self) -> u16 {
        self.config.grid_width
    }

    pub fn height(&self) -> u16 {
        self.config.grid_height
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Length of the snake, which is what the game reports as score.
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    pub fn exec_command(&mut self, command: GameCommand) -> Result<Vec<GameEvent>> {
        let mut out: Vec<GameEvent> = Vec::new();
        match command {
            GameCommand::Tick => {
                if self.is_running() {
                    self.step(&mut out)?;
                }
                self.tick += 1;
            }

            GameCommand::Turn { direction } => {
                if self.is_running() {
                    self.pending_direction = Some(direction);
                } else {
                    debug!("Ignoring turn {:?} while paused", direction);
                }
            }

            GameCommand::Resume => {
                if !self.is_running() {
                    self.apply_event(GameEvent::Resumed, Some(&mut out));
                }
            }
        }

        Ok(out)
    }

    fn step(&mut self, out: &mut Vec<GameEvent>) -> Result<()> {
        if let Some(direction) = self.pending_direction.take() {
            if direction != self.snake.direction {
                let reversal =
                    self.snake.len() >= 2 && self.snake.direction.is_opposite(&direction);
                if reversal && !self.config.allow_reversal {
                    debug!("Rejecting reversal from {:?} to {:?}", self.snake.direction, direction);
                    self.emit(GameEvent::TurnRejected { direction }, out);
                } else {
                    self.emit(GameEvent::SnakeTurned { direction }, out);
                }
            }
        }

        self.snake.step_forward()?;

        let outcome = classify(&self.snake, &self.food, self.width(), self.height())?;
        match outcome {
            CollisionOutcome::AteFood => {
                let position = self.food;
                debug!("Food eaten at ({}, {}) on tick {}", position.x, position.y, self.tick);
                self.emit(GameEvent::FoodEaten { position }, out);

                match place_food(
                    &mut self.rng,
                    self.config.grid_width,
                    self.config.grid_height,
                    &self.snake,
                    self.config.max_placement_attempts,
                ) {
                    Ok(position) => self.emit(GameEvent::FoodSpawned { position }, out),
                    Err(err) => {
                        let score = self.score();
                        warn!("{} (score {})", err, score);
                        self.emit(GameEvent::PlacementExhausted { score }, out);
                        self.reset(out)?;
                    }
                }
            }

            CollisionOutcome::HitWall | CollisionOutcome::HitSelf => {
                let kind = outcome.terminal_kind().context("Terminal outcome without a kind")?;
                let score = self.score();
                info!("Terminal collision {:?} on tick {} with score {}", kind, self.tick, score);
                self.emit(GameEvent::TerminalCollision { kind, score }, out);
                self.reset(out)?;
            }

            CollisionOutcome::None => {}
        }

        Ok(())
    }

    /// Fresh snake on the start cell and freshly placed food.
    fn reset(&mut self, out: &mut Vec<GameEvent>) -> Result<()> {
        self.emit(GameEvent::SessionReset, out);
        let position = place_food(
            &mut self.rng,
            self.config.grid_width,
            self.config.grid_height,
            &self.snake,
            self.config.max_placement_attempts,
        )
        .context("Failed to place food after reset")?;
        self.emit(GameEvent::FoodSpawned { position }, out);
        Ok(())
    }

    fn emit(&mut self, event: GameEvent, out: &mut Vec<GameEvent>) {
        out.push(event.clone());
        self.apply_event(event, None);
    }

    pub fn apply_event(&mut self, event: GameEvent, out: Option<&mut Vec<GameEvent>>) {
        if let Some(out) = out {
            out.push(event.clone());
        }

        match event {
            GameEvent::SnakeTurned { direction } => {
                self.snake.change_direction(direction);
            }

            GameEvent::TurnRejected { .. } => {}

            GameEvent::FoodEaten { .. } => {
                self.snake.grow();
            }

            GameEvent::FoodSpawned { position } => {
                self.food = position;
            }

            GameEvent::TerminalCollision { .. } | GameEvent::PlacementExhausted { .. } => {
                self.status = GameStatus::Paused;
            }

            GameEvent::SessionReset => {
                info!("Resetting session");
                self.snake = Snake::new(self.config.start, self.config.start_direction);
                self.pending_direction = None;
            }

            GameEvent::Resumed => {
                self.status = GameStatus::Running;
            }
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
