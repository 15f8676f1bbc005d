use anyhow::Result;
use log::debug;
use std::collections::VecDeque;

use crate::{GameCommand, GameConfig, GameEventMessage, GameState};

/// Drives a `GameState` from wall-clock timestamps at a fixed tick cadence.
pub struct GameEngine {
    state: GameState,
    event_log: Vec<GameEventMessage>,
    pending_commands: VecDeque<GameCommand>,
    tick_duration_ms: u32,
    start_ms: i64,
}

impl GameEngine {
    pub fn new(config: GameConfig, start_ms: i64) -> Result<Self> {
        let tick_duration_ms = config.tick_duration_ms;
        Ok(GameEngine {
            state: GameState::new(config)?,
            event_log: Vec::new(),
            pending_commands: VecDeque::new(),
            tick_duration_ms,
            start_ms,
        })
    }

    pub fn new_with_seed(config: GameConfig, start_ms: i64, rng_seed: u64) -> Result<Self> {
        let tick_duration_ms = config.tick_duration_ms;
        Ok(GameEngine {
            state: GameState::new_with_seed(config, rng_seed)?,
            event_log: Vec::new(),
            pending_commands: VecDeque::new(),
            tick_duration_ms,
            start_ms,
        })
    }

    /// Queue a command for the start of the next tick. Ticks come from
    /// `run_until` only, so a submitted `Tick` is dropped.
    pub fn submit(&mut self, command: GameCommand) {
        if command == GameCommand::Tick {
            debug!("Dropping submitted Tick; ticks are driven by run_until");
            return;
        }
        self.pending_commands.push_back(command);
    }

    /// Run the required amount of ticks so that the game is at the given timestamp.
    pub fn run_until(&mut self, ts_ms: i64) -> Result<Vec<GameEventMessage>> {
        let mut out: Vec<GameEventMessage> = Vec::new();
        if ts_ms <= self.start_ms {
            return Ok(out);
        }
        let target_tick = ((ts_ms - self.start_ms) / self.tick_duration_ms as i64) as u32;

        while self.state.current_tick() < target_tick {
            let tick = self.state.current_tick();

            while let Some(command) = self.pending_commands.pop_front() {
                for event in self.state.exec_command(command)? {
                    out.push(GameEventMessage { tick, event });
                }
            }

            for event in self.state.exec_command(GameCommand::Tick)? {
                out.push(GameEventMessage { tick, event });
            }
        }

        self.event_log.extend(out.iter().cloned());
        Ok(out)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    pub fn event_log(&self) -> &[GameEventMessage] {
        &self.event_log
    }

    pub fn pending_commands(&self) -> usize {
        self.pending_commands.len()
    }

    pub fn current_tick(&self) -> u32 {
        self.state.current_tick()
    }

    pub fn tick_duration_ms(&self) -> u32 {
        self.tick_duration_ms
    }
}
