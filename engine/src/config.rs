use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    DEFAULT_CELL_SIZE, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_PLACEMENT_ATTEMPTS,
    DEFAULT_TICK_INTERVAL_MS, Direction, MIN_GRID_SIDE, Position,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width in cells
    pub grid_width: u16,
    /// Grid height in cells
    pub grid_height: u16,
    /// Cell size in presentation units. The engine itself works in cells.
    pub cell_size: u16,
    /// Seed for food placement. `None` leaves the choice to the caller.
    pub rng_seed: Option<u64>,
    /// Head cell on start and after every reset
    pub start: Position,
    pub start_direction: Direction,
    /// Accept 180 degree turns on snakes longer than one cell
    pub allow_reversal: bool,
    pub max_placement_attempts: u32,
    pub tick_duration_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            rng_seed: None,
            start: Position { x: 1, y: 1 },
            start_direction: Direction::Down,
            allow_reversal: false,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            tick_duration_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Grid dimensions derived from a window measured in presentation units.
    pub fn from_window(width: u32, height: u32, cell_size: u16) -> Result<Self> {
        if cell_size == 0 {
            bail!("Cell size must be non-zero");
        }
        let grid_width = u16::try_from(width / cell_size as u32).context("Window too wide")?;
        let grid_height = u16::try_from(height / cell_size as u32).context("Window too tall")?;
        let config = GameConfig { grid_width, grid_height, cell_size, ..GameConfig::default() };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config {:?}", path))?;
        Self::from_json_str(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            bail!(
                "Grid must be at least {}x{}, got {}x{}",
                MIN_GRID_SIDE, MIN_GRID_SIDE, self.grid_width, self.grid_height
            );
        }
        if self.grid_width > i16::MAX as u16 || self.grid_height > i16::MAX as u16 {
            bail!("Grid {}x{} exceeds cell coordinate range", self.grid_width, self.grid_height);
        }
        if self.cell_size == 0 {
            bail!("Cell size must be non-zero");
        }
        if self.tick_duration_ms == 0 {
            bail!("Tick duration must be non-zero");
        }
        if crate::check_wall(&self.start, self.grid_width, self.grid_height) {
            bail!(
                "Start cell ({}, {}) is outside the {}x{} grid",
                self.start.x, self.start.y, self.grid_width, self.grid_height
            );
        }
        Ok(())
    }
}
