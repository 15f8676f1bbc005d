/// Default grid width in cells (1000px window at 40px per cell)
pub const DEFAULT_GRID_WIDTH: u16 = 25;

/// Default grid height in cells (800px window at 40px per cell)
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default cell size in presentation units
pub const DEFAULT_CELL_SIZE: u16 = 40;

/// Default tick interval in milliseconds for game loops
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 120;

/// Random draws tried before food placement falls back to scanning free cells
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// Smallest grid side the session accepts
pub const MIN_GRID_SIDE: u16 = 2;
