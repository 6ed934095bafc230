use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::action::Direction;
use super::state::Position;

/// Largest grid the board drawing can lay out in `u16` terminal cells
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Cell occupied by the single-segment snake at session start
    pub initial_head: Position,
    /// Direction of travel at session start
    pub initial_direction: Direction,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
    /// Apples that complete a session
    pub max_apples_per_session: u32,
    /// Score awarded for each apple
    pub points_per_apple: u32,

    // Joystick geometry, in pointer units (one terminal column = 10 units)
    /// Drag distance below which the joystick reports no direction
    pub joystick_deadzone: f32,
    /// Radius the knob is clamped to
    pub joystick_max_radius: f32,

    /// Terminals narrower than this many columns get the compact layout
    pub compact_width: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_head: Position::new(10, 10),
            initial_direction: Direction::Right,
            tick_interval_ms: 150,
            max_apples_per_session: 10,
            points_per_apple: 10,
            joystick_deadzone: 20.0,
            joystick_max_radius: 40.0,
            compact_width: 80,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size, centring the snake
    pub fn new(grid_size: usize) -> Self {
        let center = (grid_size / 2) as i32;
        Self {
            grid_size,
            initial_head: Position::new(center, center),
            ..Default::default()
        }
    }

    /// Load a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// Returns `Ok(())` if all parameters are valid, `Err(String)` with an
    /// error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 2 {
            return Err(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            ));
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "grid_size must be at most {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            ));
        }

        let size = self.grid_size as i32;
        let head = self.initial_head;
        if head.x < 0 || head.x >= size || head.y < 0 || head.y >= size {
            return Err(format!(
                "initial_head ({}, {}) lies outside a {}x{} grid",
                head.x, head.y, size, size
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        if self.max_apples_per_session == 0 {
            return Err("max_apples_per_session must be at least 1".to_string());
        }

        // A snake of length cap + 1 must leave room for one more apple.
        let cells = self.grid_size * self.grid_size;
        if self.max_apples_per_session as usize + 1 >= cells {
            return Err(format!(
                "max_apples_per_session ({}) leaves no free cell on a {}-cell grid",
                self.max_apples_per_session, cells
            ));
        }

        if self.joystick_deadzone < 0.0 {
            return Err(format!(
                "joystick_deadzone must be non-negative, got {}",
                self.joystick_deadzone
            ));
        }

        if self.joystick_deadzone >= self.joystick_max_radius {
            return Err(format!(
                "joystick_deadzone ({}) must be smaller than joystick_max_radius ({})",
                self.joystick_deadzone, self.joystick_max_radius
            ));
        }

        Ok(())
    }
}
