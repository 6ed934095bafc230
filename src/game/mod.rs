//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The tick engine, collision check and apple placement are pure apart from the
//! engine's random number generator.

pub mod action;
pub mod apple;
pub mod collision;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use apple::place_apple;
pub use collision::{check_collision, is_collision};
pub use config::{GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, TickResult};
pub use state::{CollisionType, GameState, Outcome, Phase, Position, Snake};
