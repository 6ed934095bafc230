//! Snake Evolution - a terminal Snake game with a ten-apple session goal
//!
//! This library provides:
//! - Core game logic: tick engine, collision check, apple placement (game module)
//! - Direction intents from keyboard, joystick and buttons (input module)
//! - High score persistence and session summaries (session module)
//! - TUI rendering (render module) and on-screen diagnostics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
