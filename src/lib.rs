//! Terminal snake game
//!
//! This library provides:
//! - Core game logic with no I/O dependencies (game module)
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Persistent top-score storage (score module)
//! - The synchronous tick loop tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod render;
pub mod score;
