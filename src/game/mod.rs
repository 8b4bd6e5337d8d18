//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepOutcome};
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
