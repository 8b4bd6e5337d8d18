//! Persistent top-score storage

pub mod store;

pub use store::ScoreStore;
