//! Top-score persistence
//!
//! A single text file holding the best captured count as a decimal integer.
//! Reads fall back to 0 on any failure; writes are best-effort and never
//! interrupt the game.

use std::fs;
use std::path::{Path, PathBuf};

pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored top score. A missing or unparsable file yields 0.
    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Persist `captured` if it beats the stored top score, returning the
    /// resulting top score either way. Write failures are ignored; a stale
    /// file never changes the game outcome.
    pub fn record(&self, captured: u32) -> u32 {
        let top = self.load();
        if captured > top {
            let _ = fs::write(&self.path, captured.to_string());
            captured
        } else {
            top
        }
    }
}
