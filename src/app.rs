//! The synchronous tick loop
//!
//! One logical thread runs input-poll, update, render, sleep in strict
//! sequence. The only suspension point is the inter-tick sleep, so a quit
//! key is observed at the next poll, never mid-sleep.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::thread;
use std::time::Duration;

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Final report handed back once the state machine reaches a terminal status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub captured: u32,
    pub top_score: u32,
    pub quit: bool,
}

pub struct App {
    engine: GameEngine,
    state: GameState,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl App {
    pub fn new(config: GameConfig, top_score: u32) -> Self {
        let mut engine = GameEngine::new(config);
        let mut state = engine.reset();
        state.top_score = top_score;

        Self {
            engine,
            state,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
        }
    }

    /// Run the game to a terminal status. Terminal setup failures abort
    /// before the loop starts; there is no partial state to clean up.
    pub fn run(&mut self) -> Result<GameSummary> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal);

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result?;
        Ok(self.summary())
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            captured: self.state.captured,
            top_score: self.state.top_score,
            quit: self.state.status == GameStatus::Quit,
        }
    }

    fn run_game_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let tick = self.engine.config().tick_interval();

        loop {
            // Input phase: drain whatever arrived during the last sleep
            match self.poll_input()? {
                KeyAction::Quit => self.state.status = GameStatus::Quit,
                KeyAction::GameAction(action) => {
                    self.engine.step(&mut self.state, action);
                }
                KeyAction::None => {}
            }

            // Render phase: the terminal frame is drawn too
            terminal
                .draw(|frame| self.renderer.render(frame, &self.state))
                .context("Failed to draw frame")?;

            if !self.state.is_running() {
                break;
            }

            thread::sleep(tick);
        }

        Ok(())
    }

    /// Non-blocking drain of pending key events. The last steering key wins;
    /// a quit key short-circuits.
    fn poll_input(&self) -> Result<KeyAction> {
        let mut pending: Option<Direction> = None;

        while event::poll(Duration::ZERO).context("Failed to poll input")? {
            let event = event::read().context("Failed to read input")?;

            if let Event::Key(key) = event {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Quit => return Ok(KeyAction::Quit),
                    KeyAction::GameAction(Action::Move(dir)) => pending = Some(dir),
                    _ => {}
                }
            }
        }

        Ok(KeyAction::GameAction(
            pending.map(Action::Move).unwrap_or(Action::Continue),
        ))
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
