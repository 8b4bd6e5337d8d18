//! TUI rendering

pub mod renderer;

pub use renderer::Renderer;
