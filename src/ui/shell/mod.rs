//! Dashboard shell: sidebar navigation plus one visible page section
//!
//! Split into state, update logic and rendering components

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

// Re-export main types and functions for external use
pub use renderer::render_shell;
pub use state::ShellState;
