//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling (the navigation shell)
//! - `events` - Background fetch event processing
//! - `render` - View rendering dispatch
//! - `cards` - Article card widget
//! - `status` - Status bar widget

mod cards;
mod events;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};

use crate::app::Category;

/// Frames of the loading spinner animation.
pub(crate) const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Set the terminal window title for the selected category.
///
/// This is the shell's side effect, applied after category selection; the
/// feed controller itself knows nothing about window titles.
pub fn set_window_title(category: Category) {
    use crossterm::{execute, terminal::SetTitle};
    if let Err(e) = execute!(std::io::stdout(), SetTitle(category.window_title())) {
        tracing::debug!(error = %e, "Failed to set terminal title");
    }
}
