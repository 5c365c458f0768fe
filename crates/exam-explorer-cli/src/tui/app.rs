use crossterm::event::Event;
use ratatui::Frame;

/// Trait for TUI applications run by [`Tui::run`](super::Tui::run).
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, event: &Event);

    /// Draws the screen. Called after every handled event.
    fn draw(&self, frame: &mut Frame);
}
