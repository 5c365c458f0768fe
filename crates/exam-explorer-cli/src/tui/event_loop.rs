use crossterm::event;

use crate::tui::event::TuiEvent;

/// Yields a render event whenever the last terminal event may have changed
/// the state, and otherwise blocks on the terminal.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        // Initial render is required on startup
        Self { dirty: true }
    }

    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(event.into())
    }
}
