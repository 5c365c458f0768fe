use crossterm::event::Event;
use exam_engine::ExplorerSession;
use ratatui::Frame;

use crate::command::browse::{app::ExplorerData, screens::explorer::ExplorerScreen};

mod explorer;

#[derive(Debug)]
pub enum Screen {
    Explorer(ExplorerScreen),
}

impl Screen {
    #[must_use]
    pub fn explorer(data: ExplorerData, session: ExplorerSession) -> Self {
        Self::Explorer(ExplorerScreen::new(data, session))
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Self::Explorer(screen) => screen.should_exit(),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match self {
            Self::Explorer(screen) => screen.handle_event(event),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self {
            Self::Explorer(screen) => screen.draw(frame),
        }
    }
}
