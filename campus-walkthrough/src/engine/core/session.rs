use bevy::prelude::*;

use crate::engine::board::tracker::BoardState;

/// Session-scoped bookkeeping shared by the per-frame core systems.
#[derive(Resource, Debug, Default)]
pub struct WalkthroughSession {
    pub board: BoardState,
    /// Presentation flag observed on the previous frame.
    pub was_presenting: bool,
    pub proxy_warning_logged: bool,
}

impl WalkthroughSession {
    /// Start a fresh presentation: board cleared, warnings re-armed.
    pub fn restart(&mut self) {
        self.board = BoardState::default();
        self.proxy_warning_logged = false;
    }
}
