use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use crossterm::event::KeyCode;

/// Player commands understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Rotate,
    SoftDrop,
    HardDrop,
}

impl Action {
    /// Maps a key to a game action. Keys without a binding map to `None` and are ignored.
    #[must_use]
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') => Some(Action::Left),
            KeyCode::Right | KeyCode::Char('d') => Some(Action::Right),
            KeyCode::Up | KeyCode::Char('w') => Some(Action::Rotate),
            KeyCode::Down | KeyCode::Char('s') => Some(Action::SoftDrop),
            KeyCode::Char(' ') => Some(Action::HardDrop),
            _ => None,
        }
    }
}

/// Actions received since the last update, applied in arrival order before the next tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Action>,
}

impl InputQueue {
    pub fn push(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Action> + '_ {
        self.pending.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
