pub mod app;
pub mod components;
pub mod config;
pub mod events;
pub mod game;
pub mod generator;
pub mod input;
pub mod sound;
pub mod state;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::Instant;

/// Monotonic millisecond clock driving the game loop.
#[derive(Resource, Debug, Clone)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created. Never goes backwards.
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
