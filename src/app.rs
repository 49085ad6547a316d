#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::info;
use std::error;

use crate::Clock;
use crate::config::{Config, DisplayConfig};
use crate::events::GameListener;
use crate::input::{Action, InputQueue};
use crate::sound::AudioState;
use crate::state::{Frame, GameState};
use crate::systems::{game_tick_system, input_system, restart_system};

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// Score display. Tracks what the player has been told, including the final score.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub final_score: Option<u32>,
}

impl GameListener for Scoreboard {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn on_game_over(&mut self, final_score: u32) {
        info!("Final score: {final_score}");
        self.score = final_score;
        self.final_score = Some(final_score);
    }
}

/// Most recent render request from the game loop.
#[derive(Resource, Debug, Clone, Default)]
pub struct LatestFrame {
    pub frame: Option<Frame>,
}

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub display: DisplayConfig,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            GameState::default(),
            AudioState::new(&config.audio),
            config.display.clone(),
        )
    }

    pub fn with_parts(game_state: GameState, audio_state: AudioState, display: DisplayConfig) -> Self {
        let mut world = World::new();
        let frame = game_state.frame();
        world.insert_resource(Clock::new());
        world.insert_resource(game_state);
        world.insert_resource(audio_state);
        world.insert_resource(InputQueue::default());
        world.insert_resource(Scoreboard::default());
        world.insert_resource(LatestFrame { frame: Some(frame) });

        Self {
            world,
            should_quit: false,
            display,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.world.resource::<Clock>().now_ms()
    }

    /// Queues an action for the next update; the tick in progress is never interrupted.
    pub fn queue_action(&mut self, action: Action) {
        self.world.resource_mut::<InputQueue>().push(action);
    }

    /// One scheduler step: pending input first, then the timed tick.
    pub fn update(&mut self, now_ms: u64) {
        input_system(&mut self.world);
        game_tick_system(&mut self.world, now_ms);
    }

    /// Reset the game state
    pub fn restart(&mut self) {
        restart_system(&mut self.world);
    }

    /// Frame to draw: the last one the loop produced, or the live state before the first tick.
    pub fn frame(&self) -> Frame {
        self.world
            .resource::<LatestFrame>()
            .frame
            .clone()
            .unwrap_or_else(|| self.world.resource::<GameState>().frame())
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        self.world.resource::<Scoreboard>()
    }

    pub fn toggle_music(&mut self) {
        self.world.resource_mut::<AudioState>().toggle_music();
    }

    pub fn toggle_sound(&mut self) {
        let mut audio_state = self.world.resource_mut::<AudioState>();
        audio_state.toggle_sound();
        info!("Sound effects {}", if audio_state.is_sound_enabled() { "on" } else { "off" });
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        let mut audio_state = self.world.resource_mut::<AudioState>();
        let volume = audio_state.get_volume();
        audio_state.set_volume(volume + delta);
    }
}
