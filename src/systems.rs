use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::app::{LatestFrame, Scoreboard};
use crate::events::{GameEvent, dispatch};
use crate::input::{Action, InputQueue};
use crate::sound::AudioState;
use crate::state::GameState;

/// Applies every queued action in arrival order.
pub fn input_system(world: &mut World) {
    let actions: Vec<Action> = world.resource_mut::<InputQueue>().drain().collect();
    if actions.is_empty() {
        return;
    }

    let mut events = Vec::new();
    {
        let mut game_state = world.resource_mut::<GameState>();
        for action in actions {
            debug!("Applying {action:?}");
            events.extend(game_state.apply(action));
        }
    }

    dispatch_events(world, &events);
}

/// Runs one scheduler tick and publishes the resulting frame.
pub fn game_tick_system(world: &mut World, now_ms: u64) {
    trace!("Game tick at {now_ms} ms");

    let tick = world.resource_mut::<GameState>().tick(now_ms);
    dispatch_events(world, &tick.events);
    world.resource_mut::<LatestFrame>().frame = Some(tick.frame);
}

/// Starts a new session and throws away input meant for the old one.
pub fn restart_system(world: &mut World) {
    world.resource_mut::<InputQueue>().clear();
    let events = world.resource_mut::<GameState>().reset();
    dispatch_events(world, &events);

    world.resource_mut::<Scoreboard>().final_score = None;
    let frame = world.resource::<GameState>().frame();
    world.resource_mut::<LatestFrame>().frame = Some(frame);
}

fn dispatch_events(world: &mut World, events: &[GameEvent]) {
    if events.is_empty() {
        return;
    }

    if let Some(mut audio_state) = world.get_resource_mut::<AudioState>() {
        dispatch(events, &mut *audio_state);
    }
    if let Some(mut scoreboard) = world.get_resource_mut::<Scoreboard>() {
        dispatch(events, &mut *scoreboard);
    }
}
