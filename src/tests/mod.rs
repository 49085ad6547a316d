#![warn(clippy::all, clippy::pedantic)]

pub mod events_tests;
pub mod input_tests;
pub mod state_tests;
