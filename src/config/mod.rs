pub mod loader;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    /// Master volume applied to everything, 0.0 to 1.0
    pub volume: f32,
    pub music_volume: f32,
    pub move_volume: f32,
    pub clear_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            volume: 1.0,
            music_volume: 0.3,
            move_volume: 0.5,
            clear_volume: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Delay between frames; 16 ms is roughly one animation frame
    pub frame_interval_ms: u64,
    pub show_grid: bool,
    pub show_next: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            show_grid: false,
            show_next: true,
        }
    }
}
