//! Session configuration.  The defaults reproduce the reference game.

use std::time::Duration;

use crate::entities::{Arena, ENEMY_HEIGHT, ENEMY_WIDTH, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::error::ConfigError;
use crate::spawner::DEFAULT_SPAWN_INTERVAL;

pub const DEFAULT_ARENA_WIDTH: f32 = 400.0;
pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;
pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub spawn_interval: Duration,
    /// Keep the spawn timer running while the HUD is expanded.
    pub spawn_while_paused: bool,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Frames per second the host presents at.
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            spawn_while_paused: true,
            seed: None,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl GameConfig {
    pub fn arena(&self) -> Arena {
        Arena {
            width: self.arena_width,
            height: self.arena_height,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// The arena has to fit one enemy across and the player plus one enemy
    /// vertically, or spawning and escaping stop making sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_width = ENEMY_WIDTH.max(PLAYER_WIDTH);
        let min_height = ENEMY_HEIGHT + PLAYER_HEIGHT;
        let width_ok = self.arena_width.is_finite() && self.arena_width >= min_width;
        let height_ok = self.arena_height.is_finite() && self.arena_height >= min_height;
        if !width_ok || !height_ok {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                min_width,
                min_height,
            });
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}
