//! The session controller: owns the game state and schedules ticks.
//!
//! The host calls [`Game::frame`] once per presented frame and
//! [`Game::advance_clock`] with the wall-clock time since the last call.
//! Ticks follow frames, spawns follow the clock.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{EnemyId, GameState, RunStatus};
use crate::error::ConfigError;
use crate::events::GameEvent;
use crate::input::Command;
use crate::spawner::{self, Spawner};

pub struct Game {
    state: GameState,
    config: GameConfig,
    spawner: Spawner,
    rng: StdRng,
    events: Vec<GameEvent>,
    /// At most one tick is ever owed to the next frame.
    frame_requested: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::new(config.arena());
        let events = vec![GameEvent::HudChanged(state.progress.hud())];
        Ok(Self {
            spawner: Spawner::new(config.spawn_interval),
            state,
            config,
            rng,
            events,
            frame_requested: true,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    pub fn is_paused(&self) -> bool {
        self.state.status == RunStatus::Paused
    }

    pub fn is_over(&self) -> bool {
        self.state.status == RunStatus::GameOver
    }

    /// Final score of a finished run.
    pub fn final_score(&self) -> Option<u32> {
        self.is_over().then_some(self.state.progress.score)
    }

    pub fn scroll_speed_secs(&self) -> u32 {
        self.state.progress.scroll_speed_secs()
    }

    /// Hands everything that happened since the last call to the presenter.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Frame cadence ───────────────────────────────────────────────────────

    /// Per-frame callback.  Runs one tick if a frame was requested and the
    /// game is Running, then requests the next frame only if it still is.
    /// Returns whether a tick ran.
    pub fn frame(&mut self) -> bool {
        if !std::mem::take(&mut self.frame_requested) {
            return false;
        }
        if self.state.status != RunStatus::Running {
            return false;
        }
        self.state = compute::tick(&self.state, &mut self.events);
        self.frame_requested = self.state.status == RunStatus::Running;
        true
    }

    /// Feeds wall-clock time to the spawner.  Returns how many enemies were
    /// spawned.
    pub fn advance_clock(&mut self, dt: Duration) -> u32 {
        match self.state.status {
            RunStatus::GameOver => return 0,
            RunStatus::Paused if !self.config.spawn_while_paused => return 0,
            _ => {}
        }
        let due = self.spawner.advance(dt);
        for _ in 0..due {
            self.spawn_enemy();
        }
        due
    }

    /// Spawns one enemy now, outside the timer.  Nothing spawns after game
    /// over.
    pub fn spawn_enemy(&mut self) -> Option<EnemyId> {
        if self.is_over() {
            return None;
        }
        Some(spawner::spawn_enemy(
            &mut self.state,
            &mut self.rng,
            &mut self.events,
        ))
    }

    // ── Commands ────────────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetPlayerX(x) => self.set_player_x(x),
            Command::Fire => self.fire(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    pub fn set_player_x(&mut self, x: f32) {
        if self.is_over() {
            return;
        }
        self.state = compute::move_player_to(&self.state, x);
    }

    pub fn fire(&mut self) {
        self.state = compute::player_fire(&self.state, &mut self.events);
    }

    /// Running ⇄ Paused.  Resuming requests a single frame; toggling
    /// quickly never queues more than one.  No effect after game over.
    pub fn toggle_pause(&mut self) {
        let paused = match self.state.status {
            RunStatus::GameOver => return,
            RunStatus::Running => {
                self.state.status = RunStatus::Paused;
                true
            }
            RunStatus::Paused => {
                self.state.status = RunStatus::Running;
                self.frame_requested = true;
                false
            }
        };
        debug!(paused, frame = self.state.frame, "pause toggled");
        self.events.push(GameEvent::PauseChanged { paused });
    }
}
