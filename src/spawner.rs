//! Fixed-interval enemy spawning on the wall clock, independent of the
//! frame cadence.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::entities::{EnemyId, EnemyKind, GameState, Position, ENEMY_WIDTH};
use crate::events::GameEvent;

pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_millis(2000);

/// Cumulative upper bounds of the kind buckets:
/// 30% Normal, 20% Fast, 20% Tank, 30% Explosive.
const KIND_THRESHOLDS: [(f64, EnemyKind); 3] = [
    (0.3, EnemyKind::Normal),
    (0.5, EnemyKind::Fast),
    (0.7, EnemyKind::Tank),
];

/// Maps a uniform draw in `[0, 1)` to an enemy kind.
pub fn roll_kind(roll: f64) -> EnemyKind {
    KIND_THRESHOLDS
        .iter()
        .find(|(bound, _)| roll < *bound)
        .map(|&(_, kind)| kind)
        .unwrap_or(EnemyKind::Explosive)
}

/// Accumulates elapsed time and reports how many spawn intervals have
/// completed.
#[derive(Clone, Debug)]
pub struct Spawner {
    interval: Duration,
    elapsed: Duration,
}

impl Spawner {
    /// `interval` must be non-zero; `GameConfig::validate` enforces it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time already counted towards the next spawn.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }
}

/// Adds one enemy of a random kind at a random column along the top edge.
pub fn spawn_enemy(
    state: &mut GameState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> EnemyId {
    let kind = roll_kind(rng.gen::<f64>());
    let max_x = state.arena.width - ENEMY_WIDTH;
    let x = if max_x > 0.0 {
        rng.gen_range(0.0..max_x)
    } else {
        0.0
    };
    let position = Position::new(x, 0.0);
    let id = state.registry.spawn_enemy(kind, position);

    debug!(id = id.0, ?kind, x, "enemy spawned");
    events.push(GameEvent::EnemySpawned {
        id,
        kind,
        position,
        hp: kind.max_hp(),
    });
    id
}
