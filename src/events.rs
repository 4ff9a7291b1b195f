//! Everything the core tells the presentation layer.  Events are queued in
//! the order they happen and drained once per frame by the host.

use crate::entities::{EnemyId, EnemyKind, Position, ProjectileId};

/// What the HUD shows.  Sent whole so the presenter never has to patch it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub score: u32,
}

impl HudSnapshot {
    /// HP bar fill in `[0, 1]`.
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyRemoval {
    Killed,
    /// Reached the bottom edge and hurt the player.
    Escaped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileRemoval {
    Impact,
    OutOfBounds,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    EnemySpawned {
        id: EnemyId,
        kind: EnemyKind,
        position: Position,
        hp: i32,
    },
    /// A projectile landed; `effect_at` is where the hit effect goes.
    EnemyDamaged {
        id: EnemyId,
        hp: i32,
        effect_at: Position,
    },
    EnemyRemoved {
        id: EnemyId,
        reason: EnemyRemoval,
    },
    ProjectileSpawned {
        id: ProjectileId,
        position: Position,
    },
    ProjectileRemoved {
        id: ProjectileId,
        reason: ProjectileRemoval,
    },
    PlayerDamaged {
        hp: i32,
    },
    LevelUp {
        level: u32,
        scroll_speed_secs: u32,
    },
    HudChanged(HudSnapshot),
    PauseChanged {
        paused: bool,
    },
    GameOver {
        score: u32,
    },
}
