//! HP / XP / level / score bookkeeping.
//!
//! Every mutation ends with a `HudChanged` event so the presenter can
//! redraw the HUD from a single snapshot.

use tracing::info;

use crate::events::{GameEvent, HudSnapshot};

const START_HP: i32 = 3;
const START_XP_TO_NEXT_LEVEL: u32 = 10;
/// Added to the threshold on every level-up.
const XP_THRESHOLD_STEP: u32 = 10;

pub const KILL_XP: u32 = 5;
pub const KILL_SCORE: u32 = 10;

const SCROLL_SPEED_BASE_SECS: i64 = 15;
const SCROLL_SPEED_MIN_SECS: i64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStats {
    pub hp: i32,
    pub max_hp: i32,
    pub xp: u32,
    pub level: u32,
    pub xp_to_next_level: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            hp: START_HP,
            max_hp: START_HP,
            xp: 0,
            level: 1,
            xp_to_next_level: START_XP_TO_NEXT_LEVEL,
        }
    }
}

/// Background scroll period in seconds for a given level: one second
/// faster per level, never below five.
pub fn scroll_speed_secs(level: u32) -> u32 {
    (SCROLL_SPEED_BASE_SECS - i64::from(level)).max(SCROLL_SPEED_MIN_SECS) as u32
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progression {
    pub stats: PlayerStats,
    pub score: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            hp: self.stats.hp,
            max_hp: self.stats.max_hp,
            level: self.stats.level,
            xp: self.stats.xp,
            xp_to_next_level: self.stats.xp_to_next_level,
            score: self.score,
        }
    }

    pub fn scroll_speed_secs(&self) -> u32 {
        scroll_speed_secs(self.stats.level)
    }

    /// Adds XP and levels up when the threshold is reached.  Overflow past
    /// the threshold is discarded: xp restarts at zero on every level-up.
    pub fn gain_xp(&mut self, amount: u32, events: &mut Vec<GameEvent>) {
        let stats = &mut self.stats;
        stats.xp = stats.xp.saturating_add(amount);
        while stats.xp >= stats.xp_to_next_level {
            stats.level += 1;
            stats.xp = 0;
            stats.xp_to_next_level += XP_THRESHOLD_STEP;

            let scroll = scroll_speed_secs(stats.level);
            info!(level = stats.level, scroll_speed_secs = scroll, "level up");
            events.push(GameEvent::LevelUp {
                level: stats.level,
                scroll_speed_secs: scroll,
            });
        }
        events.push(GameEvent::HudChanged(self.hud()));
    }

    /// Returns `true` once hp has dropped to zero or below.
    pub fn apply_damage_to_player(&mut self, amount: i32, events: &mut Vec<GameEvent>) -> bool {
        self.stats.hp -= amount;
        events.push(GameEvent::PlayerDamaged { hp: self.stats.hp });
        events.push(GameEvent::HudChanged(self.hud()));
        self.stats.hp <= 0
    }

    /// Credits one confirmed kill: score first so the HUD refresh from
    /// `gain_xp` already carries it.
    pub fn record_kill(&mut self, events: &mut Vec<GameEvent>) {
        self.score += KILL_SCORE;
        self.gain_xp(KILL_XP, events);
    }
}
