/// All game entity types — pure data, no logic beyond geometry lookups.

use crate::progression::Progression;
use crate::registry::EntityRegistry;

// ── Fixed dimensions (arena pixels) ───────────────────────────────────────────

pub const ENEMY_WIDTH: f32 = 50.0;
pub const ENEMY_HEIGHT: f32 = 50.0;

pub const PROJECTILE_WIDTH: f32 = 20.0;
pub const PROJECTILE_HEIGHT: f32 = 20.0;
/// Upward travel per tick.
pub const PROJECTILE_SPEED: f32 = 5.0;

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
    /// Same speed as `Normal`; only the presentation treats it differently.
    Explosive,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Explosive,
    ];

    pub fn max_hp(self) -> i32 {
        match self {
            EnemyKind::Normal => 3,
            EnemyKind::Fast => 1,
            EnemyKind::Tank => 5,
            EnemyKind::Explosive => 2,
        }
    }

    /// Downward travel per tick.
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Fast => 4.0,
            EnemyKind::Tank => 1.0,
            EnemyKind::Normal | EnemyKind::Explosive => 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Top-left corner of an entity's box.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn at(position: Position, width: f32, height: f32) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x + width,
            bottom: position.y + height,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

// ── Live entities ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub hp: i32,
    pub max_hp: i32,
    pub position: Position,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::at(self.position, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Position,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::at(self.position, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// The player only moves horizontally; `x` is the left edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
}

impl Player {
    pub fn bounds(&self, arena: &Arena) -> Rect {
        Rect::at(
            Position::new(self.x, arena.player_top()),
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }

    /// Where a fired projectile appears: centred on the player, level with
    /// the player's top edge.
    pub fn muzzle(&self, arena: &Arena) -> Position {
        Position::new(
            self.x + PLAYER_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0,
            arena.player_top(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn player_top(&self) -> f32 {
        self.height - PLAYER_HEIGHT
    }

    pub fn max_player_x(&self) -> f32 {
        (self.width - PLAYER_WIDTH).max(0.0)
    }

    pub fn clamp_player_x(&self, x: f32) -> f32 {
        if x.is_nan() {
            return 0.0;
        }
        x.clamp(0.0, self.max_player_x())
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Paused,
    GameOver,
}

/// The entire session.  Cloneable so the per-tick pass can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub progress: Progression,
    pub registry: EntityRegistry,
    pub status: RunStatus,
    /// Number of ticks that have run.
    pub frame: u64,
    pub arena: Arena,
}

impl GameState {
    /// A fresh Running session with the player centred at the bottom.
    pub fn new(arena: Arena) -> Self {
        Self {
            player: Player {
                x: arena.clamp_player_x((arena.width - PLAYER_WIDTH) / 2.0),
            },
            progress: Progression::new(),
            registry: EntityRegistry::new(),
            status: RunStatus::Running,
            frame: 0,
            arena,
        }
    }
}
