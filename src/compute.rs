/// Game-logic passes.
///
/// The public entry points take an immutable reference to the current
/// `GameState` and return a brand-new `GameState`; everything they did is
/// reported through the `events` queue.  Removals never splice a
/// collection that is being walked: each pass rebuilds the collection from
/// its survivors.

use tracing::{info, trace};

use crate::entities::{GameState, RunStatus, PROJECTILE_SPEED};
use crate::events::{EnemyRemoval, GameEvent, ProjectileRemoval};

/// HP lost when an enemy reaches the bottom edge.
pub const ESCAPE_DAMAGE: i32 = 1;

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Put the player's left edge at `x`, clamped to the arena.
pub fn move_player_to(state: &GameState, x: f32) -> GameState {
    let mut next = state.clone();
    next.player.x = state.arena.clamp_player_x(x);
    next
}

/// Fire one projectile from the player's muzzle.  Ignored after game over.
pub fn player_fire(state: &GameState, events: &mut Vec<GameEvent>) -> GameState {
    if state.status == RunStatus::GameOver {
        return state.clone();
    }
    let mut next = state.clone();
    let origin = next.player.muzzle(&next.arena);
    let id = next.registry.spawn_projectile(origin);
    events.push(GameEvent::ProjectileSpawned { id, position: origin });
    next
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing unless Running.
///
/// Order matters: enemies move and escape first, so a projectile can never
/// credit a kill on an enemy that already left through the bottom.
pub fn tick(state: &GameState, events: &mut Vec<GameEvent>) -> GameState {
    let mut next = state.clone();
    if next.status != RunStatus::Running {
        return next;
    }
    next.frame += 1;

    // ── 1. Enemies descend; escapees hurt the player ────────────────────────
    if move_enemies(&mut next, events) {
        next.status = RunStatus::GameOver;
        let score = next.progress.score;
        info!(score, frame = next.frame, "game over");
        events.push(GameEvent::GameOver { score });
        return next;
    }

    // ── 2. Projectiles climb; leave through the top ─────────────────────────
    move_projectiles(&mut next, events);

    // ── 3. Projectile ↔ enemy combat ────────────────────────────────────────
    resolve_collisions(&mut next, events);

    trace!(
        frame = next.frame,
        enemies = next.registry.enemy_count(),
        projectiles = next.registry.projectile_count(),
        "tick"
    );
    next
}

/// Moves every enemy down by its kind speed.  An enemy whose bottom edge
/// reaches the arena floor deals `ESCAPE_DAMAGE` and is removed.
///
/// Returns `true` if the player died; enemies after the fatal one are left
/// where they were.
pub fn move_enemies(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let floor = state.arena.height;
    let enemies = std::mem::take(&mut state.registry.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());
    let mut player_dead = false;

    for mut enemy in enemies {
        if player_dead {
            survivors.push(enemy);
            continue;
        }
        enemy.position.y += enemy.kind.speed();
        if enemy.bounds().bottom >= floor {
            events.push(GameEvent::EnemyRemoved {
                id: enemy.id,
                reason: EnemyRemoval::Escaped,
            });
            player_dead = state.progress.apply_damage_to_player(ESCAPE_DAMAGE, events);
        } else {
            survivors.push(enemy);
        }
    }

    state.registry.enemies = survivors;
    player_dead
}

/// Moves every projectile up; any whose top goes above the arena is dropped.
pub fn move_projectiles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let projectiles = std::mem::take(&mut state.registry.projectiles);
    state.registry.projectiles = projectiles
        .into_iter()
        .filter_map(|mut p| {
            p.position.y -= PROJECTILE_SPEED;
            if p.position.y < 0.0 {
                events.push(GameEvent::ProjectileRemoved {
                    id: p.id,
                    reason: ProjectileRemoval::OutOfBounds,
                });
                None
            } else {
                Some(p)
            }
        })
        .collect();
}

/// Each projectile hits at most the first overlapping enemy (in spawn
/// order) and is consumed by that hit.  Enemies at zero hp are removed
/// before the next projectile is checked, and the kill is credited.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let projectiles = std::mem::take(&mut state.registry.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for projectile in projectiles {
        let bounds = projectile.bounds();
        let hit = state
            .registry
            .enemies
            .iter()
            .position(|e| bounds.overlaps(&e.bounds()));

        let Some(index) = hit else {
            survivors.push(projectile);
            continue;
        };

        let enemy = &mut state.registry.enemies[index];
        enemy.hp -= 1;
        events.push(GameEvent::EnemyDamaged {
            id: enemy.id,
            hp: enemy.hp,
            effect_at: enemy.bounds().center(),
        });
        events.push(GameEvent::ProjectileRemoved {
            id: projectile.id,
            reason: ProjectileRemoval::Impact,
        });

        if enemy.hp <= 0 {
            let dead = state.registry.enemies.remove(index);
            events.push(GameEvent::EnemyRemoved {
                id: dead.id,
                reason: EnemyRemoval::Killed,
            });
            state.progress.record_kill(events);
        }
    }

    state.registry.projectiles = survivors;
}
