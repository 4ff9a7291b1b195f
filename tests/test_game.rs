use std::time::Duration;

use pretty_assertions::assert_eq;

use treadmill_shooter::config::GameConfig;
use treadmill_shooter::entities::{Position, RunStatus};
use treadmill_shooter::error::ConfigError;
use treadmill_shooter::events::GameEvent;
use treadmill_shooter::game::Game;
use treadmill_shooter::input::Command;

fn config() -> GameConfig {
    GameConfig {
        seed: Some(7),
        ..GameConfig::default()
    }
}

fn new_game() -> Game {
    Game::new(config()).unwrap()
}

fn positions(game: &Game) -> (Vec<Position>, Vec<Position>) {
    let r = &game.state().registry;
    (
        r.enemies().iter().map(|e| e.position).collect(),
        r.projectiles().iter().map(|p| p.position).collect(),
    )
}

/// Short arena: an enemy escapes after 25 ticks at Normal speed.
fn play_until_over() -> Game {
    let mut game = Game::new(GameConfig {
        arena_height: 100.0,
        ..config()
    })
    .unwrap();
    for _ in 0..3 {
        game.spawn_enemy();
    }
    for _ in 0..200 {
        if game.is_over() {
            break;
        }
        game.frame();
    }
    game
}

// ── Construction & config ─────────────────────────────────────────────────────

#[test]
fn new_game_starts_running_and_announces_hud() {
    let mut game = new_game();
    assert_eq!(game.status(), RunStatus::Running);
    assert_eq!(game.final_score(), None);
    assert_eq!(game.scroll_speed_secs(), 14);
    assert_eq!(
        game.drain_events(),
        vec![GameEvent::HudChanged(game.state().progress.hud())]
    );
    assert!(game.drain_events().is_empty());
}

#[test]
fn too_small_arena_is_rejected() {
    let err = Game::new(GameConfig {
        arena_width: 20.0,
        ..config()
    })
    .err();
    assert!(matches!(err, Some(ConfigError::ArenaTooSmall { .. })));
}

#[test]
fn zero_spawn_interval_is_rejected() {
    let err = GameConfig {
        spawn_interval: Duration::ZERO,
        ..config()
    }
    .validate();
    assert_eq!(err, Err(ConfigError::ZeroSpawnInterval));
}

#[test]
fn zero_frame_rate_is_rejected() {
    let err = GameConfig {
        frame_rate: 0,
        ..config()
    }
    .validate();
    assert_eq!(err, Err(ConfigError::ZeroFrameRate));
}

#[test]
fn config_error_messages_are_readable() {
    let msg = ConfigError::ArenaTooSmall {
        width: 20.0,
        height: 600.0,
        min_width: 50.0,
        min_height: 100.0,
    }
    .to_string();
    assert_eq!(msg, "arena too small: 20x600 (need at least 50x100)");
}

#[test]
fn default_config_matches_reference_game() {
    let c = GameConfig::default();
    assert_eq!(c.spawn_interval, Duration::from_millis(2000));
    assert!(c.spawn_while_paused);
    assert_eq!(c.validate(), Ok(()));
    assert_eq!(c.frame_duration(), Duration::from_secs(1) / 60);
}

// ── Frame cadence ─────────────────────────────────────────────────────────────

#[test]
fn each_frame_runs_one_tick() {
    let mut game = new_game();
    for expected in 1..=5 {
        assert!(game.frame());
        assert_eq!(game.state().frame, expected);
    }
}

#[test]
fn pause_freezes_entities_and_resume_continues_from_there() {
    let mut game = new_game();
    game.spawn_enemy();
    game.fire();
    for _ in 0..3 {
        game.frame();
    }

    game.toggle_pause();
    let frozen = positions(&game);
    let frozen_frame = game.state().frame;
    for _ in 0..10 {
        assert!(!game.frame());
    }
    assert_eq!(positions(&game), frozen);
    assert_eq!(game.state().frame, frozen_frame);

    game.toggle_pause();
    assert!(game.frame());
    let (enemies, projectiles) = positions(&game);
    let speed = game.state().registry.enemies()[0].kind.speed();
    assert_eq!(enemies[0].y, frozen.0[0].y + speed);
    assert_eq!(projectiles[0].y, frozen.1[0].y - 5.0);
}

#[test]
fn rapid_toggles_never_stack_ticks() {
    let mut game = new_game();
    for _ in 0..4 {
        game.toggle_pause();
    }
    assert_eq!(game.status(), RunStatus::Running);
    for _ in 0..5 {
        game.frame();
    }
    assert_eq!(game.state().frame, 5);
}

#[test]
fn toggle_emits_pause_changes() {
    let mut game = new_game();
    game.drain_events();
    game.apply(Command::TogglePause);
    game.apply(Command::TogglePause);
    assert_eq!(
        game.drain_events(),
        vec![
            GameEvent::PauseChanged { paused: true },
            GameEvent::PauseChanged { paused: false },
        ]
    );
}

#[test]
fn fire_and_move_are_accepted_while_paused() {
    let mut game = new_game();
    game.toggle_pause();
    game.apply(Command::SetPlayerX(10.0));
    game.apply(Command::Fire);
    assert_eq!(game.state().player.x, 10.0);
    assert_eq!(game.state().registry.projectile_count(), 1);
    assert_eq!(
        game.state().registry.projectiles()[0].position,
        Position::new(25.0, 550.0)
    );
}

#[test]
fn set_player_x_is_clamped() {
    let mut game = new_game();
    game.apply(Command::SetPlayerX(-100.0));
    assert_eq!(game.state().player.x, 0.0);
    game.apply(Command::SetPlayerX(10_000.0));
    assert_eq!(game.state().player.x, 350.0);
}

// ── Spawn clock ───────────────────────────────────────────────────────────────

#[test]
fn clock_spawns_every_two_seconds() {
    let mut game = new_game();
    assert_eq!(game.advance_clock(Duration::from_millis(1000)), 0);
    assert_eq!(game.advance_clock(Duration::from_millis(1000)), 1);
    assert_eq!(game.advance_clock(Duration::from_millis(4000)), 2);
    assert_eq!(game.state().registry.enemy_count(), 3);
}

#[test]
fn spawning_continues_while_paused_by_default() {
    let mut game = new_game();
    game.toggle_pause();
    assert_eq!(game.advance_clock(Duration::from_millis(2000)), 1);
    assert_eq!(game.state().registry.enemy_count(), 1);
}

#[test]
fn spawn_timer_can_be_suspended_while_paused() {
    let mut game = Game::new(GameConfig {
        spawn_while_paused: false,
        ..config()
    })
    .unwrap();
    game.advance_clock(Duration::from_millis(1000));
    game.toggle_pause();
    assert_eq!(game.advance_clock(Duration::from_millis(5000)), 0);
    game.toggle_pause();
    assert_eq!(game.advance_clock(Duration::from_millis(999)), 0);
    assert_eq!(game.advance_clock(Duration::from_millis(1)), 1);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn three_escapes_end_the_run() {
    let mut game = play_until_over();
    assert!(game.is_over());
    assert_eq!(game.state().progress.stats.hp, 0);
    assert_eq!(game.final_score(), Some(0));

    let overs: Vec<GameEvent> = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .collect();
    assert_eq!(overs, vec![GameEvent::GameOver { score: 0 }]);
}

#[test]
fn game_over_is_terminal() {
    let mut game = play_until_over();
    let frame = game.state().frame;
    game.drain_events();

    assert!(!game.frame());
    game.toggle_pause();
    assert_eq!(game.status(), RunStatus::GameOver);
    assert_eq!(game.spawn_enemy(), None);
    assert_eq!(game.advance_clock(Duration::from_secs(10)), 0);
    game.apply(Command::Fire);
    game.apply(Command::SetPlayerX(0.0));

    assert_eq!(game.state().frame, frame);
    assert_eq!(game.state().registry.projectile_count(), 0);
    assert!(game.drain_events().is_empty());
}

#[test]
fn restart_is_a_fresh_session() {
    let over = play_until_over();
    assert!(over.is_over());
    let fresh = Game::new(over.config().clone()).unwrap();
    assert_eq!(fresh.status(), RunStatus::Running);
    assert_eq!(fresh.state().progress.stats.hp, 3);
    assert_eq!(fresh.state().registry.enemy_count(), 0);
}
