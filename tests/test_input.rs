use treadmill_shooter::entities::{Arena, Player};
use treadmill_shooter::input::*;

fn arena() -> Arena {
    Arena {
        width: 400.0,
        height: 600.0,
    }
}

// Player box: x 100..150, y 550..600.
fn player() -> Player {
    Player { x: 100.0 }
}

fn press(pointer: Pointer, x: f32, y: f32) -> InputEvent {
    InputEvent::Press { pointer, x, y }
}

#[test]
fn press_off_the_player_does_not_grab() {
    let mut c = InputController::new();
    assert_eq!(c.handle(press(Pointer::Mouse, 300.0, 100.0), &player(), &arena()), None);
    assert!(!c.is_dragging());
    assert_eq!(
        c.handle(InputEvent::Move { x: 320.0, y: 100.0 }, &player(), &arena()),
        None
    );
}

#[test]
fn drag_keeps_the_grab_offset() {
    let mut c = InputController::new();
    c.handle(press(Pointer::Mouse, 110.0, 570.0), &player(), &arena());
    assert!(c.is_dragging());
    assert_eq!(
        c.handle(InputEvent::Move { x: 200.0, y: 20.0 }, &player(), &arena()),
        Some(Command::SetPlayerX(190.0))
    );
}

#[test]
fn drag_commands_are_not_clamped_by_the_controller() {
    let mut c = InputController::new();
    c.handle(press(Pointer::Mouse, 110.0, 570.0), &player(), &arena());
    assert_eq!(
        c.handle(InputEvent::Move { x: -50.0, y: 570.0 }, &player(), &arena()),
        Some(Command::SetPlayerX(-60.0))
    );
}

#[test]
fn mouse_click_on_player_fires() {
    let mut c = InputController::new();
    c.handle(press(Pointer::Mouse, 120.0, 560.0), &player(), &arena());
    assert_eq!(
        c.handle(InputEvent::Release { x: 120.0, y: 560.0 }, &player(), &arena()),
        Some(Command::Fire)
    );
    assert!(!c.is_dragging());
}

#[test]
fn mouse_release_away_from_player_does_not_fire() {
    let mut c = InputController::new();
    c.handle(press(Pointer::Mouse, 120.0, 560.0), &player(), &arena());
    assert_eq!(
        c.handle(InputEvent::Release { x: 300.0, y: 560.0 }, &player(), &arena()),
        None
    );
}

#[test]
fn touch_tap_fires() {
    let mut c = InputController::new();
    c.handle(press(Pointer::Touch, 120.0, 560.0), &player(), &arena());
    assert_eq!(
        c.handle(InputEvent::Release { x: 120.0, y: 560.0 }, &player(), &arena()),
        Some(Command::Fire)
    );
}

#[test]
fn touch_drag_does_not_fire() {
    let mut c = InputController::new();
    c.handle(press(Pointer::Touch, 120.0, 560.0), &player(), &arena());
    c.handle(InputEvent::Move { x: 160.0, y: 560.0 }, &player(), &arena());
    let moved = Player { x: 140.0 };
    assert_eq!(
        c.handle(InputEvent::Release { x: 160.0, y: 560.0 }, &moved, &arena()),
        None
    );
}

#[test]
fn release_without_press_is_ignored() {
    let mut c = InputController::new();
    assert_eq!(
        c.handle(InputEvent::Release { x: 120.0, y: 560.0 }, &player(), &arena()),
        None
    );
}

#[test]
fn hud_toggle_pauses() {
    let mut c = InputController::new();
    assert_eq!(
        c.handle(InputEvent::HudToggle, &player(), &arena()),
        Some(Command::TogglePause)
    );
}
