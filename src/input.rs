//! Pointer gestures → game commands.
//!
//! The controller only tracks drag state.  It never touches the game
//! directly: it returns the [`Command`] a gesture means and the host
//! passes it to [`crate::game::Game::apply`], which clamps positions.

use crate::entities::{Arena, Player};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// New left edge for the player, unclamped.
    SetPlayerX(f32),
    Fire,
    TogglePause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pointer {
    Mouse,
    Touch,
}

/// Pointer input in arena coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Press { pointer: Pointer, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release { x: f32, y: f32 },
    HudToggle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    pointer: Pointer,
    /// Pointer x minus player x at press time.
    offset: f32,
    moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InputController {
    drag: Option<Drag>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Mouse: press on the player grabs it, moving drags it, releasing over
    /// the player fires (a click).  Touch: the same drag, but only a touch
    /// that never moved fires (a tap).
    pub fn handle(&mut self, event: InputEvent, player: &Player, arena: &Arena) -> Option<Command> {
        match event {
            InputEvent::Press { pointer, x, y } => {
                if player.bounds(arena).contains(x, y) {
                    self.drag = Some(Drag {
                        pointer,
                        offset: x - player.x,
                        moved: false,
                    });
                }
                None
            }
            InputEvent::Move { x, .. } => {
                let drag = self.drag.as_mut()?;
                drag.moved = true;
                Some(Command::SetPlayerX(x - drag.offset))
            }
            InputEvent::Release { x, y } => {
                let drag = self.drag.take()?;
                let fires = match drag.pointer {
                    Pointer::Mouse => player.bounds(arena).contains(x, y),
                    Pointer::Touch => !drag.moved,
                };
                fires.then_some(Command::Fire)
            }
            InputEvent::HudToggle => Some(Command::TogglePause),
        }
    }
}
