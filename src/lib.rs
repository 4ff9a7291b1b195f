//! Core of a vertical arcade shooter: enemies descend, the player slides
//! along the bottom edge and fires upward, kills feed an XP/level track.
//!
//! The crate is split the same way the game loop runs: plain data in
//! [`entities`], the per-tick passes in [`compute`], and [`game::Game`] as
//! the one controller that owns a session and drives everything else.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod game;
pub mod input;
pub mod progression;
pub mod registry;
pub mod spawner;
