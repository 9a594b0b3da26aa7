//! Galaxy Tetris: a falling-block game with staged difficulty.
//!
//! The crate splits into a deterministic rules engine (`core`), input
//! normalization (`input`), decorative simulations (`effects`), sound
//! intents (`sound`), and a terminal front end (`term`). The engine knows
//! nothing about the terminal; it emits events and snapshots and the front
//! end renders them.

pub mod core;
pub mod effects;
pub mod input;
pub mod sound;
pub mod term;
pub mod types;

pub use crate::core::{GameSnapshot, GameState};
pub use crate::input::InputRouter;
pub use crate::sound::{NoopSounds, SoundCue, SoundSink};
pub use crate::types::{GameAction, GameConfig, GameEvent, TopOutRule};
