//! Core game logic: grid, pieces, piece generator, stage progression, and
//! the rules engine. Everything here is deterministic and free of I/O.

pub mod game_state;
pub mod generator;
pub mod grid;
pub mod piece;
pub mod snapshot;
pub mod stage;

pub use game_state::GameState;
pub use generator::{PieceGenerator, SimpleRng};
pub use grid::{Grid, LockOutcome};
pub use piece::{Shape, Tetromino};
pub use snapshot::GameSnapshot;
pub use stage::{fall_interval_ms, preview_count, stage_for_blocks, stage_name};
