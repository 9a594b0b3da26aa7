//! Render intent: everything the presentation layer may read, in one
//! allocation-free struct filled per tick.

use arrayvec::ArrayVec;

use crate::core::piece::Tetromino;
use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

/// Largest preview depth any stage shows.
pub const MAX_PREVIEWS: usize = 3;

/// Snapshot of the rules engine sufficient to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<Tetromino>,
    /// Anchor y where the active piece would land (ghost projection).
    pub ghost_y: Option<i8>,
    /// Upcoming pieces, truncated to the active stage's preview depth.
    pub previews: ArrayVec<Tetromino, MAX_PREVIEWS>,
    pub score: u32,
    pub lines: u32,
    pub blocks_placed: u32,
    pub stage: u8,
    pub stage_name: &'static str,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.previews.clear();
        self.score = 0;
        self.lines = 0;
        self.blocks_placed = 0;
        self.stage = 0;
        self.stage_name = crate::core::stage::stage_name(0);
        self.game_over = false;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            ghost_y: None,
            previews: ArrayVec::new(),
            score: 0,
            lines: 0,
            blocks_placed: 0,
            stage: 0,
            stage_name: crate::core::stage::stage_name(0),
            game_over: false,
        }
    }
}
