//! Game state module - the rules engine
//!
//! Ties together grid, pieces, generator, and stage progression. Spawning,
//! locking, and line clearing all complete synchronously inside the call
//! that triggers them; the only persistent modes are "falling" and
//! "game over". Game over is modeled state, not an error: the engine keeps
//! answering queries and ignores everything except Restart.

use crate::core::generator::PieceGenerator;
use crate::core::grid::{Grid, LockOutcome};
use crate::core::piece::Tetromino;
use crate::core::snapshot::GameSnapshot;
use crate::core::stage;
use crate::types::{EventQueue, GameAction, GameConfig, GameEvent, TopOutRule, POINTS_PER_LINE};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    current: Option<Tetromino>,
    generator: PieceGenerator,
    config: GameConfig,
    score: u32,
    lines: u32,
    blocks_placed: u32,
    game_over: bool,
    started: bool,
    /// Elapsed time since the last automatic descent.
    fall_timer_ms: u32,
    events: EventQueue,
}

impl GameState {
    /// Create a new game with the given RNG seed and default rules.
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        Self {
            grid: Grid::new(),
            current: None,
            generator: PieceGenerator::new(seed),
            config,
            score: 0,
            lines: 0,
            blocks_placed: 0,
            game_over: false,
            started: false,
            fall_timer_ms: 0,
            events: EventQueue::new(),
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn blocks_placed(&self) -> u32 {
        self.blocks_placed
    }

    /// Current difficulty tier, derived from blocks placed.
    pub fn stage(&self) -> u8 {
        stage::stage_for_blocks(self.blocks_placed)
    }

    /// Automatic fall interval for the current stage.
    pub fn fall_interval_ms(&self) -> u32 {
        stage::fall_interval_ms(self.stage())
    }

    pub fn current(&self) -> Option<Tetromino> {
        self.current
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for tests and scenario tooling.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Replace the falling piece. Test and scenario seam; normal play only
    /// ever draws from the generator.
    pub fn set_current(&mut self, piece: Tetromino) {
        self.current = Some(piece);
    }

    /// Drain the intents emitted since the last drain.
    pub fn take_events(&mut self) -> EventQueue {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        let _ = self.events.try_push(event);
    }

    /// Pop the next piece from the queue and make it current.
    ///
    /// If the spawn position already collides with locked blocks the game is
    /// over immediately; the grid is left untouched (the overlapping piece is
    /// kept visible for the final frame).
    pub fn spawn_piece(&mut self) {
        let piece = self.generator.pop();
        let blocked = !piece.fits(&self.grid, 0, 0);
        self.current = Some(piece);
        self.fall_timer_ms = 0;
        if blocked {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.game_over = true;
        self.emit(GameEvent::GameOver);
    }

    /// Try to translate the falling piece. Rejected moves are not errors;
    /// nothing changes and no event fires.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        if !piece.fits(&self.grid, dx, dy) {
            return false;
        }
        self.current = Some(Tetromino {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        });
        true
    }

    /// Try a quarter turn clockwise. No wall kicks: if the rotated shape
    /// does not fit at the current anchor the rotation is discarded.
    pub fn try_rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        let rotated = piece.shape.rotated();
        if !self.grid.can_place(&rotated, piece.x, piece.y) {
            return false;
        }
        self.current = Some(Tetromino {
            shape: rotated,
            ..piece
        });
        self.emit(GameEvent::Rotated);
        true
    }

    /// One downward step: move if possible, otherwise lock in place. This is
    /// both the gravity step and the soft-drop command; a blocked descent
    /// locks the piece this call, it does not fail silently.
    pub fn step_down(&mut self) {
        if self.game_over || self.current.is_none() {
            return;
        }
        if !self.try_move(0, 1) {
            self.lock_current();
        }
    }

    /// Snap the piece to its lowest legal position and lock immediately.
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        let Some(piece) = self.current else {
            return;
        };
        self.current = Some(Tetromino {
            y: piece.drop_y(&self.grid),
            ..piece
        });
        self.lock_current();
    }

    /// Anchor y of the ghost projection for the falling piece.
    pub fn ghost_y(&self) -> Option<i8> {
        self.current.map(|p| p.drop_y(&self.grid))
    }

    /// Write the falling piece into the grid, then clear lines, score,
    /// advance the stage, and spawn the successor.
    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let outcome = self.grid.lock(&piece);
        self.emit(GameEvent::BlockLanded {
            x: piece.x,
            y: piece.y,
            color: piece.color,
        });

        if outcome == LockOutcome::TopOut {
            self.enter_game_over();
            return;
        }

        let prev_stage = self.stage();
        self.blocks_placed += 1;

        let cleared = self.grid.clear_full_rows();
        if !cleared.is_empty() {
            let count = cleared.len() as u8;
            self.score += u32::from(count) * POINTS_PER_LINE;
            self.lines += u32::from(count);
            let mut rows = [0i8; 4];
            rows[..cleared.len()].copy_from_slice(&cleared);
            self.emit(GameEvent::LinesCleared { count, rows });
        }

        if let TopOutRule::CeilingRow(row) = self.config.top_out {
            // Checked after clearing: a clear can pull the stack back under
            // the line and save the game.
            if self.grid.any_occupied_above(row) {
                self.enter_game_over();
                return;
            }
        }

        let stage = self.stage();
        if stage != prev_stage {
            self.emit(GameEvent::StageAdvanced { stage });
        }

        self.spawn_piece();
    }

    /// Advance the simulation by the actual elapsed wall time. At most one
    /// gravity step fires per call; the accumulator carries the remainder so
    /// fall cadence stays correct under frame-rate variance.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over || !self.started {
            return false;
        }
        self.fall_timer_ms += elapsed_ms;
        let interval = self.fall_interval_ms();
        if self.fall_timer_ms >= interval {
            self.fall_timer_ms -= interval;
            self.step_down();
            return true;
        }
        false
    }

    /// Apply a normalized input command.
    ///
    /// While game over, every command except Restart is ignored. Restart
    /// atomically reinitializes grid, stats, and queue, then respawns.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over {
            if action == GameAction::Restart {
                self.restart();
                return true;
            }
            return false;
        }
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                self.step_down();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.try_rotate(),
            // Restart is only honored from game over.
            GameAction::Restart => false,
        }
    }

    fn restart(&mut self) {
        let seed = self.generator.seed();
        *self = Self::with_config(seed, self.config);
        self.start();
    }

    /// Fill a render snapshot. Allocation-free; the caller keeps one
    /// `GameSnapshot` and refreshes it after each tick.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.grid.get(x as i8, y as i8).unwrap_or(None);
            }
        }
        out.active = self.current;
        out.ghost_y = self.ghost_y();
        out.previews.clear();
        let depth = stage::preview_count(self.stage());
        for piece in self.generator.peek(depth) {
            let _ = out.previews.try_push(*piece);
        }
        out.score = self.score;
        out.lines = self.lines;
        out.blocks_placed = self.blocks_placed;
        out.stage = self.stage();
        out.stage_name = stage::stage_name(self.stage());
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
