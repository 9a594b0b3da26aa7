//! Core types shared across the application
//! This module contains pure data types with no external dependencies

use arrayvec::ArrayVec;

/// Playfield dimensions
pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const MOVE_COOLDOWN_MS: u64 = 130;
pub const STAGE_TRANSITION_MS: u32 = 1000;

/// Analog stick deflection required before it counts as a move
pub const AXIS_THRESHOLD: f32 = 0.3;

/// Difficulty progression: one stage step every `BLOCKS_PER_STAGE` locked
/// pieces, capped at `MAX_STAGE`.
pub const BLOCKS_PER_STAGE: u32 = 5;
pub const MAX_STAGE: u8 = 3;

/// Automatic fall interval per stage (milliseconds)
pub const STAGE_FALL_INTERVALS_MS: [u32; 4] = [700, 500, 300, 180];

/// Upcoming-piece previews shown per stage (fewer at higher stages)
pub const STAGE_PREVIEW_COUNTS: [usize; 4] = [3, 2, 1, 0];

pub const STAGE_NAMES: [&str; 4] = ["Easy", "Medium", "Hard", "Super Hard"];

/// Lookahead queue length: enough previews for the most generous stage.
pub const PREVIEW_QUEUE_LEN: usize = (MAX_STAGE as usize) + 1;

/// Points per cleared row (flat, no simultaneous-clear multiplier)
pub const POINTS_PER_LINE: u32 = 100;

/// The eight vibrant pastels locked blocks are painted with
pub const PALETTE: [(u8, u8, u8); 8] = [
    (255, 182, 193),
    (173, 216, 230),
    (255, 255, 224),
    (221, 160, 221),
    (144, 238, 144),
    (255, 204, 229),
    (204, 255, 229),
    (229, 204, 255),
];

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Opaque index into `PALETTE`. Locked cells remember only their color,
/// not which piece produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor(pub u8);

impl PaletteColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        PALETTE[(self.0 as usize) % PALETTE.len()]
    }
}

/// Cell on the grid (None = empty, Some = locked block color)
pub type Cell = Option<PaletteColor>;

/// Commands the rules engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Restart,
}

/// Intents emitted by the rules engine for the presentation layer.
///
/// The core does not know how these are realized (sound channels, particle
/// surfaces); it only reports what happened this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LinesCleared {
        count: u8,
        /// Cleared row indices, bottom to top; only the first `count` are valid.
        rows: [i8; 4],
    },
    BlockLanded {
        x: i8,
        y: i8,
        color: PaletteColor,
    },
    Rotated,
    StageAdvanced {
        stage: u8,
    },
    GameOver,
}

/// Per-tick event buffer drained by the caller.
pub type EventQueue = ArrayVec<GameEvent, 16>;

/// Which condition ends the game when a piece settles.
///
/// The two policies both exist in the wild; `LockAboveField` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopOutRule {
    /// Locking any cell above the visible field (y < 0) ends the game.
    #[default]
    LockAboveField,
    /// Any occupied cell strictly above this row after a lock ends the game.
    CeilingRow(i8),
}

/// Rules-engine knobs that are product decisions rather than mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub top_out: TopOutRule,
}
